//! Chart-ready series derived from the detailed street payload.

use chrono::NaiveDate;

use crate::street::StreetDetailedInfo;

pub const COST_COLORS: [&str; 3] = ["#0088FE", "#00C49F", "#FFBB28"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsumptionPeriod {
    #[default]
    Daily,
    Monthly,
}

impl ConsumptionPeriod {
    pub fn toggled(self) -> Self {
        match self {
            Self::Daily => Self::Monthly,
            Self::Monthly => Self::Daily,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenancePoint {
    pub date: NaiveDate,
    pub cost: f64,
    pub kind: String,
    pub street_light_id: u32,
}

impl MaintenancePoint {
    pub fn tooltip(&self) -> String {
        format!(
            "₹{:.0}: {} on light id - {}",
            self.cost, self.kind, self.street_light_id
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostSlice {
    pub name: &'static str,
    pub value: f64,
    pub color: &'static str,
}

pub fn energy_series(info: &StreetDetailedInfo, period: ConsumptionPeriod) -> Vec<SeriesPoint> {
    info.energy_summary
        .per_light_consumption
        .iter()
        .map(|light| SeriesPoint {
            label: format!("Light {}", light.light_id),
            value: match period {
                ConsumptionPeriod::Daily => light.daily_consumption,
                ConsumptionPeriod::Monthly => light.monthly_consumption,
            },
        })
        .collect()
}

/// Maintenance costs in chronological order.
pub fn maintenance_series(info: &StreetDetailedInfo) -> Vec<MaintenancePoint> {
    let mut points: Vec<MaintenancePoint> = info
        .maintenance_summary
        .maintenance
        .iter()
        .map(|record| MaintenancePoint {
            date: record.date,
            cost: record.cost,
            kind: record.kind.clone().unwrap_or_else(|| "maintenance".to_string()),
            street_light_id: record.street_light_id,
        })
        .collect();
    points.sort_by_key(|point| point.date);
    points
}

pub fn cost_distribution(info: &StreetDetailedInfo) -> [CostSlice; 3] {
    let costs = &info.cost_summary;
    let [installation, maintenance, electricity] = COST_COLORS;
    [
        CostSlice {
            name: "Installation Cost",
            value: costs.total_installation_cost,
            color: installation,
        },
        CostSlice {
            name: "Maintenance Cost",
            value: costs.total_maintenance_cost,
            color: maintenance,
        },
        CostSlice {
            name: "Electricity Cost",
            value: costs.total_electricity_cost,
            color: electricity,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::street::fixtures::DETAILED_INFO_JSON;

    fn detailed() -> StreetDetailedInfo {
        serde_json::from_str(DETAILED_INFO_JSON).unwrap()
    }

    #[test]
    fn test_period_toggle() {
        assert_eq!(ConsumptionPeriod::default(), ConsumptionPeriod::Daily);
        assert_eq!(ConsumptionPeriod::Daily.toggled(), ConsumptionPeriod::Monthly);
        assert_eq!(ConsumptionPeriod::Monthly.toggled().label(), "Daily");
    }

    #[test]
    fn test_energy_series_follows_period() {
        let info = detailed();
        let daily = energy_series(&info, ConsumptionPeriod::Daily);
        assert_eq!(
            daily,
            vec![
                SeriesPoint { label: "Light 11".into(), value: 1.08 },
                SeriesPoint { label: "Light 12".into(), value: 4.68 },
            ]
        );
        let monthly = energy_series(&info, ConsumptionPeriod::Monthly);
        assert_eq!(monthly[1].value, 140.4);
    }

    #[test]
    fn test_maintenance_series_is_chronological() {
        let series = maintenance_series(&detailed());
        let dates: Vec<String> = series.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, ["2023-11-20", "2024-01-15", "2024-03-02"]);
        assert_eq!(series[1].kind, "maintenance");
        assert_eq!(series[2].tooltip(), "₹1200: bulb replacement on light id - 12");
    }

    #[test]
    fn test_cost_distribution_slices() {
        let slices = cost_distribution(&detailed());
        assert_eq!(slices[0].name, "Installation Cost");
        assert_eq!(slices[1].value, 2450.0);
        assert_eq!(slices[2].color, "#FFBB28");
    }
}
