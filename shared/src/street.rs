use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::InterpolationError;
use crate::geo::GeoPoint;

/// Street summary shown in the map sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetBasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub street_name: String,
    pub ward: Option<String>,
    pub total_lights: u32,
    pub total_power_consumption: f64,
    #[serde(default)]
    pub operational_summary: BTreeMap<String, u32>,
    #[serde(default)]
    pub recent_issues: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_point: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_point: Option<GeoPoint>,
}

impl StreetBasicInfo {
    pub fn endpoints(&self) -> Option<(GeoPoint, GeoPoint)> {
        Some((self.start_point?, self.end_point?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolateRequest {
    pub start_point: GeoPoint,
    pub end_point: GeoPoint,
    pub num_points: usize,
}

impl InterpolateRequest {
    pub fn new(
        start_point: GeoPoint,
        end_point: GeoPoint,
        num_points: usize,
    ) -> Result<Self, InterpolationError> {
        if num_points == 0 {
            return Err(InterpolationError::InvalidPointCount(num_points));
        }
        Ok(Self {
            start_point,
            end_point,
            num_points,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolateResponse {
    pub points: Vec<GeoPoint>,
}

/// Error body returned by the API on non-2xx answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(alias = "detail")]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetDetailedInfo {
    pub lights_info: Vec<LightInfo>,
    pub energy_summary: EnergySummary,
    pub maintenance_summary: MaintenanceSummary,
    pub cost_summary: CostSummary,
    pub warranty_summary: WarrantySummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightInfo {
    pub id: u32,
    pub installation: Installation,
    pub specifications: Specifications,
    pub status: LightStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installation {
    pub contractor_name: Option<String>,
    pub installation_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specifications {
    pub bulb_manufacturer: Option<String>,
    pub bulb_type: Option<String>,
    pub wattage: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightStatus {
    pub current_status: Option<String>,
    pub last_status_update: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergySummary {
    #[serde(default)]
    pub total_daily_consumption: f64,
    pub total_monthly_consumption: f64,
    pub per_light_consumption: Vec<LightConsumption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConsumption {
    pub light_id: u32,
    pub daily_consumption: f64,
    pub monthly_consumption: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceSummary {
    pub total_maintenance_records: u32,
    pub maintenance: Vec<MaintenanceRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub date: NaiveDate,
    pub cost: f64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub street_light_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_installation_cost: f64,
    pub total_maintenance_cost: f64,
    pub total_electricity_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantySummary {
    pub active_warranties: u32,
    pub expiring_soon: u32,
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const BASIC_INFO_JSON: &str = r#"{
        "id": 3,
        "street_name": "Sector 12 Main Road",
        "ward": "Dwarka",
        "total_lights": 4,
        "total_power_consumption": 812.5,
        "operational_summary": {"operational": 3, "faulty": 1},
        "recent_issues": 2,
        "start_point": [77.0512, 28.5921],
        "end_point": [77.0634, 28.6010]
    }"#;

    pub const DETAILED_INFO_JSON: &str = r#"{
        "lights_info": [
            {
                "id": 11,
                "installation": {"contractor_name": "Bharat Electricals", "installation_date": "2021-04-12"},
                "specifications": {"bulb_manufacturer": "Philips", "bulb_type": "LED", "wattage": 90},
                "status": {"current_status": "operational", "last_status_update": "2024-06-01"}
            },
            {
                "id": 12,
                "installation": {"contractor_name": null, "installation_date": "2021-04-13"},
                "specifications": {"bulb_manufacturer": "Havells", "bulb_type": "Sodium", "wattage": 150},
                "status": {"current_status": "faulty", "last_status_update": null}
            }
        ],
        "energy_summary": {
            "total_daily_consumption": 5.76,
            "total_monthly_consumption": 172.8,
            "per_light_consumption": [
                {"light_id": 11, "daily_consumption": 1.08, "monthly_consumption": 32.4},
                {"light_id": 12, "daily_consumption": 4.68, "monthly_consumption": 140.4}
            ]
        },
        "maintenance_summary": {
            "total_maintenance_records": 3,
            "maintenance": [
                {"date": "2024-03-02", "cost": 1200.0, "type": "bulb replacement", "street_light_id": 12},
                {"date": "2023-11-20", "cost": 450.0, "type": "inspection", "street_light_id": 11},
                {"date": "2024-01-15", "cost": 800.0, "type": null, "street_light_id": 11}
            ]
        },
        "cost_summary": {
            "total_installation_cost": 50000.0,
            "total_maintenance_cost": 2450.0,
            "total_electricity_cost": 9800.0,
            "total_cost": 62250.0
        },
        "warranty_summary": {"active_warranties": 2, "expiring_soon": 1}
    }"#;
}
