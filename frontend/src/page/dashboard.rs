use seed::{prelude::*, *};
use shared::analytics::{ConsumptionPeriod, cost_distribution, energy_series, maintenance_series};
use shared::street::LightInfo;
use shared::{DashboardConfig, FetchError, FetchState, RequestTracker, StreetDetailedInfo, Ticket};

use crate::{api, charts};

const ENERGY_FILL: &str = "#82ca9d";
const MAINTENANCE_STROKE: &str = "#8884d8";

pub struct Model {
    street_id: u32,
    api_base_url: String,
    period: ConsumptionPeriod,
    details: FetchState<StreetDetailedInfo>,
    requests: RequestTracker,
    fetch: Option<CmdHandle>,
}

pub enum Msg {
    Fetched(Ticket, Result<StreetDetailedInfo, FetchError>),
    TogglePeriod,
    Retry,
}

pub fn init(config: &DashboardConfig, street_id: u32, orders: &mut impl Orders<Msg>) -> Model {
    let mut model = Model {
        street_id,
        api_base_url: config.api_base_url.clone(),
        period: ConsumptionPeriod::default(),
        details: FetchState::Loading,
        requests: RequestTracker::default(),
        fetch: None,
    };
    request_details(&mut model, orders);
    model
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::Fetched(ticket, result) => {
            if !model.requests.is_current(ticket) {
                return;
            }
            model.fetch = None;
            model.details = FetchState::from_result(result);
        }
        Msg::TogglePeriod => model.period = model.period.toggled(),
        Msg::Retry => {
            if model.fetch.is_none() {
                request_details(model, orders);
            }
        }
    }
}

fn request_details(model: &mut Model, orders: &mut impl Orders<Msg>) {
    let ticket = model.requests.issue();
    let base_url = model.api_base_url.clone();
    let street_id = model.street_id;
    model.details = FetchState::Loading;
    model.fetch = Some(orders.perform_cmd_with_handle(async move {
        Msg::Fetched(ticket, api::fetch_street_detailed(base_url, street_id).await)
    }));
}

pub fn view(model: &Model) -> Node<Msg> {
    match &model.details {
        FetchState::Loading => crate::view_loading(),
        FetchState::Failed(err) => div![
            C!["dashboard", "error"],
            p![format!("Could not load street {}: {err}", model.street_id)],
            button!["Retry", ev(Ev::Click, |_| Msg::Retry)],
        ],
        FetchState::Ready(details) => view_details(details, model.period),
    }
}

fn view_details(data: &StreetDetailedInfo, period: ConsumptionPeriod) -> Node<Msg> {
    let card = |title: &str, content: String| div![C!["card"], h3![title], p![content]];
    let slices = cost_distribution(data);

    div![
        C!["dashboard"],
        div![
            C!["summary-cards"],
            card("Total Lights", data.lights_info.len().to_string()),
            card(
                "Monthly Energy Usage",
                format!("{} kWh", data.energy_summary.total_monthly_consumption)
            ),
            card(
                "Maintenance Records",
                data.maintenance_summary.total_maintenance_records.to_string()
            ),
        ],
        div![
            C!["second-row"],
            div![
                C!["pie-card"],
                h4!["Cost Distribution"],
                charts::pie_chart(&slices),
                p![format!("Total Cost: ₹{}", data.cost_summary.total_cost)],
            ],
            div![
                C!["warranty-card"],
                h4!["Warranty Summary"],
                p![format!(
                    "Active Warranties: {}",
                    data.warranty_summary.active_warranties
                )],
                p![format!("Expiring Soon: {}", data.warranty_summary.expiring_soon)],
            ],
        ],
        div![
            C!["charts"],
            div![
                C!["chart"],
                div![
                    C!["chart-header"],
                    h4![format!("Energy Consumption ({})", period.label())],
                    button![
                        format!("Show {}", period.toggled().label()),
                        ev(Ev::Click, |_| Msg::TogglePeriod),
                    ],
                ],
                charts::bar_chart(&energy_series(data, period), ENERGY_FILL),
            ],
            div![
                C!["chart"],
                h4!["Maintenance Costs"],
                charts::maintenance_line_chart(&maintenance_series(data), MAINTENANCE_STROKE),
            ],
        ],
        view_lights_table(&data.lights_info),
    ]
}

fn view_lights_table(lights: &[LightInfo]) -> Node<Msg> {
    let or_na = |value: Option<String>| value.unwrap_or_else(|| "N/A".to_string());

    div![
        C!["table"],
        h4!["Lights Specifications"],
        table![
            thead![tr![
                th!["Light ID"],
                th!["Contractor Name"],
                th!["Installation Date"],
                th!["Manufacturer & Type"],
                th!["Wattage"],
                th!["Status"],
                th!["Last Check"],
            ]],
            tbody![lights.iter().map(|light| {
                let spec = &light.specifications;
                tr![
                    td![light.id.to_string()],
                    td![or_na(light.installation.contractor_name.clone())],
                    td![or_na(
                        light.installation.installation_date.map(|d| d.to_string())
                    )],
                    td![format!(
                        "{} ({})",
                        spec.bulb_manufacturer.as_deref().unwrap_or("N/A"),
                        spec.bulb_type.as_deref().unwrap_or("N/A")
                    )],
                    td![or_na(spec.wattage.map(|w| format!("{w} W")))],
                    td![or_na(light.status.current_status.clone())],
                    td![or_na(light.status.last_status_update.map(|d| d.to_string()))],
                ]
            })],
        ],
    ]
}
