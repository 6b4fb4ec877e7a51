use seed::{prelude::*, *};
use shared::{
    DashboardConfig, FetchError, FetchState, GeoPoint, InterpolateRequest, RequestTracker,
    StreetBasicInfo, Ticket, TileSigner, Viewport, ViewportSequencer, interpolate,
};
use wasm_bindgen::JsCast;

use crate::api;
use crate::map_bridge::{MAP_CONTAINER_ID, MapHandle, VIEWPORT_EVENT};

/// Vertices of the street line drawn between its two endpoints.
const PATH_SAMPLES: usize = 32;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Sidebar {
    Open,
    Closed,
}

pub struct Model {
    street_id: u32,
    api_base_url: String,
    style_url: String,
    signer: TileSigner,
    sequencer: ViewportSequencer,
    street: FetchState<StreetBasicInfo>,
    lights: FetchState<Vec<GeoPoint>>,
    street_requests: RequestTracker,
    light_requests: RequestTracker,
    sidebar: Sidebar,
    map: Option<MapHandle>,
    // Handles abort their command or stream when the page model is dropped.
    focus_timer: Option<CmdHandle>,
    street_fetch: Option<CmdHandle>,
    lights_fetch: Option<CmdHandle>,
    _viewport_events: StreamHandle,
}

pub enum Msg {
    ContainerRendered,
    FocusDue,
    ViewportChanged(Viewport),
    StreetFetched(Ticket, Result<StreetBasicInfo, FetchError>),
    LightsFetched(Ticket, Result<Vec<GeoPoint>, FetchError>),
    RetryStreet,
    OpenSidebar,
    CloseSidebar,
}

pub fn init(config: &DashboardConfig, street_id: u32, orders: &mut impl Orders<Msg>) -> Model {
    let sequencer = ViewportSequencer::default();
    let delay_ms = u32::try_from(sequencer.delay().as_millis()).unwrap_or(u32::MAX);
    let focus_timer = orders.perform_cmd_with_handle(cmds::timeout(delay_ms, || Msg::FocusDue));

    let viewport_events =
        orders.stream_with_handle(streams::window_event(Ev::from(VIEWPORT_EVENT), |event| {
            let event = event.dyn_into::<web_sys::CustomEvent>().ok()?;
            let viewport: Viewport = serde_wasm_bindgen::from_value(event.detail()).ok()?;
            Some(Msg::ViewportChanged(viewport))
        }));
    orders.after_next_render(|_| Msg::ContainerRendered);

    let mut model = Model {
        street_id,
        api_base_url: config.api_base_url.clone(),
        style_url: config.style_url.clone(),
        signer: config.tile_signer(),
        sequencer,
        street: FetchState::Loading,
        lights: FetchState::Loading,
        street_requests: RequestTracker::default(),
        light_requests: RequestTracker::default(),
        sidebar: Sidebar::Closed,
        map: None,
        focus_timer: Some(focus_timer),
        street_fetch: None,
        lights_fetch: None,
        _viewport_events: viewport_events,
    };
    request_street(&mut model, orders);
    model
}

pub fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::ContainerRendered => {
            if model.map.is_none() {
                model.map = Some(MapHandle::mount(
                    &model.style_url,
                    model.signer.clone(),
                    model.sequencer.current(),
                ));
                sync_layers(model);
            }
        }
        Msg::FocusDue => {
            model.focus_timer = None;
            if let Some(viewport) = model.sequencer.fire() {
                web_sys::console::debug_1(
                    &format!(
                        "[frontend] focusing lon={:.5} lat={:.5} zoom={}",
                        viewport.longitude, viewport.latitude, viewport.zoom
                    )
                    .into(),
                );
                if let Some(map) = &model.map {
                    map.fly_to(&viewport);
                }
            }
        }
        Msg::ViewportChanged(viewport) => {
            if model.focus_timer.take().is_some() {
                web_sys::console::debug_1(&"[frontend] map moved by user, scripted focus cancelled".into());
            }
            model.sequencer.user_moved(viewport);
        }
        Msg::StreetFetched(ticket, result) => {
            if !model.street_requests.is_current(ticket) {
                web_sys::console::debug_1(&"[frontend] dropping stale street reply".into());
                return;
            }
            model.street_fetch = None;
            match result {
                Ok(street) => {
                    request_lights(model, &street, orders);
                    model.street = FetchState::Ready(street);
                    model.sidebar = Sidebar::Open;
                    sync_layers(model);
                }
                Err(err) => {
                    model.light_requests.reset();
                    model.lights_fetch = None;
                    model.street = FetchState::Failed(err.to_string());
                }
            }
        }
        Msg::LightsFetched(ticket, result) => {
            if !model.light_requests.is_current(ticket) {
                web_sys::console::debug_1(&"[frontend] dropping stale light positions".into());
                return;
            }
            model.lights_fetch = None;
            model.lights = FetchState::from_result(result);
            sync_layers(model);
        }
        Msg::RetryStreet => {
            if model.street_fetch.is_none() {
                request_street(model, orders);
            }
        }
        Msg::OpenSidebar => model.sidebar = Sidebar::Open,
        Msg::CloseSidebar => model.sidebar = Sidebar::Closed,
    }
}

fn request_street(model: &mut Model, orders: &mut impl Orders<Msg>) {
    let ticket = model.street_requests.issue();
    let base_url = model.api_base_url.clone();
    let street_id = model.street_id;
    model.street = FetchState::Loading;
    model.lights = FetchState::Loading;
    model.street_fetch = Some(orders.perform_cmd_with_handle(async move {
        Msg::StreetFetched(ticket, api::fetch_street_basic(base_url, street_id).await)
    }));
}

/// Light positions depend on the street's endpoints, so they are only asked
/// for once the street itself has arrived.
fn request_lights(model: &mut Model, street: &StreetBasicInfo, orders: &mut impl Orders<Msg>) {
    let Some(request) = light_request(street) else {
        model.light_requests.reset();
        model.lights = FetchState::Ready(Vec::new());
        return;
    };
    let ticket = model.light_requests.issue();
    let base_url = model.api_base_url.clone();
    model.lights = FetchState::Loading;
    model.lights_fetch = Some(orders.perform_cmd_with_handle(async move {
        Msg::LightsFetched(ticket, api::fetch_interpolated_points(base_url, request).await)
    }));
}

/// One marker per light, spread along the street. `None` when there is
/// nothing to place.
fn light_request(street: &StreetBasicInfo) -> Option<InterpolateRequest> {
    let (start, end) = street.endpoints()?;
    InterpolateRequest::new(start, end, street.total_lights as usize).ok()
}

fn street_path(street: &StreetBasicInfo) -> Vec<GeoPoint> {
    street
        .endpoints()
        .and_then(|(start, end)| interpolate(start, end, PATH_SAMPLES).ok())
        .unwrap_or_default()
}

fn sync_layers(model: &Model) {
    let (Some(map), Some(street)) = (&model.map, model.street.ready()) else {
        return;
    };
    let lights = model.lights.ready().map(Vec::as_slice).unwrap_or(&[]);
    map.show_street(&street_path(street), lights);
}

pub fn view(model: &Model) -> Node<Msg> {
    div![
        C!["map-page"],
        div![C!["map-container"], attrs! { At::Id => MAP_CONTAINER_ID }],
        view_status(model),
        view_sidebar(model),
    ]
}

fn view_status(model: &Model) -> Node<Msg> {
    match (&model.street, &model.lights) {
        (FetchState::Loading, _) => crate::view_loading(),
        (FetchState::Failed(err), _) => div![
            C!["map-status", "error"],
            p![format!("Could not load street {}: {err}", model.street_id)],
            button!["Retry", ev(Ev::Click, |_| Msg::RetryStreet)],
        ],
        (FetchState::Ready(_), FetchState::Failed(err)) => div![
            C!["map-status", "error"],
            p![format!("Light positions unavailable: {err}")],
        ],
        (FetchState::Ready(_), FetchState::Loading) if model.lights_fetch.is_some() => {
            div![C!["map-status"], small!["Placing lights…"]]
        }
        (FetchState::Ready(_), _) => empty![],
    }
}

fn view_sidebar(model: &Model) -> Node<Msg> {
    let Some(street) = model.street.ready() else {
        return empty![];
    };
    if model.sidebar == Sidebar::Closed {
        return button![
            C!["sidebar-open"],
            "Street info",
            ev(Ev::Click, |_| Msg::OpenSidebar),
        ];
    }

    let section = |title: &str, value: Node<Msg>| {
        div![
            C!["section"],
            div![C!["section-title"], title],
            value,
        ]
    };
    let value = |text: String| div![C!["section-value"], text];

    div![
        C!["sidebar"],
        div![
            C!["sidebar-header"],
            h2![street.street_name.as_str()],
            button!["›", ev(Ev::Click, |_| Msg::CloseSidebar)],
        ],
        div![
            C!["sidebar-content"],
            section(
                "Ward",
                value(street.ward.clone().unwrap_or_else(|| "N/A".to_string()))
            ),
            section("Total Lights", value(street.total_lights.to_string())),
            section(
                "Power Usage",
                value(format!("{:.1} kWh", street.total_power_consumption))
            ),
            section(
                "Operational Status",
                div![
                    C!["operational-status"],
                    street.operational_summary.iter().map(|(status, count)| {
                        div![span![status.as_str()], span![count.to_string()]]
                    })
                ]
            ),
            section("Recent Issues", value(street.recent_issues.to_string())),
        ],
        div![
            C!["sidebar-footer"],
            a![
                C!["button"],
                attrs! { At::Href => format!("/dashboard/{}", model.street_id) },
                "See Detailed View",
            ],
        ],
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn street(total_lights: u32, endpoints: bool) -> StreetBasicInfo {
        StreetBasicInfo {
            id: Some(3),
            street_name: "Sector 12 Main Road".into(),
            ward: Some("Dwarka".into()),
            total_lights,
            total_power_consumption: 812.5,
            operational_summary: BTreeMap::new(),
            recent_issues: 0,
            start_point: endpoints.then(|| GeoPoint::new(77.0512, 28.5921)),
            end_point: endpoints.then(|| GeoPoint::new(77.0634, 28.6010)),
        }
    }

    #[test]
    fn test_light_request_uses_one_point_per_light() {
        let request = light_request(&street(12, true)).unwrap();
        assert_eq!(request.num_points, 12);
        assert_eq!(request.start_point, GeoPoint::new(77.0512, 28.5921));
    }

    #[test]
    fn test_light_request_skips_unlit_or_unmapped_streets() {
        assert!(light_request(&street(0, true)).is_none());
        assert!(light_request(&street(5, false)).is_none());
    }

    #[test]
    fn test_street_path_runs_between_endpoints() {
        let path = street_path(&street(4, true));
        assert_eq!(path.len(), PATH_SAMPLES);
        assert_eq!(path.first(), Some(&GeoPoint::new(77.0512, 28.5921)));
        assert_eq!(path.last(), Some(&GeoPoint::new(77.0634, 28.6010)));
        assert!(street_path(&street(4, false)).is_empty());
    }

    #[test]
    fn test_sidebar_states_differ() {
        assert_ne!(Sidebar::Open, Sidebar::Closed);
    }
}
