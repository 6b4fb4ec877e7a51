mod api;
mod charts;
mod config;
mod map_bridge;
mod page;

use seed::{prelude::*, *};
use shared::DashboardConfig;
use wasm_bindgen::prelude::wasm_bindgen;

/// Street shown when a URL does not name one.
const DEFAULT_STREET_ID: u32 = 3;

#[derive(Clone, Copy, PartialEq, Debug)]
enum Route {
    Home,
    Map(u32),
    Dashboard(u32),
    NotFound,
}

impl Route {
    fn parse(path: &[String]) -> Self {
        let parts: Vec<&str> = path
            .iter()
            .map(String::as_str)
            .filter(|part| !part.is_empty())
            .collect();
        let street_id = |raw: &str| raw.parse::<u32>().ok();

        match parts.as_slice() {
            [] => Self::Home,
            ["map"] => Self::Map(DEFAULT_STREET_ID),
            ["map", id] => street_id(*id).map_or(Self::NotFound, Self::Map),
            ["dashboard"] => Self::Dashboard(DEFAULT_STREET_ID),
            ["dashboard", id] => street_id(*id).map_or(Self::NotFound, Self::Dashboard),
            _ => Self::NotFound,
        }
    }
}

pub struct Model {
    config: DashboardConfig,
    page: Page,
}

enum Page {
    Home,
    Map(page::map::Model),
    Dashboard(page::dashboard::Model),
    NotFound,
}

impl Page {
    /// Replacing the page drops the previous page model, which cancels its
    /// pending timers and fetches.
    fn init(url: &Url, config: &DashboardConfig, orders: &mut impl Orders<Msg>) -> Self {
        match Route::parse(url.path()) {
            Route::Home => Self::Home,
            Route::Map(street_id) => Self::Map(page::map::init(
                config,
                street_id,
                &mut orders.proxy(Msg::Map),
            )),
            Route::Dashboard(street_id) => Self::Dashboard(page::dashboard::init(
                config,
                street_id,
                &mut orders.proxy(Msg::Dashboard),
            )),
            Route::NotFound => Self::NotFound,
        }
    }
}

pub enum Msg {
    UrlChanged(subs::UrlChanged),
    Map(page::map::Msg),
    Dashboard(page::dashboard::Msg),
}

fn init(url: Url, orders: &mut impl Orders<Msg>) -> Model {
    orders.subscribe(Msg::UrlChanged);
    let config = config::dashboard_config();
    let page = Page::init(&url, &config, orders);
    Model { config, page }
}

fn update(msg: Msg, model: &mut Model, orders: &mut impl Orders<Msg>) {
    match msg {
        Msg::UrlChanged(subs::UrlChanged(url)) => {
            model.page = Page::init(&url, &model.config, orders);
        }
        Msg::Map(msg) => {
            if let Page::Map(page_model) = &mut model.page {
                page::map::update(msg, page_model, &mut orders.proxy(Msg::Map));
            }
        }
        Msg::Dashboard(msg) => {
            if let Page::Dashboard(page_model) = &mut model.page {
                page::dashboard::update(msg, page_model, &mut orders.proxy(Msg::Dashboard));
            }
        }
    }
}

fn view(model: &Model) -> Node<Msg> {
    div![
        C!["App"],
        view_header(),
        match &model.page {
            Page::Home => page::home::view(),
            Page::Map(page_model) => page::map::view(page_model).map_msg(Msg::Map),
            Page::Dashboard(page_model) => {
                page::dashboard::view(page_model).map_msg(Msg::Dashboard)
            }
            Page::NotFound => div![C!["not-found"], h2!["Page not found"]],
        },
        view_footer(),
    ]
}

fn view_header() -> Node<Msg> {
    header![
        C!["header"],
        div![C!["app-name"], a![attrs! { At::Href => "/" }, "StreetSmart"]],
        nav![ul![
            C!["nav-list"],
            li![a![attrs! { At::Href => "/map" }, "Map"]],
            li![a![attrs! { At::Href => "/dashboard" }, "Dashboard"]],
        ]],
    ]
}

fn view_footer() -> Node<Msg> {
    footer![p!["© dwarkaMCD.com"]]
}

pub(crate) fn view_loading<Ms: 'static>() -> Node<Ms> {
    div![
        C!["loading-container"],
        div![C!["spinner"]],
        p!["Awesomeness Loading..."],
    ]
}

#[wasm_bindgen(start)]
pub fn start() {
    App::start("app", init, update, view);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &[&str]) -> Route {
        let path: Vec<String> = path.iter().map(|part| part.to_string()).collect();
        Route::parse(&path)
    }

    #[test]
    fn test_route_home() {
        assert_eq!(route(&[]), Route::Home);
        assert_eq!(route(&[""]), Route::Home);
    }

    #[test]
    fn test_route_defaults_to_managed_street() {
        assert_eq!(route(&["map"]), Route::Map(DEFAULT_STREET_ID));
        assert_eq!(route(&["dashboard"]), Route::Dashboard(DEFAULT_STREET_ID));
    }

    #[test]
    fn test_route_with_street_id() {
        assert_eq!(route(&["map", "7"]), Route::Map(7));
        assert_eq!(route(&["dashboard", "12"]), Route::Dashboard(12));
    }

    #[test]
    fn test_route_rejects_unknown_paths() {
        assert_eq!(route(&["dashboard", "main-road"]), Route::NotFound);
        assert_eq!(route(&["settings"]), Route::NotFound);
        assert_eq!(route(&["map", "3", "extra"]), Route::NotFound);
    }
}
