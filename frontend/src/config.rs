use seed::prelude::web_sys;
use shared::DashboardConfig;
use shared::tiles::{API_KEY_VAR, API_URL_VAR, STYLE_URL_VAR, TILES_URL_VAR};

/// Configuration baked in by the build (`STREETSMART_*` variables).
pub fn dashboard_config() -> DashboardConfig {
    let config = DashboardConfig::from_lookup(|var| build_var(var).map(str::to_string));
    if config.api_key.is_none() {
        web_sys::console::warn_1(
            &format!("[frontend] {API_KEY_VAR} missing at build time, map tiles will fail to authenticate").into(),
        );
    }
    config
}

fn build_var(var: &str) -> Option<&'static str> {
    match var {
        API_URL_VAR => option_env!("STREETSMART_API_URL"),
        TILES_URL_VAR => option_env!("STREETSMART_TILES_URL"),
        STYLE_URL_VAR => option_env!("STREETSMART_STYLE_URL"),
        API_KEY_VAR => option_env!("STREETSMART_TILES_API_KEY"),
        _ => None,
    }
}
