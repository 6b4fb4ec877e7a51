//! Runtime configuration and signing of vector-tile requests.

pub const API_URL_VAR: &str = "STREETSMART_API_URL";
pub const TILES_URL_VAR: &str = "STREETSMART_TILES_URL";
pub const STYLE_URL_VAR: &str = "STREETSMART_STYLE_URL";
pub const API_KEY_VAR: &str = "STREETSMART_TILES_API_KEY";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TILES_URL: &str = "https://api.olamaps.io/tiles";
pub const DEFAULT_STYLE_URL: &str =
    "https://api.olamaps.io/tiles/vector/v1/styles/default-light-standard/style.json";

/// Everything the dashboard needs to reach its two collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub tile_base_url: String,
    pub style_url: String,
    pub api_key: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            tile_base_url: DEFAULT_TILES_URL.to_string(),
            style_url: DEFAULT_STYLE_URL.to_string(),
            api_key: None,
        }
    }
}

impl DashboardConfig {
    /// Builds the configuration from a variable lookup (process environment,
    /// build-time `option_env!`, a test map). Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let url_or_default = |var: &str, default: &str| {
            read(var)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| {
                    tracing::warn!("{var} is not set, falling back to {default}");
                    default.to_string()
                })
        };

        let config = Self {
            api_base_url: url_or_default(API_URL_VAR, DEFAULT_API_URL),
            tile_base_url: url_or_default(TILES_URL_VAR, DEFAULT_TILES_URL),
            style_url: url_or_default(STYLE_URL_VAR, DEFAULT_STYLE_URL),
            api_key: read(API_KEY_VAR),
        };
        if config.api_key.is_none() {
            tracing::warn!("{API_KEY_VAR} is not set, map tiles will be requested unsigned");
        }
        config
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Whether `url` points at the configured tile service. The key is only
    /// meant for that host.
    pub fn serves_tiles(&self, url: &str) -> bool {
        url.strip_prefix(self.tile_base_url.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']))
    }

    pub fn tile_signer(&self) -> TileSigner {
        TileSigner {
            api_key: self.api_key.clone(),
        }
    }
}

/// Result of the map engine's request-transform hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub url: String,
    pub resource_type: Option<String>,
}

/// Appends the tile service key to every outgoing tile/style request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSigner {
    api_key: Option<String>,
}

impl TileSigner {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Without a key the URL goes out untouched and the tile service will
    /// reject it; that is logged, not raised.
    pub fn sign(&self, url: &str, resource_type: Option<&str>) -> SignedRequest {
        let resource_type = resource_type.map(str::to_string);
        let Some(key) = self.api_key.as_deref() else {
            tracing::warn!(url, "tile API key is missing, request left unsigned");
            return SignedRequest {
                url: url.to_string(),
                resource_type,
            };
        };

        let separator = if url.contains('?') { '&' } else { '?' };
        SignedRequest {
            url: format!("{url}{separator}api_key={key}"),
            resource_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` with a WARN-level subscriber and returns what it logged.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        (value, logs)
    }

    fn signer() -> TileSigner {
        TileSigner::new(Some("ABC".to_string()))
    }

    #[test]
    fn test_sign_appends_query_string() {
        let signed = signer().sign("https://tiles/x/y/z.png", None);
        assert_eq!(signed.url, "https://tiles/x/y/z.png?api_key=ABC");
    }

    #[test]
    fn test_sign_extends_existing_query_string() {
        let signed = signer().sign("https://tiles/x?foo=bar", Some("Tile"));
        assert_eq!(signed.url, "https://tiles/x?foo=bar&api_key=ABC");
        assert_eq!(signed.resource_type.as_deref(), Some("Tile"));
    }

    #[test]
    fn test_sign_without_key_leaves_url_unchanged() {
        let signer = TileSigner::new(None);
        assert!(!signer.has_key());
        let signed = signer.sign("https://tiles/x?foo=bar", Some("Style"));
        assert_eq!(signed.url, "https://tiles/x?foo=bar");
        assert_eq!(signed.resource_type.as_deref(), Some("Style"));
    }

    #[test]
    fn test_unsigned_request_is_logged() {
        let (signed, logs) =
            capture_warnings(|| TileSigner::new(None).sign("https://tiles/x/y/z.png", None));
        assert_eq!(signed.url, "https://tiles/x/y/z.png");
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("request left unsigned"), "{logs}");
        assert!(logs.contains("https://tiles/x/y/z.png"), "{logs}");
    }

    #[test]
    fn test_signed_request_logs_nothing() {
        let (_, logs) = capture_warnings(|| signer().sign("https://tiles/x/y/z.png", None));
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_config_fallbacks_are_logged() {
        let (config, logs) = capture_warnings(|| {
            DashboardConfig::from_lookup(|var| {
                (var == API_URL_VAR).then(|| "http://streets.local".to_string())
            })
        });
        assert_eq!(config.api_base_url, "http://streets.local");
        assert!(!logs.contains(API_URL_VAR), "{logs}");
        assert!(logs.contains(&format!("{TILES_URL_VAR} is not set")), "{logs}");
        assert!(logs.contains(&format!("{STYLE_URL_VAR} is not set")), "{logs}");
        assert!(logs.contains(&format!("{API_KEY_VAR} is not set")), "{logs}");
    }

    #[test]
    fn test_serves_tiles_matches_configured_host() {
        let config = DashboardConfig::default();
        assert!(config.serves_tiles(DEFAULT_STYLE_URL));
        assert!(config.serves_tiles("https://api.olamaps.io/tiles?x=1"));
        assert!(!config.serves_tiles("https://api.olamaps.io/tilesets/a.pbf"));
        assert!(!config.serves_tiles("https://evil.example/tiles/x.pbf"));
    }

    #[test]
    fn test_config_from_lookup_reads_all_variables() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (API_URL_VAR, "http://streets.local:9000/"),
            (TILES_URL_VAR, "https://tiles.example"),
            (STYLE_URL_VAR, "https://tiles.example/style.json"),
            (API_KEY_VAR, "secret"),
        ]);
        let config = DashboardConfig::from_lookup(|var| vars.get(var).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "http://streets.local:9000");
        assert_eq!(config.tile_base_url, "https://tiles.example");
        assert_eq!(config.style_url, "https://tiles.example/style.json");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert!(config.tile_signer().has_key());
    }

    #[test]
    fn test_config_falls_back_when_unset_or_blank() {
        let config = DashboardConfig::from_lookup(|var| {
            (var == API_KEY_VAR).then(|| "   ".to_string())
        });
        assert_eq!(config, DashboardConfig::default());
        assert!(!config.tile_signer().has_key());
    }
}
