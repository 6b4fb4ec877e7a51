//! Paths of the street API, shared by the browser and native clients.

pub const INTERPOLATE_PATH: &str = "/api/interpolate-points";

pub fn interpolate_url(base_url: &str) -> String {
    format!("{}{INTERPOLATE_PATH}", base_url.trim_end_matches('/'))
}

pub fn street_basic_url(base_url: &str, street_id: u32) -> String {
    format!("{}/api/streets/{street_id}/basic", base_url.trim_end_matches('/'))
}

pub fn street_detailed_url(base_url: &str, street_id: u32) -> String {
    format!(
        "{}/api/streets/{street_id}/detailed",
        base_url.trim_end_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        assert_eq!(
            interpolate_url("http://localhost:8000/"),
            "http://localhost:8000/api/interpolate-points"
        );
        assert_eq!(
            street_basic_url("http://localhost:8000", 3),
            "http://localhost:8000/api/streets/3/basic"
        );
        assert_eq!(
            street_detailed_url("http://api//", 7),
            "http://api/api/streets/7/detailed"
        );
    }
}
