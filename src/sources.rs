/// Base URL of the Aeris data API.
pub const DEFAULT_BASE_URL: &str = "https://api.aerisapi.com/";

pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Ensure the base URL ends with exactly one `/` so paths can be appended directly.
pub fn normalize_base_url(base: &str) -> String {
    format!("{}/", base.trim_end_matches('/'))
}
