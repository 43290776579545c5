//! URL state encoding/decoding for shareable URLs.
//!
//! Encodes morph progress and rotation in the URL query string so reloading
//! restores the view and URLs can be shared.

/// Parsed URL parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UrlParams {
    pub progress: Option<f64>,
    pub yaw: Option<f64>,
    pub pitch: Option<f64>,
}

impl UrlParams {
    pub fn is_empty(&self) -> bool {
        self.progress.is_none() && self.yaw.is_none() && self.pitch.is_none()
    }
}

/// Parses a query string such as `?p=50&yaw=10&pitch=-20`.
///
/// Unknown keys and unparseable or non-finite values are ignored.
pub fn parse_query(search: &str) -> UrlParams {
    let mut params = UrlParams::default();

    let query = search.trim_start_matches('?');
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = value.parse::<f64>().ok().filter(|v| v.is_finite());
        match key {
            "p" => params.progress = value,
            "yaw" => params.yaw = value,
            "pitch" => params.pitch = value,
            _ => {}
        }
    }

    params
}

/// Formats the query string written back to the address bar.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn format_query(progress: f64, yaw: f64, pitch: f64) -> String {
    format!("?p={:.1}&yaw={:.1}&pitch={:.1}", progress, yaw, pitch)
}

/// Parse URL query parameters from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };

    match window.location().search() {
        Ok(search) => parse_query(&search),
        Err(_) => UrlParams::default(),
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> UrlParams {
    UrlParams::default()
}

/// Push current state to the URL query string using `replaceState`.
#[cfg(target_arch = "wasm32")]
pub fn push_to_url(progress: f64, yaw: f64, pitch: f64) {
    let query = format_query(progress, yaw, pitch);

    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&query));
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_to_url(_progress: f64, _yaw: f64, _pitch: f64) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_fields() {
        let params = parse_query("?p=42.5&yaw=10&pitch=-20");
        assert_eq!(params.progress, Some(42.5));
        assert_eq!(params.yaw, Some(10.0));
        assert_eq!(params.pitch, Some(-20.0));
    }

    #[test]
    fn test_parse_skips_garbage() {
        let params = parse_query("?p=abc&yaw=NaN&foo=1&pitch");
        assert!(params.is_empty());
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_formatted_query_parses_back() {
        let params = parse_query(&format_query(100.0, 359.7, -45.25));
        assert_eq!(params.progress, Some(100.0));
        assert_eq!(params.yaw, Some(359.7));
        assert!((params.pitch.unwrap() + 45.2).abs() < 0.11);
    }
}
