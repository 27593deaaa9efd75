use std::fmt;

use relwrapped_core::{ConfigError, RelationshipConfig};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

#[derive(Debug)]
pub(crate) enum LoadError {
    NoWindow,
    Network(String),
    Status { status: u16, text: String },
    Body(String),
    Config(ConfigError),
}

impl LoadError {
    pub(crate) fn code(&self) -> &'static str {
        match self {
            LoadError::NoWindow => "no_window",
            LoadError::Network(_) => "data_network",
            LoadError::Status { .. } => "data_status",
            LoadError::Body(_) => "data_body",
            LoadError::Config(_) => "data_parse",
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NoWindow => write!(f, "no browser window"),
            LoadError::Network(message) => write!(f, "{message}"),
            LoadError::Status { status, text } if text.is_empty() => write!(f, "HTTP {status}"),
            LoadError::Status { status, text } => write!(f, "HTTP {status} {text}"),
            LoadError::Body(message) => write!(f, "{message}"),
            LoadError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for LoadError {
    fn from(err: ConfigError) -> Self {
        LoadError::Config(err)
    }
}

pub(crate) fn load_hint(path: &str) -> String {
    format!("Check browser console / network for \"{path}\"")
}

fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) async fn fetch_config(path: &str) -> Result<RelationshipConfig, LoadError> {
    let window = web_sys::window().ok_or(LoadError::NoWindow)?;
    let value = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|err| LoadError::Network(describe_js_error(&err)))?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| LoadError::Network("fetch did not return a response".to_string()))?;
    if !response.ok() {
        return Err(LoadError::Status {
            status: response.status(),
            text: response.status_text(),
        });
    }
    let body = response
        .text()
        .map_err(|err| LoadError::Body(describe_js_error(&err)))?;
    let text = JsFuture::from(body)
        .await
        .map_err(|err| LoadError::Body(describe_js_error(&err)))?
        .as_string()
        .ok_or_else(|| LoadError::Body("response body is not text".to_string()))?;
    Ok(RelationshipConfig::from_json(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn status_errors_read_like_http() {
        let err = LoadError::Status {
            status: 404,
            text: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
        assert_eq!(err.code(), "data_status");
        let bare = LoadError::Status {
            status: 500,
            text: String::new(),
        };
        assert_eq!(bare.to_string(), "HTTP 500");
    }

    #[wasm_bindgen_test]
    fn config_errors_keep_their_source() {
        let err = LoadError::from(ConfigError::Empty);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.code(), "data_parse");
    }

    #[wasm_bindgen_test(async)]
    async fn missing_file_reports_status() {
        let err = fetch_config("/__relwrapped_missing__.json")
            .await
            .expect_err("no such file");
        assert!(matches!(
            err,
            LoadError::Status { .. } | LoadError::Network(_)
        ));
    }
}
