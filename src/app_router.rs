use url::Url;

pub(crate) const DEFAULT_DATA_PATH: &str = "/relationship.json";
const DATA_QUERY_KEY: &str = "data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InitConfig {
    pub(crate) data_path: String,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
        }
    }
}

pub(crate) fn load_init_config() -> InitConfig {
    let href = web_sys::window().and_then(|window| window.location().href().ok());
    href.as_deref()
        .map(init_config_from_href)
        .unwrap_or_default()
}

/// `?data=<path>` replaces the data file location; anything else keeps the
/// default.
pub(crate) fn init_config_from_href(href: &str) -> InitConfig {
    let Ok(url) = Url::parse(href) else {
        return InitConfig::default();
    };
    let data_path = url
        .query_pairs()
        .find(|(key, _)| key == DATA_QUERY_KEY)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty());
    match data_path {
        Some(data_path) => InitConfig { data_path },
        None => InitConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn data_query_overrides_path() {
        let config = init_config_from_href("https://example.test/?data=%2Fdemo%2Fus.json");
        assert_eq!(config.data_path, "/demo/us.json");
    }

    #[wasm_bindgen_test]
    fn blank_or_missing_query_uses_default() {
        assert_eq!(
            init_config_from_href("https://example.test/?data=").data_path,
            DEFAULT_DATA_PATH
        );
        assert_eq!(
            init_config_from_href("https://example.test/").data_path,
            DEFAULT_DATA_PATH
        );
        assert_eq!(init_config_from_href("not a url").data_path, DEFAULT_DATA_PATH);
    }
}
