use config::{builder::DefaultState, ConfigBuilder};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://push.geckoboard.com";
pub const DEFAULT_API_VERSION: &str = "v1";

/// Settings shared by every push made through a `WidgetPusher`.
///
/// Nothing is validated when a value is set; an empty API key is reported
/// when a push is attempted.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PushConfig {
    #[serde(default)]
    api_key: String,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default = "default_base_url")]
    base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_version: None,
            base_url: default_base_url(),
        }
    }
}

impl PushConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    /// Configured version, or `"v1"` if none was set.
    pub fn api_version(&self) -> &str {
        self.api_version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    pub fn set_api_version(&mut self, api_version: impl Into<String>) {
        self.api_version = Some(api_version.into());
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.set_api_version(api_version);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.set_base_url(base_url);
        self
    }
}

/// Load push settings from `config/geckoboard.*` (optional) overlaid with
/// `GECKOBOARD_*` environment variables.
pub fn load_push_config() -> anyhow::Result<PushConfig> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/geckoboard").required(false))
        .add_source(config::Environment::with_prefix("GECKOBOARD"));

    build_push_config(builder)
}

fn build_push_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<PushConfig> {
    let settings = builder.build()?;
    let push_config: PushConfig = settings.try_deserialize()?;

    tracing::debug!(
        api_version = push_config.api_version(),
        base_url = push_config.base_url(),
        api_key_set = !push_config.api_key().is_empty(),
        "Loaded push configuration"
    );

    Ok(push_config)
}
