use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct PanelConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub feed: FeedSettings,
    pub commands: CommandSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    pub base_url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_order_by")]
    pub order_by: String,
    #[serde(default)]
    pub auth: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CommandSettings {
    pub base_url: String,
    #[serde(default = "default_command_path")]
    pub path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl CommandSettings {
    /// Full URL of the command endpoint, e.g. `http://robot.local/robot-command`.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_collection() -> String {
    "robot_data".to_string()
}

fn default_order_by() -> String {
    "timestamp".to_string()
}

fn default_command_path() -> String {
    "/robot-command".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Load `config/panel.toml` (optional) overlaid with `PANEL__SECTION__KEY` variables.
pub fn load_panel_config() -> anyhow::Result<PanelConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/panel").required(false))
        .add_source(
            config::Environment::with_prefix("PANEL")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
