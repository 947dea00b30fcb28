use serde::Serialize;
use serde::de::DeserializeOwned;

/// Text encoding of a config document.
pub trait ConfigFormat<TConfig> {
    fn render(&self, config: &TConfig) -> Result<String, String>;
    fn parse(&self, text: &str) -> Result<TConfig, String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat;

impl<TConfig> ConfigFormat<TConfig> for YamlFormat
where
    TConfig: Serialize + DeserializeOwned,
{
    fn render(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config).map_err(|e| format!("Failed to write YAML config: {}", e))
    }

    fn parse(&self, text: &str) -> Result<TConfig, String> {
        serde_yaml_ng::from_str(text).map_err(|e| format!("Failed to parse YAML config: {}", e))
    }
}
