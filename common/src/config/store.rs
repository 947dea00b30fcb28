use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::sync::Mutex;

use super::{ConfigFormat, ConfigSource, FileSource, Validate, YamlFormat};

/// Validated, cached access to one config document.
///
/// Nothing stored yet means `TConfig::default()`; that default is not cached,
/// so the first `save` still reaches the source.
pub struct ConfigStore<TConfig, TSource = FileSource, TFormat = YamlFormat> {
    source: TSource,
    format: TFormat,
    cache: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigStore<TConfig>
where
    TConfig: Clone + Default + Validate + Serialize + DeserializeOwned,
{
    pub fn yaml_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(path), YamlFormat)
    }
}

impl<TConfig, TSource, TFormat> ConfigStore<TConfig, TSource, TFormat>
where
    TConfig: Clone + Default + Validate,
    TSource: ConfigSource,
    TFormat: ConfigFormat<TConfig>,
{
    pub fn new(source: TSource, format: TFormat) -> Self {
        Self {
            source,
            format,
            cache: Mutex::new(None),
        }
    }

    pub fn load(&self) -> Result<TConfig, String> {
        let mut cache = self.cache.lock().map_err(|_| "Config cache poisoned".to_string())?;
        if let Some(config) = cache.as_ref() {
            return Ok(config.clone());
        }

        let Some(text) = self.source.read()? else {
            return Ok(TConfig::default());
        };
        let config = self.format.parse(&text)?;
        config.validate().map_err(|e| format!("Invalid config: {}", e))?;

        *cache = Some(config.clone());
        Ok(config)
    }

    pub fn save(&self, config: &TConfig) -> Result<(), String> {
        config.validate().map_err(|e| format!("Invalid config: {}", e))?;
        let text = self.format.render(config)?;
        self.source.write(&text)?;

        let mut cache = self.cache.lock().map_err(|_| "Config cache poisoned".to_string())?;
        *cache = Some(config.clone());
        Ok(())
    }
}
