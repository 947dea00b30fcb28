pub(crate) use common::config::{ConfigStore, Validate};
use common::games::tictactoe::{BotType, CELL_COUNT, DEFAULT_DEPTH_LIMIT};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "tictactoe_client_config.yaml";

const MAX_DELAY_MS: u64 = 10_000;
const MAX_EVENT_HISTORY: usize = 1024;

pub fn config_store(file_path: &str) -> ConfigStore<Config> {
    ConfigStore::yaml_file(file_path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: GameConfig,
    pub display: DisplayConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        self.display.validate()?;
        Ok(())
    }
}

/// Who plays X. Anything but `Human` turns the client into a self-play demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum XPlayerMode {
    Human,
    Random,
    Minimax,
}

impl XPlayerMode {
    pub fn bot_type(self) -> Option<BotType> {
        match self {
            XPlayerMode::Human => None,
            XPlayerMode::Random => Some(BotType::Random),
            XPlayerMode::Minimax => Some(BotType::Minimax),
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    pub depth_limit: u32,
    pub build_tree: bool,
    pub ai_trigger_delay_ms: u64,
    pub thinking_delay_ms: u64,
    pub x_player: XPlayerMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            build_tree: true,
            ai_trigger_delay_ms: 100,
            thinking_delay_ms: 500,
            x_player: XPlayerMode::Human,
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.depth_limit == 0 {
            return Err("depth_limit must be at least 1".to_string());
        }
        if self.depth_limit > CELL_COUNT as u32 {
            return Err(format!("depth_limit must not exceed {}", CELL_COUNT));
        }
        if self.ai_trigger_delay_ms > MAX_DELAY_MS {
            return Err(format!("ai_trigger_delay_ms must not exceed {}", MAX_DELAY_MS));
        }
        if self.thinking_delay_ms > MAX_DELAY_MS {
            return Err(format!("thinking_delay_ms must not exceed {}", MAX_DELAY_MS));
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    pub show_tree: bool,
    /// Tree levels shown expanded below the root.
    pub tree_display_levels: u32,
    pub event_history_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_tree: true,
            tree_display_levels: 2,
            event_history_size: 32,
        }
    }
}

impl Validate for DisplayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.tree_display_levels > CELL_COUNT as u32 {
            return Err(format!("tree_display_levels must not exceed {}", CELL_COUNT));
        }
        if self.event_history_size == 0 {
            return Err("event_history_size must be greater than 0".to_string());
        }
        if self.event_history_size > MAX_EVENT_HISTORY {
            return Err(format!("event_history_size must not exceed {}", MAX_EVENT_HISTORY));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::config::{ConfigFormat, MemorySource, YamlFormat};

    fn get_temp_file_path() -> String {
        use std::env;
        let mut path = env::temp_dir();
        let random_number: u32 = rand::random();
        let file_name = format!("temp_tictactoe_client_config_{}.yaml", random_number);
        path.push(file_name);
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
        assert_eq!(Config::default().game.depth_limit, 2);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serialized_string = YamlFormat.render(&default_config).unwrap();
        let deserialized_config: Config = YamlFormat.parse(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_with_store() {
        let mut config = Config::default();
        config.game.depth_limit = 9;
        config.game.x_player = XPlayerMode::Random;
        config.display.show_tree = false;

        let file_path = get_temp_file_path();
        let store = config_store(&file_path);
        store.save(&config).unwrap();

        let loaded_config = store.load().unwrap();
        assert_eq!(config, loaded_config);

        let fresh_store = config_store(&file_path);
        assert_eq!(fresh_store.load().unwrap(), config);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let store = config_store("this_file_does_not_exist.yaml");
        let loaded_config = store.load().unwrap();
        assert_eq!(Config::default(), loaded_config);
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            game:
              depth_limit: 0
              build_tree: true
              ai_trigger_delay_ms: 100
              thinking_delay_ms: 500
              x_player: Human
            display:
              show_tree: true
              tree_display_levels: 2
              event_history_size: 32
        "#;

        let store: ConfigStore<Config, _, _> = ConfigStore::new(MemorySource::with_text(invalid_config_content), YamlFormat);
        let error = store.load().unwrap_err();
        assert!(error.contains("depth_limit"));
    }

    #[test]
    fn test_incomplete_config_cant_be_read() {
        let incomplete_config_content = r#"
            game:
              depth_limit: 2
            display:
              show_tree: true
        "#;
        let result: Result<Config, String> = YamlFormat.parse(incomplete_config_content);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_config_cant_be_saved() {
        let mut config = Config::default();
        config.display.event_history_size = 0;
        let file_path = get_temp_file_path();
        let store = config_store(&file_path);
        assert!(store.save(&config).is_err());
        assert!(!std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_x_player_modes_map_to_bots() {
        assert_eq!(XPlayerMode::Human.bot_type(), None);
        assert_eq!(XPlayerMode::Random.bot_type(), Some(BotType::Random));
        assert_eq!(XPlayerMode::Minimax.bot_type(), Some(BotType::Minimax));
    }
}
