use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    pub script_path: String, // 单个 csv 文件或包含 csv 的目录
    pub cache_path:  String,
    pub log_path:    String,
    pub log_level:   String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub start_scene:  i32,
    pub start_branch: i32,
    pub auto_advance: bool,
}

/// Every section the core reads, in the layout written to `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    pub system:   SystemConfig,
    pub playback: PlaybackConfig,
}

impl CoreConfig {
    pub fn load() -> Self {
        Self {
            system: lantern_shared::config::get("system"),
            playback: lantern_shared::config::get("playback"),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            script_path: "game/".into(),
            cache_path:  "cache/dialogue.json".into(),
            log_path:    "logs/".into(),
            log_level:   "info".into(),
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            start_scene:  1,
            start_branch: 0,
            auto_advance: false,
        }
    }
}
