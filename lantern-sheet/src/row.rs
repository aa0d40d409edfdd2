//! Row schema for sheet-driven dialogue scripts.
//!
//! Every line of the source sheet becomes one [`ScriptRow`]. Rows are grouped by
//! `(scene_id, branch_id)` downstream and played in source order.

use serde::{Deserialize, Serialize};

/// One instruction line of a dialogue script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptRow {
    /// Scene (chapter) the row belongs to. Negative ids are invalid.
    pub scene_id: i32,
    /// Branch inside the scene, `0` is the main line.
    #[serde(default)]
    pub branch_id: i32,
    /// Explicit line sequence number, if the sheet carries one.
    #[serde(default)]
    pub seq: Option<u32>,
    pub command: Command,
    #[serde(default)]
    pub side: Side,
    #[serde(default)]
    pub character_key: String,
    #[serde(default)]
    pub load_mode: LoadMode,
    #[serde(default)]
    pub highlight: Highlight,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub cg: Option<String>,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub line: String,
    /// Only populated for [`Command::SetOption`].
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
}

impl ScriptRow {
    pub fn new(scene_id: i32, branch_id: i32, command: Command) -> Self {
        Self {
            scene_id,
            branch_id,
            seq: None,
            command,
            side: Side::None,
            character_key: String::new(),
            load_mode: LoadMode::Wait,
            highlight: Highlight::All,
            background: None,
            cg: None,
            speaker: String::new(),
            line: String::new(),
            options: Vec::new(),
        }
    }

    /// Whether the row carries a line of dialogue to show.
    pub fn has_dialogue(&self) -> bool {
        !self.line.is_empty()
    }
}

/// The instruction carried by a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Show the speaker and line, then wait for the player.
    Say,
    /// Put a character portrait on one side of the screen.
    SetCharacter,
    /// Fade out both portraits.
    CleanCharacter,
    /// Present the row's options and hand off to the chosen branch.
    SetOption,
    /// Anything the engine does not understand. Kept for diagnostics.
    Unknown(String),
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s.trim() {
            // 空指令的行按普通台词处理
            "" | "Say" => Command::Say,
            "SetCharacter" => Command::SetCharacter,
            "CleanCharacter" => Command::CleanCharacter,
            "SetOption" => Command::SetOption,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Portrait slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    #[default]
    None,
}

impl From<&str> for Side {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Left" => Side::Left,
            "Right" => Side::Right,
            _ => Side::None,
        }
    }
}

/// Whether playback waits for a portrait load before moving on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoadMode {
    #[default]
    Wait,
    NoWait,
}

impl From<&str> for LoadMode {
    fn from(s: &str) -> Self {
        match s.trim() {
            "NoWait" => LoadMode::NoWait,
            _ => LoadMode::Wait,
        }
    }
}

/// Which portraits are emphasised while a line is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Highlight {
    Left,
    Right,
    None,
    #[default]
    All,
}

impl From<&str> for Highlight {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Left" => Highlight::Left,
            "Right" => Highlight::Right,
            "None" => Highlight::None,
            _ => Highlight::All,
        }
    }
}

/// A selectable option of a [`Command::SetOption`] row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub text: String,
    pub target_branch: i32,
}

impl ChoiceOption {
    pub fn new(text: impl Into<String>, target_branch: i32) -> Self {
        Self { text: text.into(), target_branch }
    }
}
