#![allow(dead_code)]

use std::collections::HashSet;

use lantern_core::source::MemorySource;
use lantern_core::{AssetError, AssetLoad, LoadTicket, PlaybackController, PresentationPort};
use lantern_sheet::{ChoiceOption, Command, Highlight, LoadMode, ScriptRow, Side};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text(String, String),
    Portrait(Side, String),
    ClearPortraits,
    Background(String),
    Cg(String),
    Highlight(Highlight),
    Dehighlight(Highlight),
    AwaitInput,
    Choice(Vec<String>),
}

/// Records every port call. Keys in `pending` load asynchronously, keys in `missing`
/// fail.
#[derive(Debug, Default)]
pub struct RecordingPort {
    pub calls: Vec<Call>,
    pub pending: HashSet<String>,
    pub missing: HashSet<String>,
    pub tickets: Vec<(String, LoadTicket)>,
}

impl RecordingPort {
    pub fn with_pending(keys: &[&str]) -> Self {
        Self { pending: keys.iter().map(|k| k.to_string()).collect(), ..Default::default() }
    }

    pub fn with_missing(keys: &[&str]) -> Self {
        Self { missing: keys.iter().map(|k| k.to_string()).collect(), ..Default::default() }
    }

    pub fn ticket_for(&self, key: &str) -> LoadTicket {
        self.tickets
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, t)| *t)
            .unwrap_or_else(|| panic!("no ticket issued for {}", key))
    }

    fn load(&mut self, kind: &'static str, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        if self.missing.contains(key) {
            return Err(AssetError::not_found(kind, key));
        }
        if self.pending.contains(key) {
            self.tickets.push((key.to_string(), ticket));
            return Ok(AssetLoad::Pending);
        }
        Ok(AssetLoad::Ready)
    }
}

impl PresentationPort for RecordingPort {
    fn set_dialogue_text(&mut self, speaker: &str, line: &str) {
        self.calls.push(Call::Text(speaker.into(), line.into()));
    }

    fn set_portrait(&mut self, side: Side, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        self.calls.push(Call::Portrait(side, key.into()));
        self.load("portrait", key, ticket)
    }

    fn clear_portraits(&mut self) {
        self.calls.push(Call::ClearPortraits);
    }

    fn set_background(&mut self, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        self.calls.push(Call::Background(key.into()));
        self.load("background", key, ticket)
    }

    fn set_cg(&mut self, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        self.calls.push(Call::Cg(key.into()));
        self.load("cg", key, ticket)
    }

    fn highlight(&mut self, target: Highlight) {
        self.calls.push(Call::Highlight(target));
    }

    fn dehighlight(&mut self, target: Highlight) {
        self.calls.push(Call::Dehighlight(target));
    }

    fn await_advance_input(&mut self) {
        self.calls.push(Call::AwaitInput);
    }

    fn present_choice(&mut self, options: &[ChoiceOption]) {
        self.calls.push(Call::Choice(options.iter().map(|o| o.text.clone()).collect()));
    }
}

pub fn controller(rows: Vec<ScriptRow>) -> PlaybackController<RecordingPort> {
    controller_with(RecordingPort::default(), rows)
}

pub fn controller_with(port: RecordingPort, rows: Vec<ScriptRow>) -> PlaybackController<RecordingPort> {
    PlaybackController::new(port, Box::new(MemorySource::new(rows)))
}

pub fn say(scene: i32, branch: i32, speaker: &str, line: &str) -> ScriptRow {
    ScriptRow {
        speaker: speaker.into(),
        line: line.into(),
        ..ScriptRow::new(scene, branch, Command::Say)
    }
}

pub fn set_character(scene: i32, branch: i32, side: Side, key: &str, load_mode: LoadMode) -> ScriptRow {
    ScriptRow {
        side,
        character_key: key.into(),
        load_mode,
        ..ScriptRow::new(scene, branch, Command::SetCharacter)
    }
}

pub fn set_option(scene: i32, branch: i32, options: &[(&str, i32)]) -> ScriptRow {
    ScriptRow {
        options: options.iter().map(|(t, b)| ChoiceOption::new(*t, *b)).collect(),
        ..ScriptRow::new(scene, branch, Command::SetOption)
    }
}
