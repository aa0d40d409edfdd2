pub mod driver;

use thiserror::Error;
use lantern_sheet::{ChoiceOption, Highlight, Side};

/// Identifies one asset load requested by a playback session. Only the ticket the
/// live session is waiting on can resume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub generation: u64,
    pub id: u64,
}

/// Outcome of an asset request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetLoad {
    /// Shown immediately.
    Ready,
    /// Still loading, the host reports back through `complete_load(ticket, ..)`.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} asset '{key}' not found")]
pub struct AssetError {
    pub kind: &'static str,
    pub key: String,
}

impl AssetError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self { kind, key: key.into() }
    }
}

/// The UI the controller drives. Implementations own sprites, text boxes, tweens and
/// input widgets; the controller only decides what to show and when.
pub trait PresentationPort {
    fn set_dialogue_text(&mut self, speaker: &str, line: &str);
    fn set_portrait(&mut self, side: Side, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError>;
    fn clear_portraits(&mut self);
    fn set_background(&mut self, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError>;
    fn set_cg(&mut self, key: &str, ticket: LoadTicket) -> Result<AssetLoad, AssetError>;
    fn highlight(&mut self, target: Highlight);
    fn dehighlight(&mut self, target: Highlight);
    /// Playback is now waiting for the player's "continue".
    fn await_advance_input(&mut self);
    /// Playback is now waiting for `choose(index)`.
    fn present_choice(&mut self, options: &[ChoiceOption]);
}
