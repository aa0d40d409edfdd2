use lantern_sheet::{ChoiceOption, Highlight, ScriptRow, Side};
use crate::port::LoadTicket;

/// A presentation change requested by a row. Applied to the
/// [`PresentationPort`](crate::port::PresentationPort) in order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEffect {
    SetBackground { key: String },
    SetCg { key: String },
    SetPortrait { side: Side, key: String, wait: bool },
    ClearPortraits,
    SetDialogueText { speaker: String, line: String },
    Highlight(Highlight),
    Dehighlight(Highlight),
    PresentChoice { options: Vec<ChoiceOption> },
}

/// Notifications published by the controller, drained by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// The visible row changed. `None` marks the end of the script.
    RowChanged(Option<ScriptRow>),
    SceneComplete { scene: i32, branch: i32 },
    Branched { scene: i32, from: i32, to: i32 },
    Canceled { scene: i32, branch: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Continue,
    ChoiceMade { index: usize },
    Jump { scene: i32, branch: i32 },
    AssetLoaded { ticket: LoadTicket },
    Refresh,
    Exit,
}
