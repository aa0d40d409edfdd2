use lantern_sheet::{ChoiceOption, Command, Highlight, LoadMode, ScriptRow, Side};
use crate::event::UiEffect;

#[derive(Debug, Clone, PartialEq)]
pub struct StepEffect {
    pub effects: Vec<UiEffect>,
    pub next: NextAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NextAction {
    Continue,
    WaitInput,
    WaitChoice(Vec<ChoiceOption>),
    Branch(i32),
    Stop,
}

/// Translates one row into presentation effects and a control decision.
///
/// Background and CG always come first, on every visit, whatever the command.
pub fn walk_row(row: &ScriptRow) -> StepEffect {
    log::trace!("walk_row: {:?}", row);
    let mut effects = Vec::new();

    if let Some(key) = row.background.as_deref().filter(|k| !k.is_empty()) {
        effects.push(UiEffect::SetBackground { key: key.to_string() });
    }
    if let Some(key) = row.cg.as_deref().filter(|k| !k.is_empty()) {
        effects.push(UiEffect::SetCg { key: key.to_string() });
    }

    let next = match &row.command {
        Command::Say => say(row, &mut effects),
        Command::SetCharacter => {
            if row.side == Side::None {
                log::warn!(
                    "SetCharacter '{}' in scene {} has no side, portrait skipped",
                    row.character_key, row.scene_id
                );
            } else {
                effects.push(UiEffect::SetPortrait {
                    side: row.side,
                    key: row.character_key.clone(),
                    wait: row.load_mode == LoadMode::Wait,
                });
            }
            match row.load_mode {
                LoadMode::NoWait => NextAction::Continue,
                // 带台词的 Wait 行等立绘就绪后按 Say 处理
                LoadMode::Wait if row.has_dialogue() => say(row, &mut effects),
                LoadMode::Wait => NextAction::Continue,
            }
        }
        Command::CleanCharacter => {
            effects.push(UiEffect::ClearPortraits);
            NextAction::Continue
        }
        Command::SetOption => {
            if row.options.is_empty() {
                log::error!(
                    "SetOption in scene {} branch {} has no options, stopping",
                    row.scene_id, row.branch_id
                );
                NextAction::Stop
            } else {
                effects.push(UiEffect::PresentChoice { options: row.options.clone() });
                NextAction::WaitChoice(row.options.clone())
            }
        }
        Command::Unknown(name) => {
            log::warn!("UnknownCommand: {}", name);
            NextAction::Continue
        }
    };

    StepEffect { effects, next }
}

fn say(row: &ScriptRow, effects: &mut Vec<UiEffect>) -> NextAction {
    effects.push(UiEffect::SetDialogueText {
        speaker: row.speaker.clone(),
        line: row.line.clone(),
    });
    match row.highlight {
        Highlight::Left => {
            effects.push(UiEffect::Highlight(Highlight::Left));
            effects.push(UiEffect::Dehighlight(Highlight::Right));
        }
        Highlight::Right => {
            effects.push(UiEffect::Highlight(Highlight::Right));
            effects.push(UiEffect::Dehighlight(Highlight::Left));
        }
        Highlight::None => effects.push(UiEffect::Dehighlight(Highlight::All)),
        Highlight::All => effects.push(UiEffect::Highlight(Highlight::All)),
    }
    NextAction::WaitInput
}
