use std::io::{stdin, stdout, Write};

use lantern_core::port::driver::InputSource;
use lantern_core::{AssetError, AssetLoad, InputEvent, LoadTicket, PlaybackEvent, PresentationPort};
use lantern_sheet::{ChoiceOption, Highlight, SceneRef, Side};

/// Prints every presentation change. Assets are names only, so loads finish at once.
#[derive(Default)]
pub struct TerminalPort;

impl PresentationPort for TerminalPort {
    fn set_dialogue_text(&mut self, speaker: &str, line: &str) {
        if speaker.is_empty() {
            println!("[Narration] {}", line);
        } else {
            println!("[Dialogue] {}: {}", speaker, line);
        }
    }

    fn set_portrait(&mut self, side: Side, key: &str, _ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        println!("[Portrait] {:?} <- {}", side, key);
        Ok(AssetLoad::Ready)
    }

    fn clear_portraits(&mut self) {
        println!("[Portrait] cleared");
    }

    fn set_background(&mut self, key: &str, _ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        println!("[Background] {}", key);
        Ok(AssetLoad::Ready)
    }

    fn set_cg(&mut self, key: &str, _ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        println!("[CG] {}", key);
        Ok(AssetLoad::Ready)
    }

    fn highlight(&mut self, target: Highlight) {
        log::debug!("highlight {:?}", target);
    }

    fn dehighlight(&mut self, target: Highlight) {
        log::debug!("dehighlight {:?}", target);
    }

    fn await_advance_input(&mut self) {}

    fn present_choice(&mut self, options: &[ChoiceOption]) {
        for (i, o) in options.iter().enumerate() {
            println!("  [{}] {}", i + 1, o.text);
        }
    }
}

/// Reads player input from stdin.
///
/// Enter continues, a number picks an option. `exit`, `:refresh` and `:jump <scene[.branch]>`
/// work at any prompt.
pub struct TerminalInput {
    auto_advance: bool,
}

impl TerminalInput {
    pub fn new(auto_advance: bool) -> Self {
        Self { auto_advance }
    }

    fn read_line(prompt: &str) -> Option<String> {
        print!("{}", prompt);
        if let Err(e) = stdout().flush() {
            log::warn!("stdout flush failed: {}", e);
        }
        let mut buf = String::new();
        match stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim().to_string()),
            Err(e) => {
                log::error!("stdin read failed: {}", e);
                None
            }
        }
    }

    fn command(line: &str) -> Option<InputEvent> {
        if line.eq_ignore_ascii_case("exit") {
            return Some(InputEvent::Exit);
        }
        if line == ":refresh" {
            return Some(InputEvent::Refresh);
        }
        if let Some(target) = line.strip_prefix(":jump") {
            return match target.parse::<SceneRef>() {
                Ok(r) => Some(InputEvent::Jump { scene: r.scene, branch: r.branch }),
                Err(e) => {
                    println!("{}", e);
                    None
                }
            };
        }
        None
    }
}

impl InputSource for TerminalInput {
    fn wait_continue(&mut self) -> InputEvent {
        if self.auto_advance {
            return InputEvent::Continue;
        }
        loop {
            let Some(line) = Self::read_line("> ") else {
                return InputEvent::Exit;
            };
            if line.is_empty() {
                return InputEvent::Continue;
            }
            if let Some(ev) = Self::command(&line) {
                return ev;
            }
            println!("invalid");
        }
    }

    fn wait_choice(&mut self, options: &[ChoiceOption]) -> InputEvent {
        loop {
            let Some(line) = Self::read_line("Select> ") else {
                return InputEvent::Exit;
            };
            if let Ok(n) = line.parse::<usize>() {
                if n >= 1 && n <= options.len() {
                    return InputEvent::ChoiceMade { index: n - 1 };
                }
            }
            if let Some(ev) = Self::command(&line) {
                return ev;
            }
            println!("invalid");
        }
    }

    fn on_event(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::SceneComplete { scene, branch } => {
                println!("--- scene {}.{} complete ---", scene, branch)
            }
            PlaybackEvent::Branched { scene, from, to } => {
                log::info!("Scene {} branched {} -> {}", scene, from, to)
            }
            _ => {}
        }
    }
}
