use lantern_sheet::ChoiceOption;
use crate::error::PlaybackError;
use crate::event::{InputEvent, PlaybackEvent};
use crate::executor::{PlaybackController, PlaybackState};
use crate::port::{LoadTicket, PresentationPort};

/// Where a blocking host gets the player's decisions from.
pub trait InputSource {
    fn wait_continue(&mut self) -> InputEvent;
    fn wait_choice(&mut self, options: &[ChoiceOption]) -> InputEvent;
    /// Hosts that load assets asynchronously block here until `ticket` resolves.
    fn wait_asset(&mut self, ticket: LoadTicket) -> InputEvent {
        InputEvent::AssetLoaded { ticket }
    }
    fn on_event(&mut self, _event: &PlaybackEvent) {}
}

/// Runs a controller to the end of its script on a blocking input source.
pub struct Driver<P, I> {
    controller: PlaybackController<P>,
    input: I,
}

impl<P: PresentationPort, I: InputSource> Driver<P, I> {
    pub fn new(controller: PlaybackController<P>, input: I) -> Self {
        Self { controller, input }
    }

    pub fn controller(&self) -> &PlaybackController<P> {
        &self.controller
    }

    pub fn run(&mut self, scene: i32, branch: i32) -> Result<PlaybackState, PlaybackError> {
        self.controller.play(scene, branch)?;

        loop {
            let state = self.controller.pump();
            for ev in self.controller.drain_events() {
                self.input.on_event(&ev);
            }

            let input = match state {
                PlaybackState::AwaitingInput => self.input.wait_continue(),
                PlaybackState::AwaitingChoice => {
                    let options = self.controller.pending_choices().to_vec();
                    self.input.wait_choice(&options)
                }
                PlaybackState::AwaitingAsset => {
                    match self.controller.session().and_then(|s| s.waiting_on()) {
                        Some(ticket) => self.input.wait_asset(ticket),
                        None => break,
                    }
                }
                _ => break,
            };

            if input == InputEvent::Exit {
                log::info!("Exit requested");
                self.controller.cancel_current();
                break;
            }
            if let Err(e) = self.controller.feed(input) {
                match e {
                    PlaybackError::SourceUnavailable(_) => log::error!("{}", e),
                    _ => log::warn!("{}", e),
                }
            }
        }

        for ev in self.controller.drain_events() {
            self.input.on_event(&ev);
        }
        Ok(self.controller.state())
    }
}
