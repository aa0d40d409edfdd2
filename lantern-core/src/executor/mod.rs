mod session;
mod walk;

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, info, warn};

use lantern_sheet::{ChoiceOption, SceneRef};
use crate::error::{BranchNotFound, PlaybackError};
use crate::event::{InputEvent, PlaybackEvent, UiEffect};
use crate::port::{AssetError, AssetLoad, LoadTicket, PresentationPort};
use crate::source::SourceProvider;
use crate::store::ScriptStore;

pub use session::Session;
pub use walk::{walk_row, NextAction, StepEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    AwaitingAsset,
    AwaitingInput,
    AwaitingChoice,
    Completed,
    Canceled,
}

impl PlaybackState {
    pub fn is_waiting(self) -> bool {
        matches!(
            self,
            PlaybackState::AwaitingAsset | PlaybackState::AwaitingInput | PlaybackState::AwaitingChoice
        )
    }

    pub fn is_finished(self) -> bool {
        matches!(self, PlaybackState::Idle | PlaybackState::Completed | PlaybackState::Canceled)
    }
}

/// Walks script rows and drives a [`PresentationPort`].
///
/// Work only happens inside [`pump`](Self::pump); `play`, `advance`, `choose` and
/// `complete_load` just move the state machine. At most one session is live: every
/// new session bumps the generation, and anything tagged with an older generation is
/// ignored.
pub struct PlaybackController<P> {
    port: P,
    source: Box<dyn SourceProvider>,
    store: Option<Arc<ScriptStore>>,
    session: Option<Session>,
    state: PlaybackState,
    generation: u64,
    next_ticket: u64,
    last_played: Option<SceneRef>,
    events: VecDeque<PlaybackEvent>,
}

enum Applied {
    Done,
    Suspended,
}

impl<P: PresentationPort> PlaybackController<P> {
    pub fn new(port: P, source: Box<dyn SourceProvider>) -> Self {
        Self {
            port,
            source,
            store: None,
            session: None,
            state: PlaybackState::Idle,
            generation: 0,
            next_ticket: 0,
            last_played: None,
            events: VecDeque::new(),
        }
    }

    /// Loads the store from the source unless it is already loaded.
    pub fn load(&mut self) -> Result<Arc<ScriptStore>, PlaybackError> {
        if let Some(store) = &self.store {
            return Ok(store.clone());
        }
        let rows = self.source.load_rows(false)?;
        let store = Arc::new(ScriptStore::build(rows));
        self.store = Some(store.clone());
        Ok(store)
    }

    /// Reloads bypassing caches, rebuilds the store and restarts the last played
    /// scene from its first row. On failure the current store and session are kept.
    pub fn refresh(&mut self) -> Result<(), PlaybackError> {
        info!("Force refresh requested");
        let rows = self.source.load_rows(true)?;
        self.store = Some(Arc::new(ScriptStore::build(rows)));
        self.cancel_current();
        if let Some(last) = self.last_played {
            self.begin(last.scene, last.branch);
        }
        info!("Force update completed");
        Ok(())
    }

    /// Starts `(scene, branch)` from its first row, canceling whatever was playing.
    /// Fails only when the script cannot be loaded; the old session is then kept.
    pub fn play(&mut self, scene: i32, branch: i32) -> Result<(), PlaybackError> {
        self.load()?;
        self.supersede();
        self.begin(scene, branch);
        Ok(())
    }

    /// Cancels the live session without a completion notification.
    pub fn cancel_current(&mut self) -> bool {
        let canceled = self.supersede();
        if canceled {
            self.state = PlaybackState::Canceled;
        }
        canceled
    }

    /// The player's "continue". Ignored unless waiting for input.
    pub fn advance(&mut self) -> bool {
        if self.state != PlaybackState::AwaitingInput {
            debug!("advance ignored in state {:?}", self.state);
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        session.cursor += 1;
        self.state = PlaybackState::Playing;
        true
    }

    /// Picks option `index` of the pending choice and hands off to its branch. The
    /// returned reference is the new live session, positioned at its first row.
    pub fn choose(&mut self, index: usize) -> Result<SceneRef, PlaybackError> {
        if self.state != PlaybackState::AwaitingChoice {
            return Err(PlaybackError::NoPendingChoice);
        }
        let Some(session) = self.session.as_mut() else {
            return Err(PlaybackError::NoPendingChoice);
        };
        let Some(option) = session.choices.get(index) else {
            return Err(PlaybackError::InvalidChoice { index, len: session.choices.len() });
        };

        let target = SceneRef::new(session.scene, option.target_branch);
        info!("Choice {} '{}' -> branch {}", index, option.text, target.branch);
        session.choices.clear();
        session.next = Some(NextAction::Branch(target.branch));
        self.state = PlaybackState::Playing;
        self.step();
        Ok(target)
    }

    /// Reports that an asset load finished. Only the load the live session is
    /// suspended on resumes playback; a failed load still resumes it.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<(), AssetError>) -> bool {
        if self.state != PlaybackState::AwaitingAsset {
            debug!("Load {:?} finished outside an asset wait", ticket);
            return false;
        }
        let Some(session) = self.session.as_mut().filter(|s| s.waiting_on == Some(ticket)) else {
            match &result {
                Ok(()) => debug!("Stale load {:?} ignored (live generation {})", ticket, self.generation),
                Err(e) => debug!("Stale load {:?} failed ({}), ignored", ticket, e),
            }
            return false;
        };
        if let Err(e) = &result {
            warn!("{}, continuing without it", e);
        }
        session.waiting_on = None;
        self.state = PlaybackState::Playing;
        true
    }

    pub fn feed(&mut self, ev: InputEvent) -> Result<(), PlaybackError> {
        match ev {
            InputEvent::Continue => {
                self.advance();
            }
            InputEvent::ChoiceMade { index } => {
                self.choose(index)?;
            }
            InputEvent::Jump { scene, branch } => self.play(scene, branch)?,
            InputEvent::AssetLoaded { ticket } => {
                self.complete_load(ticket, Ok(()));
            }
            InputEvent::Refresh => self.refresh()?,
            InputEvent::Exit => {
                self.cancel_current();
            }
        }
        Ok(())
    }

    /// Runs the live session until it suspends or ends.
    pub fn pump(&mut self) -> PlaybackState {
        while self.state == PlaybackState::Playing {
            self.step();
        }
        self.state
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn store(&self) -> Option<&Arc<ScriptStore>> {
        self.store.as_ref()
    }

    pub fn pending_choices(&self) -> &[ChoiceOption] {
        self.session.as_ref().map(|s| s.choices.as_slice()).unwrap_or(&[])
    }

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.events.drain(..).collect()
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    fn begin(&mut self, scene: i32, branch: i32) {
        self.generation += 1;
        info!("Play scene {} branch {} (session {})", scene, branch, self.generation);
        self.session = Some(Session::new(self.generation, scene, branch));
        self.last_played = Some(SceneRef::new(scene, branch));
        self.state = PlaybackState::Playing;
    }

    /// Drops the live session, if any. Bumping the generation strands its tickets.
    fn supersede(&mut self) -> bool {
        let Some(old) = self.session.take() else {
            return false;
        };
        self.generation += 1;
        debug!(
            "Session {} (scene {} branch {}) canceled at row {}",
            old.generation, old.scene, old.branch, old.cursor
        );
        self.events.push_back(PlaybackEvent::Canceled { scene: old.scene, branch: old.branch });
        true
    }

    fn finish(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Scene {} branch {} complete", session.scene, session.branch);
            self.events.push_back(PlaybackEvent::RowChanged(None));
            self.events.push_back(PlaybackEvent::SceneComplete {
                scene: session.scene,
                branch: session.branch,
            });
        }
        self.state = PlaybackState::Completed;
    }

    /// One unit of work: resolve the branch, apply one effect, act on one control
    /// decision, or enter the row under the cursor.
    fn step(&mut self) {
        let Some(session) = self.session.as_mut() else {
            self.state = PlaybackState::Idle;
            return;
        };

        if session.rows.is_none() {
            let found = match &self.store {
                Some(store) => store.lookup(session.scene, session.branch),
                None => Err(BranchNotFound { scene: session.scene, branch: session.branch }),
            };
            match found {
                Ok(rows) => session.rows = Some(rows),
                Err(e) => {
                    warn!("{}, treating as scene completion", e);
                    self.finish();
                }
            }
            return;
        }
        let Some(rows) = session.rows.clone() else {
            return;
        };

        if let Some(effect) = session.pending.pop_front() {
            let ticket = LoadTicket { generation: session.generation, id: self.next_ticket };
            self.next_ticket += 1;
            if let Applied::Suspended = apply_effect(&mut self.port, effect, ticket) {
                session.waiting_on = Some(ticket);
                self.state = PlaybackState::AwaitingAsset;
            }
            return;
        }

        if let Some(next) = session.next.take() {
            match next {
                NextAction::Continue => session.cursor += 1,
                NextAction::WaitInput => {
                    self.port.await_advance_input();
                    self.state = PlaybackState::AwaitingInput;
                }
                NextAction::WaitChoice(options) => {
                    session.choices = options;
                    self.state = PlaybackState::AwaitingChoice;
                }
                NextAction::Branch(target) => {
                    let (scene, from) = (session.scene, session.branch);
                    self.events.push_back(PlaybackEvent::Branched { scene, from, to: target });
                    self.begin(scene, target);
                }
                NextAction::Stop => self.finish(),
            }
            return;
        }

        let Some(row) = rows.get(session.cursor) else {
            self.finish();
            return;
        };
        self.events.push_back(PlaybackEvent::RowChanged(Some(row.clone())));
        let StepEffect { effects, next } = walk_row(row);
        session.pending = effects.into();
        session.next = Some(next);
    }
}

fn apply_effect<P: PresentationPort>(port: &mut P, effect: UiEffect, ticket: LoadTicket) -> Applied {
    let (kind, key, wait, load) = match effect {
        UiEffect::SetBackground { key } => {
            let load = port.set_background(&key, ticket);
            ("background", key, true, load)
        }
        UiEffect::SetCg { key } => {
            let load = port.set_cg(&key, ticket);
            ("cg", key, true, load)
        }
        UiEffect::SetPortrait { side, key, wait } => {
            let load = port.set_portrait(side, &key, ticket);
            ("portrait", key, wait, load)
        }
        UiEffect::ClearPortraits => {
            port.clear_portraits();
            return Applied::Done;
        }
        UiEffect::SetDialogueText { speaker, line } => {
            port.set_dialogue_text(&speaker, &line);
            return Applied::Done;
        }
        UiEffect::Highlight(target) => {
            port.highlight(target);
            return Applied::Done;
        }
        UiEffect::Dehighlight(target) => {
            port.dehighlight(target);
            return Applied::Done;
        }
        UiEffect::PresentChoice { options } => {
            port.present_choice(&options);
            return Applied::Done;
        }
    };

    match load {
        Ok(AssetLoad::Pending) if wait => Applied::Suspended,
        Ok(AssetLoad::Pending) => {
            debug!("{} '{}' loading in background ({:?})", kind, key, ticket);
            Applied::Done
        }
        Ok(AssetLoad::Ready) => Applied::Done,
        Err(e) => {
            warn!("{}, showing placeholder", e);
            Applied::Done
        }
    }
}
