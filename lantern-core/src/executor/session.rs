use std::collections::VecDeque;
use std::sync::Arc;

use lantern_sheet::{ChoiceOption, SceneRef, ScriptRow};
use crate::event::UiEffect;
use crate::executor::walk::NextAction;
use crate::port::LoadTicket;

/// State of one walk over a `(scene, branch)` row group.
///
/// `generation` doubles as the cancellation flag: a session is live only while its
/// generation is the controller's current one.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) generation: u64,
    pub(crate) scene: i32,
    pub(crate) branch: i32,
    pub(crate) cursor: usize,
    pub(crate) rows: Option<Arc<[ScriptRow]>>,
    pub(crate) pending: VecDeque<UiEffect>,
    pub(crate) next: Option<NextAction>,
    pub(crate) waiting_on: Option<LoadTicket>,
    pub(crate) choices: Vec<ChoiceOption>,
}

impl Session {
    pub(crate) fn new(generation: u64, scene: i32, branch: i32) -> Self {
        Self {
            generation,
            scene,
            branch,
            cursor: 0,
            rows: None,
            pending: VecDeque::new(),
            next: None,
            waiting_on: None,
            choices: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scene_ref(&self) -> SceneRef {
        SceneRef::new(self.scene, self.branch)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&ScriptRow> {
        self.rows.as_ref().and_then(|rows| rows.get(self.cursor))
    }

    /// The asset load this session is suspended on, if any.
    pub fn waiting_on(&self) -> Option<LoadTicket> {
        self.waiting_on
    }
}
