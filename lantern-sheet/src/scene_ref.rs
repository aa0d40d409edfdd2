use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::SheetError;

static SCENE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+)(?:\.(-?\d+))?\s*$").expect("valid regex"));

/// Address of a playable row group, written `scene` or `scene.branch` (e.g. `2.1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneRef {
    pub scene: i32,
    pub branch: i32,
}

impl SceneRef {
    pub fn new(scene: i32, branch: i32) -> Self {
        Self { scene, branch }
    }
}

impl FromStr for SceneRef {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SheetError::InvalidSceneRef(s.to_string());
        let caps = SCENE_REF.captures(s).ok_or_else(invalid)?;
        let scene = caps[1].parse().map_err(|_| invalid())?;
        let branch = match caps.get(2) {
            Some(m) => m.as_str().parse().map_err(|_| invalid())?,
            None => 0,
        };
        Ok(SceneRef { scene, branch })
    }
}

impl fmt::Display for SceneRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.scene, self.branch)
    }
}
