use std::sync::Arc;

use log::{info, warn};
use rustc_hash::FxHashMap;

use lantern_sheet::ScriptRow;
use crate::error::BranchNotFound;

/// 剧本索引：scene → branch → 按播放顺序排列的行
///
/// Built once from a finished row list and never mutated afterwards. A forced refresh
/// builds a new store instead.
#[derive(Debug, Default)]
pub struct ScriptStore {
    scenes: FxHashMap<i32, FxHashMap<i32, Arc<[ScriptRow]>>>,
    row_count: usize,
    dropped: usize,
}

impl ScriptStore {
    /// Groups rows by scene, then branch, keeping source order inside each group.
    ///
    /// Rows with a negative scene id are dropped with a warning. A group is re-sorted
    /// only when every row in it carries an explicit `seq`.
    pub fn build(rows: impl IntoIterator<Item = ScriptRow>) -> Self {
        let mut grouped: FxHashMap<i32, FxHashMap<i32, Vec<ScriptRow>>> = FxHashMap::default();
        let mut row_count = 0;
        let mut dropped = 0;

        for row in rows {
            if row.scene_id < 0 {
                warn!(
                    "Dropping row with invalid scene id {} (branch {}, command {:?})",
                    row.scene_id, row.branch_id, row.command
                );
                dropped += 1;
                continue;
            }
            grouped
                .entry(row.scene_id)
                .or_default()
                .entry(row.branch_id)
                .or_default()
                .push(row);
            row_count += 1;
        }

        let scenes: FxHashMap<i32, FxHashMap<i32, Arc<[ScriptRow]>>> = grouped
            .into_iter()
            .map(|(scene, branches)| {
                let branches = branches
                    .into_iter()
                    .map(|(branch, mut rows)| {
                        if rows.iter().all(|r| r.seq.is_some()) {
                            // sort_by_key 是稳定排序，seq 相同的行保持原顺序
                            rows.sort_by_key(|r| r.seq);
                        }
                        let rows: Arc<[ScriptRow]> = Arc::from(rows);
                        (branch, rows)
                    })
                    .collect();
                (scene, branches)
            })
            .collect();

        info!(
            "Script store built. Scenes: {}, Rows: {}, Dropped: {}",
            scenes.len(),
            row_count,
            dropped
        );
        Self { scenes, row_count, dropped }
    }

    /// Rows of `(scene, branch)` in playback order.
    pub fn lookup(&self, scene: i32, branch: i32) -> Result<Arc<[ScriptRow]>, BranchNotFound> {
        self.scenes
            .get(&scene)
            .and_then(|branches| branches.get(&branch))
            .cloned()
            .ok_or(BranchNotFound { scene, branch })
    }

    pub fn contains(&self, scene: i32, branch: i32) -> bool {
        self.lookup(scene, branch).is_ok()
    }

    pub fn scenes(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.scenes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn branches(&self, scene: i32) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .scenes
            .get(&scene)
            .map(|b| b.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Number of rows rejected while building.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
