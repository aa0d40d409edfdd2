use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use lantern_core::source::MemorySource;
use lantern_core::{AssetError, AssetLoad, LoadTicket, PlaybackController, PlaybackState, PresentationPort, ScriptStore};
use lantern_sheet::{ChoiceOption, Command, Highlight, ScriptRow, Side};

struct NullPort;

impl PresentationPort for NullPort {
    fn set_dialogue_text(&mut self, _speaker: &str, _line: &str) {}
    fn set_portrait(&mut self, _side: Side, _key: &str, _ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        Ok(AssetLoad::Ready)
    }
    fn clear_portraits(&mut self) {}
    fn set_background(&mut self, _key: &str, _ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        Ok(AssetLoad::Ready)
    }
    fn set_cg(&mut self, _key: &str, _ticket: LoadTicket) -> Result<AssetLoad, AssetError> {
        Ok(AssetLoad::Ready)
    }
    fn highlight(&mut self, _target: Highlight) {}
    fn dehighlight(&mut self, _target: Highlight) {}
    fn await_advance_input(&mut self) {}
    fn present_choice(&mut self, _options: &[ChoiceOption]) {}
}

fn build_rows(scenes: i32, per_branch: usize) -> Vec<ScriptRow> {
    let mut rows = Vec::new();
    for scene in 1..=scenes {
        for branch in 0..3 {
            for i in 0..per_branch {
                rows.push(ScriptRow {
                    speaker: "Narrator".into(),
                    line: format!("scene {} branch {} line {}", scene, branch, i),
                    background: (i % 10 == 0).then(|| format!("bg_{}", scene)),
                    ..ScriptRow::new(scene, branch, Command::Say)
                });
            }
        }
    }
    rows
}

fn bench_store(c: &mut Criterion) {
    let rows = build_rows(100, 30);
    c.bench_function("store_build_9k", |b| {
        b.iter(|| ScriptStore::build(black_box(rows.clone())))
    });
}

fn bench_playback(c: &mut Criterion) {
    let rows = build_rows(10, 1000);
    let mut ctl = PlaybackController::new(NullPort, Box::new(MemorySource::new(rows)));
    if ctl.load().is_err() {
        return;
    }

    c.bench_function("play_1k_rows", |b| {
        b.iter(|| {
            ctl.play(black_box(5), 1).ok();
            while ctl.pump() == PlaybackState::AwaitingInput {
                ctl.advance();
            }
            black_box(ctl.drain_events());
        })
    });
}

criterion_group!(benches, bench_store, bench_playback);
criterion_main!(benches);
