use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
struct Playback {
    start_scene: i32,
    auto_advance: bool,
}

impl Default for Playback {
    fn default() -> Self {
        Self { start_scene: 1, auto_advance: false }
    }
}

#[derive(Debug, Deserialize, Default, PartialEq)]
struct Strict {
    required: String,
}

// 全局配置只能初始化一次，所以放在同一个测试里
#[test]
fn sections_and_fallbacks() {
    let src = r#"
[playback]
start_scene = 3

[strict]
required = 42
"#;
    lantern_shared::config::init_from_str(src).unwrap();
    assert!(lantern_shared::config::is_initialized());

    let playback: Playback = lantern_shared::config::get("playback");
    assert_eq!(playback, Playback { start_scene: 3, auto_advance: false });

    let strict: Strict = lantern_shared::config::get("strict");
    assert_eq!(strict, Strict::default());

    let missing: Playback = lantern_shared::config::get("nothing");
    assert_eq!(missing, Playback::default());

    assert!(lantern_shared::config::init_from_str("").is_err());
}
