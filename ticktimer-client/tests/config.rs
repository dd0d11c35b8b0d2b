use std::fs;

use ticktimer_client::AppError;
use ticktimer_client::config::{TimerConfig, ToneKind, init_config, load_config, save_config};

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timer.yaml");
    fs::write(
        &path,
        "alarm_enabled: false\nalarm:\n  repeats: 5\n  backend: silent\n",
    )
    .unwrap();

    let cfg = load_config(&path).unwrap();
    assert!(!cfg.alarm_enabled);
    assert_eq!(cfg.alarm.repeats, 5);
    assert_eq!(cfg.alarm.backend, ToneKind::Silent);
    assert_eq!(cfg.alarm.frequency_hz, 1000);
    assert_eq!(cfg.tick_interval_ms, 1000);
    assert!(cfg.desktop_notification);
    let labels: Vec<_> = cfg.presets.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["1 min", "5 min", "10 min", "15 min", "30 min"]);

    let pattern = cfg.alarm.pattern();
    assert_eq!(pattern.tone.as_millis(), 500);
    assert_eq!(pattern.gap.as_millis(), 300);
}

#[test]
fn custom_presets_replace_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timer.yaml");
    fs::write(
        &path,
        "presets:\n  - label: tea\n    minutes: 3\n  - label: nap\n    minutes: 20\n",
    )
    .unwrap();
    let cfg = load_config(&path).unwrap();
    assert_eq!(cfg.presets.len(), 2);
    assert_eq!(cfg.presets[0].duration().unwrap().as_secs(), 180);
}

#[test]
fn rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        "presets:\n  - label: bad\n    minutes: 75\n",
        "tick_interval_ms: 0\n",
        "alarm:\n  frequency_hz: 10\n",
        "alarm_enabled: [",
    ];
    for (i, body) in cases.iter().enumerate() {
        let path = dir.path().join(format!("bad{i}.yaml"));
        fs::write(&path, body).unwrap();
        assert!(
            matches!(load_config(&path), Err(AppError::Config(_))),
            "case {body:?}"
        );
    }
}

#[test]
fn explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");
    assert!(TimerConfig::find_and_load(Some(missing)).is_err());
}

#[test]
fn init_config_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("timer.yaml");

    let written = init_config(Some(path.clone()), false).unwrap();
    assert_eq!(written, path);
    let (_, cfg) = TimerConfig::find_and_load(Some(path.clone())).unwrap();
    assert_eq!(cfg.presets.len(), 5);

    assert!(init_config(Some(path.clone()), false).is_err());
    assert!(init_config(Some(path), true).is_ok());
}

#[test]
fn save_reports_unusable_parent_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "").unwrap();
    let path = blocker.join("timer.yaml");

    let err = save_config(&path, &TimerConfig::default()).unwrap_err();
    match err {
        AppError::Config(msg) => assert!(msg.starts_with("create "), "{msg}"),
        other => panic!("expected config error, got {other:?}"),
    }
    assert!(fs::metadata(&blocker).unwrap().is_file());
}
