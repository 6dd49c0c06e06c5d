//! Process-level behaviour of the `exovet` binary

use std::process::Command;
use tempfile::TempDir;

fn exovet(dir: &TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_exovet"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_bare_run_without_dataset_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let output = exovet(&dir, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: [missing resource]"));
    assert!(stderr.contains("data/cumulative.csv"));
    assert!(!dir.path().join("models").exists());
}

#[test]
fn test_predict_without_artifact_exits_non_zero() {
    let dir = TempDir::new().unwrap();
    let output = exovet(&dir, &["predict", "--preset", "kepler-22b"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("models/kepler_model.pkl"));
}

#[test]
fn test_presets_exits_zero() {
    let dir = TempDir::new().unwrap();
    let output = exovet(&dir, &["presets"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("kepler-22b"));
    assert!(stdout.contains("false-positive"));
}
