#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn chirp_analyze(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chirp-analyze"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch chirp-analyze")
}

#[test]
fn test_default_run_prints_both_csv_sections() {
    let output = chirp_analyze(&[]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "# waveform");
    assert_eq!(lines[1], "time_s,amplitude");
    // 2000 samples, blank line, spectrum headers, 1000 bins
    assert_eq!(lines.len(), 2 + 2000 + 1 + 2 + 1000);
    assert_eq!(lines[2003], "# spectrum");
    assert!(lines[2005 + 999].starts_with("499.5,"));
}

#[test]
fn test_json_output_reflects_flags() {
    let output = chirp_analyze(&[
        "--rate", "200", "--duration", "0.5", "--f0", "10", "--f1", "40", "--out", "json",
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["config"]["sample_rate"], 200.0);
    assert_eq!(value["metadata"]["samples"], 100);
    assert_eq!(value["metadata"]["bins"], 50);
    assert_eq!(value["spectrum"]["frequency"].as_array().unwrap().len(), 50);
}

#[test]
fn test_invalid_configuration_exits_with_two() {
    for args in [
        &["--rate", "0"][..],
        &["--rate", "-1000"][..],
        &["--duration", "0"][..],
        &["--duration", "0.0001"][..],
    ] {
        let output = chirp_analyze(args);
        assert_eq!(output.status.code(), Some(2), "args: {args:?}");
        assert!(output.stdout.is_empty(), "args: {args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid configuration"), "stderr: {stderr}");
    }
}

#[test]
fn test_config_file_is_overridden_by_flags() {
    let dir = std::env::temp_dir();
    let config_path = dir.join(format!("chirp_cli_config_{}.json", std::process::id()));
    let output_path = dir.join(format!("chirp_cli_output_{}.json", std::process::id()));
    std::fs::write(
        &config_path,
        r#"{ "sample_rate": 100.0, "duration": 1.0, "start_freq": 1.0, "end_freq": 10.0 }"#,
    )
    .unwrap();

    let output = chirp_analyze(&[
        "--config",
        config_path.to_str().unwrap(),
        "--duration",
        "0.4",
        "--output",
        output_path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(output.stdout.is_empty());

    let contents = std::fs::read_to_string(&output_path).unwrap();
    std::fs::remove_file(&config_path).unwrap();
    std::fs::remove_file(&output_path).unwrap();

    // format detected from the .json extension
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(value["config"]["sample_rate"], 100.0);
    assert_eq!(value["config"]["duration"], 0.4);
    assert_eq!(value["config"]["end_freq"], 10.0);
    assert_eq!(value["metadata"]["samples"], 40);
}

#[test]
fn test_missing_config_file_exits_with_one() {
    let output = chirp_analyze(&["--config", "/nonexistent/chirp/config.json"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_format_is_a_usage_error() {
    let output = chirp_analyze(&["--out", "yaml"]);
    assert_eq!(output.status.code(), Some(2));
}
