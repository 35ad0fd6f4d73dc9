use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "volcano-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_volcano-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    for key in ["smoke", "stress", "rebinding", "clamp-policy"] {
        assert!(content.contains(key), "missing {key}");
    }
}

#[test]
fn cli_stress_run_writes_json_report() {
    let exe = env!("CARGO_BIN_EXE_volcano-tester");
    let output_path = temp_path("stress");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "stress,rebinding",
            "--seeds",
            "1,-9",
            "--stress-count",
            "200",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Volcano Viewer Tester"));

    let content = std::fs::read_to_string(output_path).expect("read output");
    let report: serde_json::Value = serde_json::from_str(&content).expect("json report");
    assert_eq!(report["failed"], 0);
    assert_eq!(report["passed"], 4);
}

#[test]
fn cli_rejects_malformed_seeds() {
    let exe = env!("CARGO_BIN_EXE_volcano-tester");
    let output = Command::new(exe)
        .args(["--seeds", "ash"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}
