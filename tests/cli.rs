use assert_cmd::Command;
use predicates::str::contains;
use std::path::PathBuf;

fn cmd() -> Command {
    Command::cargo_bin("ccqra").unwrap()
}

fn sample_document(name: &str, content: &[u8]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn text_mode_without_file_reports_missing_document() {
    cmd()
        .args(["--text", "--analysis-delay", "10ms"])
        .assert()
        .failure()
        .stderr(contains("Please upload a carbon project document"));
}

#[test]
fn json_mode_without_file_reports_missing_document() {
    cmd()
        .args(["--json", "--analysis-delay", "10ms"])
        .assert()
        .failure()
        .stderr(contains("Please upload a carbon project document"));
}

#[test]
fn json_mode_prints_the_fixed_report() {
    let (_dir, path) = sample_document("pdd.pdf", b"%PDF-1.4 mock");
    cmd()
        .args(["--json", "--analysis-delay", "10ms", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("\"score\": 72"))
        .stdout(contains("Baseline Inflation Risk"))
        .stdout(contains("\"file_name\": \"pdd.pdf\""));
}

#[test]
fn non_pdf_content_is_accepted_and_yields_the_same_report() {
    let (_dir, path) = sample_document("data.bin", &[0u8; 64]);
    cmd()
        .args(["--json", "--analysis-delay", "10ms", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("\"score\": 72"))
        .stdout(contains("Investigate Further Before Proceeding"));
}

#[test]
fn text_mode_prints_the_summary() {
    let (_dir, path) = sample_document("pdd.pdf", b"x");
    cmd()
        .args([
            "--text",
            "--analysis-delay",
            "10ms",
            "--note",
            "pilot batch",
            "--file",
        ])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("Overall quality score: 72 / 100"))
        .stdout(contains("Targeted due diligence checklist:"))
        .stdout(contains("Note: pilot batch"))
        .stderr(contains("Analyzing"));
}

#[test]
fn silent_requires_json() {
    // Silent-mode errors go to stdout so cron mails stay single-stream.
    cmd()
        .args(["--silent", "--text"])
        .assert()
        .failure()
        .stdout(contains("--silent can only be used with --json"));
}

#[test]
fn export_json_writes_the_report_file() {
    let (_dir, path) = sample_document("pdd.pdf", b"x");
    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("report.json");
    cmd()
        .args(["--json", "--analysis-delay", "10ms", "--file"])
        .arg(&path)
        .arg("--export-json")
        .arg(&out)
        .assert()
        .success();
    let exported = std::fs::read_to_string(&out).unwrap();
    assert!(exported.contains("\"score\": 72"));
    assert!(exported.contains("Permanence Uncertainty"));
}

#[test]
fn repeated_runs_emit_identical_assessment_content() {
    let (_dir, path) = sample_document("pdd.pdf", b"x");
    let run = || {
        let out = cmd()
            .args(["--json", "--analysis-delay", "10ms", "--file"])
            .arg(&path)
            .output()
            .unwrap();
        assert!(out.status.success());
        let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
        v
    };
    let a = run();
    let b = run();
    // Run metadata (timestamp, id) differs; the assessment content may not.
    for key in ["overall", "dimensions", "risk_flags", "checklist", "advisory"] {
        assert_eq!(a[key], b[key], "field {key} drifted between runs");
    }
}
