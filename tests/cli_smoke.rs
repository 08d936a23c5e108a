use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn bin() -> String {
    // Cargo sets this for bin targets in integration tests
    env!("CARGO_BIN_EXE_qmetrics").to_string()
}

/// Run with `HOME` pointed at `home` so no user config is picked up.
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(bin())
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run")
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).expect("report written")).expect("valid JSON")
}

#[test]
fn tutorial_writes_report() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("tutorial.json");
    let output = run(dir.path(), &["tutorial", "--json", out.to_str().unwrap()]);
    assert_ok(&output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("diamond norm"));

    let v = json(&out);
    assert!((v["pure_states"]["fidelity"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    assert!((v["total_variation_distance"].as_f64().unwrap() - 0.5).abs() < 1e-12);
    let rx = v["diamond_identity_vs_rx"]["diamond_norm_distance"].as_f64().unwrap();
    assert!((rx - 2.0 * 0.2_f64.sin()).abs() < 1e-6, "{rx}");
    let x = v["diamond_identity_vs_x"]["diamond_norm_distance"].as_f64().unwrap();
    assert!((x - 2.0).abs() < 1e-6, "{x}");
}

#[test]
fn tutorial_accepts_negative_theta() {
    let dir = tempfile::tempdir().unwrap();
    assert_ok(&run(dir.path(), &["tutorial", "--theta", "-0.4"]));
}

#[test]
fn states_command_reads_matrices_and_distributions() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("states.json");
    let out = dir.path().join("report.json");
    fs::write(
        &input,
        r#"{
            "rho":   [[[1, 0], [0, 0]], [[0, 0], [0, 0]]],
            "sigma": [[[0.5, 0], [0.5, 0]], [[0.5, 0], [0.5, 0]]],
            "p": [0.5, 0.5],
            "q": [1.0, 0.0]
        }"#,
    )
    .unwrap();
    let output = run(
        dir.path(),
        &["states", input.to_str().unwrap(), "--renorm", "--json", out.to_str().unwrap()],
    );
    assert_ok(&output);

    let v = json(&out);
    assert_eq!(v["dim"], 2);
    assert_eq!(v["dim_renorm"], true);
    assert!((v["trace_distance"].as_f64().unwrap() - 0.5_f64.sqrt()).abs() < 1e-9);
    assert!((v["purity_rho"].as_f64().unwrap() - 1.0).abs() < 1e-12);
    assert!((v["total_variation_distance"].as_f64().unwrap() - 0.5).abs() < 1e-12);
}

#[test]
fn process_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("process.json");
    let out = dir.path().join("report.json");
    fs::write(
        &input,
        r#"{
            "r_p": [[1, 0, 0, 0], [0, 0.8, 0, 0], [0, 0, 0.8, 0], [0, 0, 0, 0.8]],
            "r_u": [[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]
        }"#,
    )
    .unwrap();
    assert_ok(&run(dir.path(), &["process", input.to_str().unwrap(), "--json", out.to_str().unwrap()]));
    let v = json(&out);
    assert!((v["process_fidelity"].as_f64().unwrap() - 0.9).abs() < 1e-12);
    assert!((v["entanglement_fidelity"].as_f64().unwrap() - 0.85).abs() < 1e-12);
}

#[test]
fn diamond_command() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("diamond.json");
    let out = dir.path().join("report.json");
    // Identity and bit flip, as Choi matrices (output ⊗ input).
    fs::write(
        &input,
        r#"{
            "choi0": [[[1,0],[0,0],[0,0],[1,0]], [[0,0],[0,0],[0,0],[0,0]],
                      [[0,0],[0,0],[0,0],[0,0]], [[1,0],[0,0],[0,0],[1,0]]],
            "choi1": [[[0,0],[0,0],[0,0],[0,0]], [[0,0],[1,0],[1,0],[0,0]],
                      [[0,0],[1,0],[1,0],[0,0]], [[0,0],[0,0],[0,0],[0,0]]]
        }"#,
    )
    .unwrap();
    assert_ok(&run(dir.path(), &["diamond", input.to_str().unwrap(), "--json", out.to_str().unwrap()]));
    let v = json(&out);
    assert!((v["diamond_norm_distance"].as_f64().unwrap() - 2.0).abs() < 1e-6);
    assert!(v["watrous_bounds"]["lower"].as_f64().unwrap() <= v["watrous_bounds"]["upper"].as_f64().unwrap());
}

#[test]
fn config_command_honours_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("qm.toml");
    fs::write(&cfg, "[solver]\nmax_iterations = 77\n").unwrap();
    let output = run(dir.path(), &["--config", cfg.to_str().unwrap(), "config"]);
    assert_ok(&output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("max_iterations = 77"), "{stdout}");
}

#[test]
fn invalid_input_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.json");
    fs::write(
        &input,
        r#"{ "rho": [[[0.5, 0], [0, 0]], [[0, 0], [0, 0]]], "sigma": [[[1, 0], [0, 0]], [[0, 0], [0, 0]]] }"#,
    )
    .unwrap();
    let output = run(dir.path(), &["states", input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("trace"), "{stderr}");

    let missing = dir.path().join("nope.toml");
    let output = run(dir.path(), &["--config", missing.to_str().unwrap(), "config"]);
    assert!(!output.status.success());
}
