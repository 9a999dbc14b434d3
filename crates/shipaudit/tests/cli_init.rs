//! Integration tests for the `shipaudit init` command.

use assert_cmd::Command;
use assert_cmd::cargo;
use tempfile::TempDir;

fn shipaudit_cmd() -> Command {
    Command::new(cargo::cargo_bin!("shipaudit"))
}

#[test]
fn init_creates_default_config() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();

    shipaudit_cmd()
        .current_dir(dir)
        .arg("init")
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.join("shipaudit.toml")).unwrap();
    assert!(content.contains("Minimal preset"));
    assert!(content.contains("[defaults]"));
    assert!(content.contains("weight_tolerance_kg = 0.0"));
}

#[test]
fn init_strict_preset() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();

    shipaudit_cmd()
        .current_dir(dir)
        .args(["init", "--preset", "strict"])
        .assert()
        .success();

    let content = std::fs::read_to_string(dir.join("shipaudit.toml")).unwrap();
    assert!(content.contains("Strict preset"));
    assert!(content.contains("fail_on = \"issue\""));
}

#[test]
fn init_custom_output_path() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();

    shipaudit_cmd()
        .current_dir(dir)
        .args(["init", "--output", "config/audit.toml"])
        .assert()
        .success();

    assert!(dir.join("config/audit.toml").exists());
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    let path = dir.join("shipaudit.toml");
    std::fs::write(&path, "# existing\n").unwrap();

    let output = shipaudit_cmd()
        .current_dir(dir)
        .arg("init")
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# existing\n");
}

#[test]
fn init_force_overwrites() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    let path = dir.join("shipaudit.toml");
    std::fs::write(&path, "# existing\n").unwrap();

    shipaudit_cmd()
        .current_dir(dir)
        .args(["init", "--force"])
        .assert()
        .success();

    assert!(std::fs::read_to_string(&path).unwrap().contains("[defaults]"));
}

#[test]
fn generated_config_drives_audit() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    std::fs::create_dir_all(dir.join("data")).unwrap();
    std::fs::write(
        dir.join("data/sample_shipments.csv"),
        shipaudit_testkit::SAMPLE_SHIPMENTS_CSV,
    )
    .unwrap();

    shipaudit_cmd()
        .current_dir(dir)
        .args(["init", "--preset", "strict"])
        .assert()
        .success();

    shipaudit_cmd()
        .current_dir(dir)
        .env_remove("SHIPAUDIT_INPUT")
        .arg("audit")
        .assert()
        .code(2);

    assert!(dir.join("output/audited_dataset.csv").exists());
}

#[test]
fn minimal_config_drives_audit_with_a_bare_environment() {
    let td = TempDir::new().expect("temp");
    let dir = td.path();
    std::fs::create_dir_all(dir.join("data")).unwrap();
    std::fs::write(
        dir.join("data/sample_shipments.csv"),
        shipaudit_testkit::SAMPLE_SHIPMENTS_CSV,
    )
    .unwrap();

    shipaudit_cmd()
        .current_dir(dir)
        .arg("init")
        .assert()
        .success();

    let output = shipaudit_cmd()
        .current_dir(dir)
        .env_clear()
        .arg("audit")
        .output()
        .expect("run");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Issues found: 3"));
    assert!(dir.join("output/audit_report.csv").exists());
}
