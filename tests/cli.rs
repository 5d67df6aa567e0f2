use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nestbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("nestbook").unwrap();
    cmd.env("NESTBOOK_DATA_DIR", data_dir.path())
        .env_remove("NESTBOOK_PIN")
        .env_remove("NESTBOOK_HEADLESS")
        .env_remove("RUST_LOG");
    cmd
}

fn write_snapshot_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("journal.json");
    std::fs::write(
        &path,
        r#"{
            "profile": { "name": "Robin", "birthDate": "2024-01-15" },
            "diary": [
                {
                    "id": "6f1c2a3e-8b7d-4c5e-9f0a-1b2c3d4e5f60",
                    "date": "2024-02-01",
                    "title": "Bath time",
                    "content": "Loved the water"
                }
            ]
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn first_launch_then_launched() {
    let dir = TempDir::new().unwrap();

    nestbook(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("First launch:    yes"))
        .stdout(predicate::str::contains("No saved data."));

    nestbook(&dir).arg("launched").assert().success();

    nestbook(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("First launch:    no"));
}

#[test]
fn import_export_round_trip_is_obfuscated_on_disk() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot_file(&dir);

    nestbook(&dir)
        .arg("import")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Diary entries"));

    let store = dir.path().join("data").join("nestbook").join("appData.json");
    let raw = std::fs::read_to_string(store).unwrap();
    assert!(!raw.contains("Loved the water"));
    assert!(!raw.contains("Bath time"));

    nestbook(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Robin\""))
        .stdout(predicate::str::contains("Loved the water"));
}

#[test]
fn pin_gates_export() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot_file(&dir);

    nestbook(&dir).arg("import").arg(&input).assert().success();
    nestbook(&dir).args(["pin", "set", "4321"]).assert().success();

    nestbook(&dir)
        .args(["--pin", "0000", "export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect PIN"));

    nestbook(&dir)
        .args(["--pin", "4321", "export", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Robin"));

    nestbook(&dir)
        .args(["pin", "verify", "4321"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PIN is correct."));
}

#[test]
fn clear_removes_everything() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot_file(&dir);

    nestbook(&dir).arg("import").arg(&input).assert().success();
    nestbook(&dir).args(["pin", "set", "1234"]).assert().success();
    nestbook(&dir).arg("launched").assert().success();

    nestbook(&dir)
        .args(["--pin", "1234", "clear", "--yes"])
        .assert()
        .success();

    nestbook(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("PIN protection:  no"))
        .stdout(predicate::str::contains("First launch:    yes"))
        .stdout(predicate::str::contains("No saved data."));
}

#[test]
fn corrupt_store_reads_as_no_data() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot_file(&dir);
    nestbook(&dir).arg("import").arg(&input).assert().success();

    let store = dir.path().join("data").join("nestbook").join("appData.json");
    std::fs::write(&store, r#"{ "appData": "definitely not obfuscated" }"#).unwrap();

    nestbook(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved data."));

    nestbook(&dir)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No saved data"));
}

#[test]
fn headless_mode_persists_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot_file(&dir);

    nestbook(&dir)
        .env("NESTBOOK_HEADLESS", "1")
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Persistable:     no"))
        .stdout(predicate::str::contains("First launch:    no"));

    nestbook(&dir)
        .env("NESTBOOK_HEADLESS", "1")
        .arg("import")
        .arg(&input)
        .assert()
        .failure();

    assert!(!dir.path().join("data").exists());
    assert!(!dir.path().join("flags.json").exists());
}

#[test]
fn import_of_unrelated_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = write_snapshot_file(&dir);
    nestbook(&dir).arg("import").arg(&input).assert().success();

    let unrelated = dir.path().join("budget.json");
    std::fs::write(&unrelated, r#"{"accounts":[{"name":"Checking"}],"version":3}"#).unwrap();
    nestbook(&dir).arg("import").arg(&unrelated).assert().failure();

    nestbook(&dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loved the water"));
}

#[test]
fn config_init_writes_settings_file() {
    let dir = TempDir::new().unwrap();

    nestbook(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = std::fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(written.contains("\"database_name\": \"nestbook\""));
    assert!(!written.contains("obfuscation_key"));
}
