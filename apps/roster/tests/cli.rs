use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("tempdir"),
        }
    }

    fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("storage.json")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("roster").expect("roster binary");
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env_remove("APP__DATA_FILE")
            .env_remove("APP__STORAGE_KEY")
            .env_remove("APP__DEFAULT_SORT")
            .arg("--data-file")
            .arg(self.data_file());
        cmd
    }

    fn stored_names(&self) -> Vec<String> {
        stored_names(&self.data_file())
    }
}

fn stored_names(path: &Path) -> Vec<String> {
    let raw = fs::read_to_string(path).expect("storage file");
    let slots: serde_json::Value = serde_json::from_str(&raw).expect("slot json");
    let records: serde_json::Value =
        serde_json::from_str(slots["students_demo_v1"].as_str().expect("slot")).expect("records");
    records
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["name"].as_str().expect("name").to_string())
        .collect()
}

#[test]
fn list_shows_seed_records_without_writing() {
    let fx = Fixture::new();
    fx.command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dinesh").and(predicate::str::contains("Kumar")));
    assert!(!fx.data_file().exists());
}

#[test]
fn add_persists_in_sort_order() {
    let fx = Fixture::new();
    fx.command()
        .args(["sort", "age"])
        .assert()
        .success();
    fx.command()
        .args(["add", "--name", "Ravi", "--age", "19", "--email", "ravi@x.com"])
        .env("APP__DEFAULT_SORT", "age")
        .assert()
        .success()
        .stdout(predicate::str::contains("added id_"));

    assert_eq!(fx.stored_names(), ["Ravi", "Dinesh", "Kumar"]);
}

#[test]
fn invalid_input_fails_with_first_alert() {
    let fx = Fixture::new();
    fx.command()
        .args(["add", "--name", " ", "--age", "-3", "--email", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a name."))
        .stderr(predicate::str::contains("valid age").not());
    assert!(!fx.data_file().exists());
}

#[test]
fn edit_updates_only_given_fields() {
    let fx = Fixture::new();
    fx.command()
        .args(["edit", "id_seed_dinesh", "--age", "25"])
        .env("APP__DEFAULT_SORT", "age")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated id_seed_dinesh"));

    assert_eq!(fx.stored_names(), ["Kumar", "Dinesh"]);
}

#[test]
fn delete_with_yes_removes_record() {
    let fx = Fixture::new();
    fx.command()
        .args(["delete", "id_seed_kumar", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted id_seed_kumar"));

    assert_eq!(fx.stored_names(), ["Dinesh"]);
}

#[test]
fn delete_declined_on_stdin_keeps_record() {
    let fx = Fixture::new();
    fx.command()
        .args(["delete", "id_seed_kumar"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("delete cancelled"))
        .stderr(predicate::str::contains("Delete \"Kumar\" (kumar@example.com) ?"));
    assert!(!fx.data_file().exists());
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let fx = Fixture::new();
    fx.command()
        .args(["delete", "ghost", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no student with id ghost"));
    assert!(!fx.data_file().exists());
}

#[test]
fn malformed_storage_falls_back_to_seeds() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.data_file().parent().expect("parent")).expect("mkdir");
    fs::write(fx.data_file(), r#"{"students_demo_v1": "{broken"}"#).expect("write");

    fx.command()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("id_seed_dinesh").and(predicate::str::contains("id_seed_kumar")));
}

#[test]
fn html_output_escapes_markup() {
    let fx = Fixture::new();
    fx.command()
        .args(["add", "--name", "<b>Tom & Jerry</b>", "--age", "7", "--email", "tj@x.com"])
        .assert()
        .success();
    fx.command()
        .args(["list", "--search", "tom", "--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;"))
        .stdout(predicate::str::contains("<b>Tom").not());
}

#[test]
fn config_prints_effective_settings() {
    let fx = Fixture::new();
    fs::write(fx.dir.path().join("roster.toml"), "default_sort = \"email\"\n").expect("settings");
    fx.command()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("default_sort = \"email\""))
        .stdout(predicate::str::contains("storage_key = \"students_demo_v1\""));
}
