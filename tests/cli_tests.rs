//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Binary with config lookup isolated from the developer's machine
fn shop_sense_bin(config_home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("shop-sense").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("SHOP_SENSE_ENDPOINT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync"))
        .stdout(predicate::str::contains("capture"))
        .stdout(predicate::str::contains("ask"))
        .stdout(predicate::str::contains("receipts"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_output() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shop-sense"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help_lists_actions() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn unknown_subcommand_fails() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .arg("frobnicate")
        .assert()
        .failure();
}

#[test]
fn config_set_and_get_round_trip() {
    let config_home = tempdir().unwrap();

    shop_sense_bin(config_home.path())
        .args(["config", "set", "endpoint", "http://example.test:8080"])
        .assert()
        .success();

    shop_sense_bin(config_home.path())
        .args(["config", "get", "endpoint"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.test:8080"));
}

#[test]
fn config_set_unknown_key_fails() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .args(["config", "set", "api_key", "whatever"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_duration_fails() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .args(["config", "set", "status_ttl", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn capture_rejects_invalid_silence_threshold() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .args(["capture", "--silence", "bogus"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn capture_prints_final_transcript() {
    let config_home = tempdir().unwrap();
    shop_sense_bin(config_home.path())
        .arg("capture")
        .write_stdin("milk and eggs\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("milk and eggs"));
}

#[test]
fn sync_with_empty_store_reports_no_receipts() {
    let config_home = tempdir().unwrap();
    let receipts = tempdir().unwrap();

    shop_sense_bin(config_home.path())
        .args(["--receipts-dir", receipts.path().to_str().unwrap(), "sync"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No receipts to sync."));
}

#[test]
fn receipts_list_shows_saved_names() {
    let config_home = tempdir().unwrap();
    let receipts = tempdir().unwrap();
    std::fs::write(receipts.path().join("receipt-11111111.jpg"), b"a").unwrap();
    std::fs::write(receipts.path().join("note.txt"), b"x").unwrap();

    shop_sense_bin(config_home.path())
        .args([
            "--receipts-dir",
            receipts.path().to_str().unwrap(),
            "receipts",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("receipt-11111111.jpg"))
        .stdout(predicate::str::contains("note.txt").not());
}

#[test]
fn receipts_add_saves_under_generated_name() {
    let config_home = tempdir().unwrap();
    let receipts = tempdir().unwrap();
    let scan = config_home.path().join("scan.jpg");
    std::fs::write(&scan, b"jpeg bytes").unwrap();

    shop_sense_bin(config_home.path())
        .args([
            "--receipts-dir",
            receipts.path().to_str().unwrap(),
            "receipts",
            "add",
            scan.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Receipt saved: receipt-"));

    let saved: Vec<_> = std::fs::read_dir(receipts.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(saved.len(), 1);
    assert!(saved[0].starts_with("receipt-") && saved[0].ends_with(".jpg"));
}

#[test]
fn receipts_clear_deletes_saved_images() {
    let config_home = tempdir().unwrap();
    let receipts = tempdir().unwrap();
    std::fs::write(receipts.path().join("receipt-11111111.jpg"), b"a").unwrap();
    std::fs::write(receipts.path().join("note.txt"), b"x").unwrap();

    shop_sense_bin(config_home.path())
        .args([
            "--receipts-dir",
            receipts.path().to_str().unwrap(),
            "receipts",
            "clear",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed 1 receipt(s)"));

    assert!(!receipts.path().join("receipt-11111111.jpg").exists());
    assert!(receipts.path().join("note.txt").exists());
}

#[tokio::test]
async fn sync_uploads_receipts_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/extractTextAndStore"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    let config_home = tempdir().unwrap();
    let receipts = tempdir().unwrap();
    std::fs::write(receipts.path().join("receipt-11111111.jpg"), b"a").unwrap();
    std::fs::write(receipts.path().join("receipt-22222222.jpg"), b"b").unwrap();
    std::fs::write(receipts.path().join("note.txt"), b"x").unwrap();

    let uri = server.uri();
    let config_path = config_home.path().to_path_buf();
    let receipts_path = receipts.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        shop_sense_bin(&config_path)
            .args([
                "--endpoint",
                &uri,
                "--receipts-dir",
                receipts_path.to_str().unwrap(),
                "sync",
            ])
            .assert()
    })
    .await
    .unwrap();

    assert.success();

    // Default policy retains the local files
    assert!(receipts.path().join("receipt-11111111.jpg").exists());
    assert!(receipts.path().join("receipt-22222222.jpg").exists());
}

#[tokio::test]
async fn ask_prints_the_answer_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/milk"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Found 2 deals on milk"))
        .expect(1)
        .mount(&server)
        .await;

    let config_home = tempdir().unwrap();
    let uri = server.uri();
    let config_path = config_home.path().to_path_buf();

    let assert = tokio::task::spawn_blocking(move || {
        shop_sense_bin(&config_path)
            .args(["--endpoint", &uri, "ask", "milk"])
            .assert()
    })
    .await
    .unwrap();

    assert
        .success()
        .stdout(predicate::str::contains("Found 2 deals on milk"));
}
