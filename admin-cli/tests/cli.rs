use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

// Nothing listens here; commands that reach the network fail fast.
const DEAD_SERVER: &str = "http://127.0.0.1:9/api";

fn admin_cli(token_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("admin-cli").unwrap();
    cmd.env_remove("ADMIN_API_URL")
        .env_remove("RUST_LOG")
        .arg("--server")
        .arg(DEAD_SERVER)
        .arg("--token-file")
        .arg(token_dir.path().join("token"));
    cmd
}

#[test]
fn test_help_lists_resources() {
    Command::cargo_bin("admin-cli")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("blogs"))
        .stdout(predicate::str::contains("podcasts"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("reports"));
}

#[test]
fn test_status_without_token() {
    let dir = TempDir::new().unwrap();

    admin_cli(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"))
        .stdout(predicate::str::contains(DEAD_SERVER));
}

#[test]
fn test_status_with_saved_token() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("token"), "eyJhbGciOiJIUzI1NiJ9.payload.sig").unwrap();

    admin_cli(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in"))
        .stdout(predicate::str::contains("eyJhbGciOiJI..."));
}

#[test]
fn test_logout_removes_token_file() {
    let dir = TempDir::new().unwrap();
    let token = dir.path().join("token");
    fs::write(&token, "abc").unwrap();

    admin_cli(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!token.exists());
}

#[test]
fn test_scheduled_post_needs_date_before_network() {
    let dir = TempDir::new().unwrap();

    admin_cli(&dir)
        .args(["blogs", "create", "--title", "Launch", "--content", "Soon"])
        .args(["--status", "scheduled"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Schedule date is required for scheduled posts",
        ))
        .stderr(predicate::str::contains("Unable to connect").not());
}

#[test]
fn test_past_schedule_is_rejected() {
    let dir = TempDir::new().unwrap();

    admin_cli(&dir)
        .args(["blogs", "create", "--title", "Launch", "--content", "Soon"])
        .args(["--status", "scheduled", "--scheduled-at", "2001-01-01T00:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Schedule date must be in the future"));
}

#[test]
fn test_oversized_image_is_rejected() {
    let dir = TempDir::new().unwrap();
    let image = dir.path().join("cover.jpg");
    fs::write(&image, vec![0u8; 6 * 1024 * 1024]).unwrap();

    admin_cli(&dir)
        .args(["blogs", "create", "--title", "T", "--content", "C", "--image"])
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Image size must be less than 5MB"));
}

#[test]
fn test_podcast_audio_must_be_mp3() {
    let dir = TempDir::new().unwrap();
    let audio = dir.path().join("episode.wav");
    fs::write(&audio, b"RIFF").unwrap();

    admin_cli(&dir)
        .args(["podcasts", "create", "--title", "Ep 1", "--description", "D"])
        .args(["--author", "u1", "--audio"])
        .arg(&audio)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only MP3 audio files are allowed"));
}

#[test]
fn test_delete_declined_without_confirmation() {
    let dir = TempDir::new().unwrap();

    admin_cli(&dir)
        .args(["blogs", "delete", "--id", "b1"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
}

#[test]
fn test_network_failure_is_reported() {
    let dir = TempDir::new().unwrap();

    admin_cli(&dir)
        .args(["reports", "list"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to connect to the server"));
}

#[test]
#[serial]
fn test_default_token_file_lives_in_home() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".admin_token"), "home-token-value").unwrap();

    Command::cargo_bin("admin-cli")
        .unwrap()
        .env("HOME", home.path())
        .env_remove("RUST_LOG")
        .args(["--server", DEAD_SERVER, "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".admin_token"))
        .stdout(predicate::str::contains("Logged in"));
}

#[test]
#[serial]
fn test_server_comes_from_environment() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("admin-cli")
        .unwrap()
        .env("ADMIN_API_URL", "http://example.invalid/api")
        .arg("--token-file")
        .arg(dir.path().join("token"))
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://example.invalid/api"));
}
