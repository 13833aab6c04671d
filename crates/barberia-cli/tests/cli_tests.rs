use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Nothing listens on the discard port, so every request fails fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9/api/v1";

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a Command with --no-color flag, an isolated
/// session file and an API that cannot be reached
fn barberia_cmd(temp_dir: &TempDir) -> Command {
    let session_path = temp_dir.path().join("session.db");
    let mut cmd = Command::cargo_bin("barberia").expect("Failed to find barberia binary");
    cmd.env_remove("BARBERIA_API_URL")
        .env_remove("BARBERIA_PASSWORD")
        .arg("--no-color")
        .arg("--session-file")
        .arg(session_path)
        .args(["--api-url", UNREACHABLE_API, "--timeout-secs", "2"]);
    cmd
}

#[test]
fn test_cli_services_lists_catalog() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Services"))
        .stdout(predicate::str::contains("Corte de pelo"))
        .stdout(predicate::str::contains("haircut_shave"))
        .stdout(predicate::str::contains("30€"));
}

#[test]
fn test_cli_book_rejects_past_date() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["book", "--service", "haircut", "--date", "01/01/2000", "--time", "10:30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("01/01/2000"));
}

#[test]
fn test_cli_book_rejects_unknown_service() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["book", "--service", "massage", "--date", "2099-01-05"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("massage"));
}

#[test]
fn test_cli_book_rejects_malformed_time() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["book", "--service", "haircut", "--date", "2099-01-05", "--time", "25:00"])
        .assert()
        .failure();
}

#[test]
fn test_cli_slots_degrade_when_unreachable() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["slots", "2099-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Slots for 05/01/2099"))
        .stdout(predicate::str::contains("estimated slots"))
        .stdout(predicate::str::contains("09:00"))
        .stdout(predicate::str::contains("17:30"));
}

#[test]
fn test_cli_book_without_time_shows_slots() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["book", "--service", "shave", "--date", "2099-01-05"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Slots for 05/01/2099"))
        .stdout(predicate::str::contains("--time HH:MM"));
}

#[test]
fn test_cli_book_with_time_marks_estimated_slots() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["book", "--service", "haircut", "--date", "2099-01-05", "--time", "10:30"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("estimated slots"))
        .stdout(predicate::str::contains("05/01/2099"));
}

#[test]
fn test_cli_signup_rejects_mismatched_passwords() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["signup", "ana", "ana@example.com"])
        .write_stdin("secret1\nsecret2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Passwords do not match"));
}

#[test]
fn test_cli_slots_rejects_bad_date() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["slots", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a date"));
}

#[test]
fn test_cli_whoami_without_session() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_cli_logout_is_offline() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Success: Logged out"));
}

#[test]
fn test_cli_appointments_report_network_failure() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .arg("appointments")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load appointments"));
}

#[test]
fn test_cli_cancel_prompt_can_abort() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .args(["cancel", "4"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancellation aborted"));
}

#[test]
fn test_cli_rejects_invalid_api_url() {
    let temp_dir = create_cli_test_environment();

    Command::cargo_bin("barberia")
        .expect("Failed to find barberia binary")
        .env_remove("BARBERIA_API_URL")
        .arg("--session-file")
        .arg(temp_dir.path().join("session.db"))
        .args(["--api-url", "ftp://example.com", "services"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to initialize API client"));
}

#[test]
fn test_cli_help_lists_commands() {
    let temp_dir = create_cli_test_environment();

    barberia_cmd(&temp_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("cancel"))
        .stdout(predicate::str::contains("admin"));
}
