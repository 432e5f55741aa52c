use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn hpp() -> Command {
    let mut cmd = Command::new(cargo_bin!("hpp-signer"));
    cmd.env("HPP_MERCHANT_ID", "1234abcd")
        .env("HPP_ACCOUNT", "asdf1234")
        .env("HPP_SECRET", "zbcd4321")
        .env_remove("HPP_SCHEME");
    cmd
}

#[test]
fn test_invalid_amounts_are_rejected() {
    for amount in ["twenty", "-5", "20.505", "79228162514264337593543950335"] {
        let mut cmd = hpp();
        cmd.args(["sign", "--currency", "EUR"])
            .arg(format!("--amount={amount}"));

        cmd.assert()
            .failure()
            .stderr(predicate::str::contains("Input error"));
    }
}

#[test]
fn test_malformed_extra_field_is_rejected() {
    let mut cmd = hpp();
    cmd.args(["sign", "--currency", "EUR", "--amount", "20", "--field", "no-equals"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("expected KEY=VALUE"));
}

#[test]
fn test_incomplete_configuration_is_reported() {
    let mut cmd = Command::new(cargo_bin!("hpp-signer"));
    cmd.env("HPP_MERCHANT_ID", "1234abcd")
        .env_remove("HPP_ACCOUNT")
        .env_remove("HPP_SECRET")
        .args(["sign", "--currency", "EUR", "--amount", "20"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("incomplete configuration"));
}

#[test]
fn test_malformed_timestamp_is_rejected() {
    let mut cmd = hpp();
    cmd.args([
        "sign",
        "--currency",
        "EUR",
        "--amount",
        "20",
        "--timestamp",
        "2024-01-01",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("14 digits"));
}

#[test]
fn test_non_string_json_payload_is_rejected() {
    let mut cmd = assert_cmd::Command::from_std(hpp());
    cmd.args(["verify", "--input", "json"])
        .write_stdin(r#"{"TIMESTAMP": 20240101120100}"#);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Payload error"));
}
