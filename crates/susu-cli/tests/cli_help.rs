use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("susu")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("transactions"))
        .stdout(predicate::str::contains("payouts"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn test_login_help_shows_subcommands() {
    cargo_bin_cmd!("susu")
        .args(["login", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("collector"))
        .stdout(predicate::str::contains("client"));
}

#[test]
fn test_transactions_help_shows_subcommands() {
    cargo_bin_cmd!("susu")
        .args(["transactions", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feed"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("confirm"))
        .stdout(predicate::str::contains("reject"));
}

#[test]
fn test_payouts_help_shows_subcommands() {
    cargo_bin_cmd!("susu")
        .args(["payouts", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("request"))
        .stdout(predicate::str::contains("approve"))
        .stdout(predicate::str::contains("decline"))
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("susu")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
