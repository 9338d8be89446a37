use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_requires_a_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_cli_help_lists_resources() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("partners"))
        .stdout(predicate::str::contains("accounts"))
        .stdout(predicate::str::contains("transactions"))
        .stdout(predicate::str::contains("dashboard"));
    Ok(())
}

#[test]
fn test_cli_rejects_unknown_currency() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args([
        "accounts", "create", "--currency", "JPY", "--balance", "0", "--partner", "1",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown currency"));
    Ok(())
}

#[test]
fn test_cli_rejects_non_numeric_id() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.args(["partners", "get", "seven"]);
    cmd.assert().failure();
    Ok(())
}
