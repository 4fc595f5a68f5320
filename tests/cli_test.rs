use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("custpay"));
    cmd.arg("tests/fixtures/requests.csv")
        .env_remove("CUSTPAY_GATEWAY_ENABLED")
        .env_remove("CUSTPAY_DB_PATH");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("row,type,status,reference,detail"))
        .stdout(predicate::str::contains(
            "1,register,ok,2b0c6f3e-5d1a-4a8e-9c7b-1f2e3d4c5b6a,created",
        ))
        .stdout(predicate::str::contains(
            "2,register,ok,2b0c6f3e-5d1a-4a8e-9c7b-1f2e3d4c5b6a,existing",
        ))
        .stdout(predicate::str::contains(
            "3,register,error,,phone number [+447000000000] is taken",
        ))
        .stdout(predicate::str::contains("4,charge,ok,1,charged"))
        .stdout(predicate::str::contains(
            "5,charge,error,,currency [EUR] not supported",
        ))
        .stdout(predicate::str::contains(
            "6,charge,error,,customer with id [9d8c7b6a-5f4e-4d3c-8b2a-1a0b9c8d7e6f] not found",
        ));

    Ok(())
}

#[test]
fn test_missing_input_file_fails() {
    let mut cmd = Command::new(cargo_bin!("custpay"));
    cmd.arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}

#[test]
fn test_enabled_gateway_without_key_fails() {
    let mut cmd = Command::new(cargo_bin!("custpay"));
    cmd.arg("tests/fixtures/requests.csv")
        .arg("--gateway-enabled")
        .env_remove("CUSTPAY_GATEWAY_API_KEY");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no API key"));
}
