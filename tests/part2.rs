use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert().success().stdout(str::contains("16477902"));
}

#[test]
fn part2_verbose_output_repeated_value() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs.txt").arg("--verbose");

    cmd.assert()
        .success()
        .stdout(str::contains("Loop#0: register[3] = 7967233"))
        .stdout(str::contains("Loop#10497: register[3] = 3107527"));
}

#[test]
fn part2_fails_for_missing_input() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("missing_inputs.txt");

    cmd.assert().failure();
}
