use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert().success().stdout(str::contains("7967233"));
}

#[test]
fn part1_output_loops_for_target() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs.txt").arg("--target").arg("11413072");

    cmd.assert().success().stdout(str::contains("after 3 loop(s)"));
}

#[test]
fn part1_output_never_halts_for_target() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs.txt").arg("--target").arg("0");

    cmd.assert().success().stdout(str::contains("never halts"));
}

#[test]
fn part1_fails_for_target_out_of_domain() {
    let mut cmd = Command::cargo_bin("part1").unwrap();
    cmd.arg("inputs.txt").arg("--target").arg("16777216");

    cmd.assert().failure();
}
