use assert_cmd::Command;

#[test]
fn help_lists_both_subcommands() {
    let output = Command::cargo_bin("midoctl")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("backfill-seed"));
    assert!(stdout.contains("pre-commit"));
}

#[test]
fn requires_a_subcommand() {
    Command::cargo_bin("midoctl").unwrap().assert().failure();
}

#[test]
fn backfill_requires_a_seed_id() {
    Command::cargo_bin("midoctl")
        .unwrap()
        .arg("backfill-seed")
        .assert()
        .failure();
}

#[test]
fn rejects_unknown_pre_commit_flags() {
    Command::cargo_bin("midoctl")
        .unwrap()
        .args(["pre-commit", "--self-heal"])
        .assert()
        .failure();
}
