use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn policy_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

fn secpol() -> Command {
    Command::cargo_bin("secpol").unwrap()
}

#[test]
fn compile_prints_ruleset_json() {
    let file = policy_file(
        "applications:\n  - path: /bin/ls\n    features:\n      aslr: true\n",
    );

    secpol()
        .arg("compile")
        .arg("--no-resolve")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"path\": \"/bin/ls\""))
        .stdout(predicate::str::contains("\"kind\": \"aslr\""));
}

#[test]
fn check_reports_rule_count() {
    let file = policy_file(
        "applications:\n  - path: /bin/a\n  - path: /bin/b\n",
    );

    secpol()
        .arg("check")
        .arg("--no-resolve")
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("ok: 2 rules"));
}

#[test]
fn unsupported_feature_rejects_the_policy() {
    let file = policy_file(
        "applications:\n  - path: /bin/ls\n    features:\n      mprotect: true\n",
    );

    secpol()
        .arg("check")
        .arg("--no-resolve")
        .arg("--feature")
        .arg("pax_aslr")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("pax_mprotect"))
        .stderr(predicate::str::contains("/bin/ls"));
}

#[test]
fn missing_file_is_rejected() {
    secpol()
        .arg("check")
        .arg("/nonexistent/policy.yaml")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read policy file"));
}

#[test]
fn malformed_document_is_rejected() {
    let file = policy_file("applications: [oops");

    secpol()
        .arg("check")
        .arg("--no-resolve")
        .arg(file.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not well-formed"));
}
