// tests/cli_regression.rs
// Regression tests for the inp binary: exit codes, status lines and miette
// diagnostics on stderr.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

use common::fixture;

fn inp() -> Command {
    Command::cargo_bin("inp").unwrap()
}

// ---
// check
// ---

#[test]
fn test_check_clean_directory_succeeds() {
    inp()
        .arg("check")
        .arg(fixture("clean"))
        .assert()
        .success()
        .stdout(contains("ok").and(contains("sphere.inp")));
}

#[test]
fn test_check_reports_every_bad_card() {
    inp()
        .arg("check")
        .arg(fixture("invalid.inp"))
        .assert()
        .failure()
        .stdout(contains("FAIL").and(contains("3 of 4 cards")))
        .stderr(
            contains("inp::semantics::so::out_of_range")
                .and(contains("inp::syntax::surface::no_matching_grammar"))
                .and(contains("inp::semantics::nps::out_of_range")),
        );
}

#[test]
fn test_check_names_file_and_line() {
    inp()
        .arg("check")
        .arg(fixture("invalid.inp"))
        .assert()
        .failure()
        .stderr(contains("invalid.inp:4"));
}

#[test]
fn test_check_missing_path_fails() {
    inp()
        .arg("check")
        .arg(fixture("no_such_deck.inp"))
        .assert()
        .failure()
        .stderr(contains("cannot read"));
}

// ---
// format
// ---

#[test]
fn test_format_check_accepts_canonical_deck() {
    inp()
        .arg("format")
        .arg("--check")
        .arg(fixture("clean/sphere.inp"))
        .assert()
        .success();
}

#[test]
fn test_format_normalizes_cards() {
    inp()
        .arg("format")
        .arg(fixture("unformatted.inp"))
        .assert()
        .success()
        .stdout(
            contains("1 0 -1 imp:n=1")
                .and(contains("1 so 5.0"))
                .and(contains("2 px 1.0 $ mirror"))
                .and(contains("nps 100")),
        );
}

#[test]
fn test_format_check_shows_diff() {
    inp()
        .arg("format")
        .arg("--check")
        .arg(fixture("unformatted.inp"))
        .assert()
        .failure()
        .stdout(contains("--- ").and(contains("+1 so 5.0")));
}

#[test]
fn test_format_with_config_wraps_long_cards() {
    let deck = "tests/wide_deck.inp";
    fs::write(
        deck,
        "wide\n1 0 -1\n\n1 gq 1.25 1.25 1.25 0 0 0 -2.5 -2.5 -2.5 -40\n\nnps 1\n",
    )
    .unwrap();

    let output = inp()
        .arg("format")
        .arg("--config")
        .arg(fixture("narrow.yaml"))
        .arg(deck)
        .output()
        .unwrap();
    let _ = fs::remove_file(deck);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.lines().all(|line| line.len() <= 40), "{stdout}");
    assert!(stdout.contains("\n     "), "{stdout}");
}

#[test]
fn test_format_rejects_bad_config() {
    let config = "tests/bad_config.yaml";
    fs::write(config, "continuation_indent: 2\n").unwrap();

    inp()
        .arg("format")
        .arg("--config")
        .arg(config)
        .arg(fixture("clean/sphere.inp"))
        .assert()
        .failure()
        .stderr(contains("continuation_indent"));

    let _ = fs::remove_file(config);
}

// ---
// ast / grammar
// ---

#[test]
fn test_ast_dumps_json() {
    inp()
        .arg("ast")
        .arg(fixture("clean/sphere.inp"))
        .assert()
        .success()
        .stdout(
            contains("\"kind\": \"surface\"")
                .and(contains("\"kind\": \"cell\""))
                .and(contains("simple sphere in a box")),
        );
}

#[test]
fn test_grammar_lists_family() {
    inp()
        .arg("grammar")
        .arg("surface")
        .assert()
        .success()
        .stdout(contains("so").and(contains("sphere centred at origin")));
}

#[test]
fn test_grammar_lists_every_family() {
    inp()
        .arg("grammar")
        .assert()
        .success()
        .stdout(contains("cell option").and(contains("source option")));
}

#[test]
fn test_grammar_unknown_family_fails() {
    inp()
        .arg("grammar")
        .arg("bogus")
        .assert()
        .failure()
        .stderr(contains("unknown family"));
}
