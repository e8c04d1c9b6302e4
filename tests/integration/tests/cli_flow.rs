//! CLI command flows driven through the library entry point.
//!
//! Each test parses real argv and runs the command against a temp vault
//! file, checking the on-disk result afterwards.

use clap::Parser as _;
use rand::rngs::OsRng;
use sealbox_cli::Cli;
use sealbox_integration_tests::temp_repo;
use sealbox_vault::{VaultError, VaultRepository};

fn run(args: &[&str]) -> sealbox_vault::Result<()> {
    let cli = Cli::try_parse_from(args).expect("argv should parse");
    sealbox_cli::run(cli)
}

#[test]
fn test_set_then_get_flow() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    run(&[
        "sealbox", "-f", path, "-p", "pw", "set", "db", "--value", "hunter2",
    ])
    .unwrap();

    let repo = VaultRepository::new(path);
    let vault = repo.load_or_create("pw", &mut OsRng).unwrap();
    assert_eq!(vault.get("db").unwrap().expose(), "hunter2");
}

#[test]
fn test_add_access_then_revoke_flow() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    run(&["sealbox", "-f", path, "-p", "pw", "set", "a", "--value", "v1"]).unwrap();
    run(&["sealbox", "-f", path, "-p", "pw", "set", "b", "--value", "v2"]).unwrap();
    run(&["sealbox", "-f", path, "-p", "pw", "add-access", "svc", "a", "b"]).unwrap();

    let repo = VaultRepository::new(path);
    let vault = repo.load_or_create("pw", &mut OsRng).unwrap();
    assert!(vault.has_service("svc"));
    assert_eq!(vault.secret("a").unwrap().access, vec!["svc".to_string()]);

    run(&["sealbox", "-f", path, "-p", "pw", "revoke-service", "svc"]).unwrap();
    let vault = repo.load_or_create("pw", &mut OsRng).unwrap();
    assert!(vault.services.is_empty());
    assert!(vault.secret("a").unwrap().access.is_empty());
}

#[test]
fn test_remove_unknown_secret_is_not_an_error() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    run(&["sealbox", "-f", path, "-p", "pw", "remove", "ghost"]).unwrap();
}

#[test]
fn test_get_unknown_secret_is_not_found() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    let result = run(&["sealbox", "-f", path, "-p", "pw", "get", "ghost"]);
    assert!(matches!(result, Err(VaultError::NotFound(_))));
}

#[test]
fn test_add_access_missing_secret_fails_whole_operation() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    run(&["sealbox", "-f", path, "-p", "pw", "set", "a", "--value", "v"]).unwrap();
    let result = run(&[
        "sealbox", "-f", path, "-p", "pw", "add-access", "svc", "a", "missing",
    ]);
    assert!(matches!(result, Err(VaultError::NotFound(_))));

    // The failed grant must not have been persisted.
    let repo = VaultRepository::new(path);
    let vault = repo.load_or_create("pw", &mut OsRng).unwrap();
    assert!(vault.services.is_empty());
    assert!(vault.secret("a").unwrap().access.is_empty());
}

#[test]
fn test_change_passphrase_flow() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    run(&["sealbox", "-f", path, "-p", "old", "set", "a", "--value", "v"]).unwrap();
    run(&[
        "sealbox",
        "-f",
        path,
        "-p",
        "old",
        "change-passphrase",
        "--new-passphrase",
        "new",
    ])
    .unwrap();

    let repo = VaultRepository::new(path);
    assert!(matches!(
        repo.load_or_create("old", &mut OsRng),
        Err(VaultError::Authentication(_))
    ));
    let vault = repo.load_or_create("new", &mut OsRng).unwrap();
    assert_eq!(vault.get("a").unwrap().expose(), "v");
}

#[test]
fn test_wrong_passphrase_maps_to_exit_code_4() {
    let (_repo, path, _tmp) = temp_repo();
    let path = path.to_str().unwrap();

    run(&["sealbox", "-f", path, "-p", "right", "set", "a", "--value", "v"]).unwrap();
    let err = run(&["sealbox", "-f", path, "-p", "wrong", "get", "a"]).unwrap_err();
    assert_eq!(sealbox_cli::exit_code(&err), 4);
}
