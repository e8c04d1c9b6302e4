//! End-to-end properties of the vault: every scenario goes through a full
//! load -> mutate -> save -> reload cycle against a real temp file.

use rand::rngs::OsRng;
use sealbox_integration_tests::temp_repo;
use sealbox_vault::VaultError;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_set_save_load_get_round_trip() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    vault.set("db-password", "hunter2").unwrap();
    repo.save(&vault, "pass", &mut OsRng).unwrap();

    let reloaded = repo.load_or_create("pass", &mut OsRng).unwrap();
    assert_eq!(reloaded.get("db-password").unwrap().expose(), "hunter2");
}

#[test]
fn test_wrong_passphrase_is_rejected() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("correct", &mut OsRng).unwrap();
    vault.set("a", "v").unwrap();
    repo.save(&vault, "correct", &mut OsRng).unwrap();

    let result = repo.load_or_create("incorrect", &mut OsRng);
    assert!(matches!(result, Err(VaultError::Authentication(_))));
}

#[test]
fn test_idempotent_grant_survives_reload() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    vault.set("s", "v").unwrap();
    let first = vault.add_access("svc", &names(&["s"]), &mut OsRng).unwrap();
    repo.save(&vault, "pass", &mut OsRng).unwrap();

    let mut reloaded = repo.load_or_create("pass", &mut OsRng).unwrap();
    let second = reloaded
        .add_access("svc", &names(&["s"]), &mut OsRng)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(reloaded.secret("s").unwrap().access, vec!["svc".to_string()]);
}

#[test]
fn test_full_revoke_clears_both_sides() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    vault.set("a", "v").unwrap();
    vault.set("b", "w").unwrap();
    vault
        .add_access("svc", &names(&["a", "b"]), &mut OsRng)
        .unwrap();
    vault.revoke_service("svc");
    repo.save(&vault, "pass", &mut OsRng).unwrap();

    let reloaded = repo.load_or_create("pass", &mut OsRng).unwrap();
    assert!(reloaded.services.is_empty());
    assert!(reloaded.secret("a").unwrap().access.is_empty());
    assert!(reloaded.secret("b").unwrap().access.is_empty());
}

#[test]
fn test_partial_revoke_preserves_token() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    vault.set("a", "v").unwrap();
    vault.set("b", "w").unwrap();
    let token = vault
        .add_access("svc", &names(&["a", "b"]), &mut OsRng)
        .unwrap();
    vault.remove_access("svc", &names(&["a"]));
    repo.save(&vault, "pass", &mut OsRng).unwrap();

    let reloaded = repo.load_or_create("pass", &mut OsRng).unwrap();
    assert!(reloaded.secret("a").unwrap().access.is_empty());
    assert_eq!(reloaded.secret("b").unwrap().access, vec!["svc".to_string()]);
    assert_eq!(reloaded.access_token("svc").unwrap(), token);
}

#[test]
fn test_set_preserves_access_across_overwrite() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    vault.set("a", "v1").unwrap();
    vault.add_access("svc", &names(&["a"]), &mut OsRng).unwrap();
    vault.set("a", "v2").unwrap();
    repo.save(&vault, "pass", &mut OsRng).unwrap();

    let reloaded = repo.load_or_create("pass", &mut OsRng).unwrap();
    assert_eq!(reloaded.get("a").unwrap().expose(), "v2");
    assert_eq!(reloaded.secret("a").unwrap().access, vec!["svc".to_string()]);
}

#[test]
fn test_passphrase_change_invalidates_old() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("old", &mut OsRng).unwrap();
    vault.set("a", "value-a").unwrap();
    vault.set("b", "value-b").unwrap();
    repo.save(&vault, "new", &mut OsRng).unwrap();

    assert!(matches!(
        repo.load_or_create("old", &mut OsRng),
        Err(VaultError::Authentication(_))
    ));

    let rotated = repo.load_or_create("new", &mut OsRng).unwrap();
    assert_eq!(rotated.get("a").unwrap().expose(), "value-a");
    assert_eq!(rotated.get("b").unwrap().expose(), "value-b");
}

#[test]
fn test_token_is_always_100_hex_chars() {
    let (repo, _path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    for i in 0..5 {
        let name = format!("secret-{i}");
        vault.set(&name, "v").unwrap();
        let token = vault
            .add_access(&format!("svc-{i}"), &[name], &mut OsRng)
            .unwrap();
        assert_eq!(token.len(), 100);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn test_on_disk_document_never_contains_plaintext() {
    let (repo, path, _tmp) = temp_repo();

    let mut vault = repo.load_or_create("pass", &mut OsRng).unwrap();
    vault.set("api-key", "super-secret-plaintext").unwrap();
    let token = vault
        .add_access("svc", &names(&["api-key"]), &mut OsRng)
        .unwrap();
    repo.save(&vault, "pass", &mut OsRng).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains("super-secret-plaintext"));
    assert!(!raw.contains(&token));

    // Names and access lists stay plaintext in the document.
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["Secrets"][0]["Name"], "api-key");
    assert_eq!(doc["Secrets"][0]["Access"][0], "svc");
    assert_eq!(doc["Services"][0]["Name"], "svc");
    assert!(doc["Checksum"].is_string());
}
