//! Command implementations.
//!
//! Every command is a strict load -> mutate -> save sequence on the vault
//! file. Output is colored status text; plaintext is only ever printed by
//! `get` and the token commands.

use std::path::PathBuf;

use console::style;
use rand::rngs::OsRng;
use sealbox_vault::{Result, SetOutcome, VaultError, VaultRepository};

use crate::{Cli, Commands};

/// Dispatch the parsed command.
pub fn run(cli: Cli) -> Result<()> {
    let repo = VaultRepository::new(resolve_file(cli.file)?);
    let passphrase = resolve_passphrase(cli.passphrase, "Passphrase: ")?;

    match cli.command {
        Commands::Set { name, value } => set(&repo, &passphrase, &name, value),
        Commands::Get { name } => get(&repo, &passphrase, &name),
        Commands::List => list(&repo, &passphrase),
        Commands::Remove { name } => remove(&repo, &passphrase, &name),
        Commands::AddAccess { service, secrets } => {
            add_access(&repo, &passphrase, &service, &secrets)
        }
        Commands::Token { service } => token(&repo, &passphrase, &service),
        Commands::RemoveAccess { service, secrets } => {
            remove_access(&repo, &passphrase, &service, &secrets)
        }
        Commands::RevokeService { service } => revoke_service(&repo, &passphrase, &service),
        Commands::ChangePassphrase { new_passphrase } => {
            change_passphrase(&repo, &passphrase, new_passphrase)
        }
    }
}

fn set(repo: &VaultRepository, passphrase: &str, name: &str, value: Option<String>) -> Result<()> {
    let value = match value {
        Some(v) => v,
        None => rpassword::prompt_password(format!("Value for '{}': ", name.trim()))?,
    };

    let mut vault = repo.load_or_create(passphrase, &mut OsRng)?;
    let outcome = vault.set(name.trim(), value.trim())?;
    repo.save(&vault, passphrase, &mut OsRng)?;

    match outcome {
        SetOutcome::Inserted => println!("{}", style("added secret").green()),
        SetOutcome::Replaced => println!("{}", style("replaced secret").green()),
    }
    Ok(())
}

fn get(repo: &VaultRepository, passphrase: &str, name: &str) -> Result<()> {
    let vault = repo.load_or_create(passphrase, &mut OsRng)?;
    println!("{}", vault.get(name.trim())?.expose());
    Ok(())
}

fn list(repo: &VaultRepository, passphrase: &str) -> Result<()> {
    // Listing an absent vault prints "empty" without bootstrapping a file.
    if !repo.exists() {
        println!("{}", style("empty").white());
        return Ok(());
    }

    let vault = repo.load_or_create(passphrase, &mut OsRng)?;
    if vault.secrets.is_empty() {
        println!("{}", style("empty").white());
        return Ok(());
    }

    for secret in &vault.secrets {
        let access = format!("accessible by [{}]", secret.access.join(","));
        println!(
            "{}: {} {}",
            style(&secret.name).white(),
            style(value_hint(secret.value.expose())).green(),
            style(access).blue()
        );
    }
    Ok(())
}

fn remove(repo: &VaultRepository, passphrase: &str, name: &str) -> Result<()> {
    let mut vault = repo.load_or_create(passphrase, &mut OsRng)?;
    if vault.remove(name.trim()) {
        repo.save(&vault, passphrase, &mut OsRng)?;
        println!("{}", style("removed").green());
    } else {
        println!("{}", style("not found").red());
    }
    Ok(())
}

fn add_access(
    repo: &VaultRepository,
    passphrase: &str,
    service: &str,
    secrets: &[String],
) -> Result<()> {
    let secrets = trimmed(secrets);
    let mut vault = repo.load_or_create(passphrase, &mut OsRng)?;
    let token = vault.add_access(service.trim(), &secrets, &mut OsRng)?;
    repo.save(&vault, passphrase, &mut OsRng)?;

    println!(
        "{}",
        style(format!(
            "added access to {} for {}",
            service.trim(),
            secrets.join(",")
        ))
        .green()
    );
    println!("Use this token to access the granted secrets:");
    println!("{}", style(token).yellow());
    Ok(())
}

fn token(repo: &VaultRepository, passphrase: &str, service: &str) -> Result<()> {
    let vault = repo.load_or_create(passphrase, &mut OsRng)?;
    println!("{}", vault.access_token(service.trim())?);
    Ok(())
}

fn remove_access(
    repo: &VaultRepository,
    passphrase: &str,
    service: &str,
    secrets: &[String],
) -> Result<()> {
    let mut vault = repo.load_or_create(passphrase, &mut OsRng)?;
    vault.remove_access(service.trim(), &trimmed(secrets));
    repo.save(&vault, passphrase, &mut OsRng)?;
    println!("{}", style("removed access").green());
    Ok(())
}

fn revoke_service(repo: &VaultRepository, passphrase: &str, service: &str) -> Result<()> {
    let mut vault = repo.load_or_create(passphrase, &mut OsRng)?;
    vault.revoke_service(service.trim());
    repo.save(&vault, passphrase, &mut OsRng)?;
    println!("{}", style("revoked").green());
    Ok(())
}

fn change_passphrase(
    repo: &VaultRepository,
    passphrase: &str,
    new_passphrase: Option<String>,
) -> Result<()> {
    let new_passphrase = resolve_passphrase(new_passphrase, "New passphrase: ")?;

    // The vault is already plaintext in memory after load; rotation is just
    // a save under the new passphrase. The old one stops working the moment
    // the file hits disk.
    let vault = repo.load_or_create(passphrase, &mut OsRng)?;
    repo.save(&vault, &new_passphrase, &mut OsRng)?;
    println!("{}", style("changed passphrase").green());
    Ok(())
}

/// Resolve the vault file path: flag/env or the default location.
fn resolve_file(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => sealbox_core::paths::vault_file()
            .map_err(|e| VaultError::InvalidArgument(e.to_string())),
    }
}

/// Resolve a passphrase from the flag/env, falling back to a hidden prompt.
fn resolve_passphrase(passphrase: Option<String>, prompt: &str) -> Result<String> {
    let value = match passphrase {
        Some(p) => p,
        None => rpassword::prompt_password(prompt)?,
    };
    Ok(value.trim().to_string())
}

/// Masked preview of a secret value: `****` plus at most the last four
/// characters.
fn value_hint(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

fn trimmed(names: &[String]) -> Vec<String> {
    names.iter().map(|s| s.trim().to_string()).collect()
}
