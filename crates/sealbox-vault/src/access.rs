//! Secret CRUD and service access control on a loaded vault.
//!
//! All operations mutate the in-memory [`Vault`] only; persisting the
//! result is the caller's job via [`crate::VaultRepository::save`].

use rand::RngCore;
use sealbox_core::SecretString;

use crate::error::{Result, VaultError};
use crate::model::{SecretEntry, ServiceEntry, Vault};
use crate::token;

/// Whether [`Vault::set`] created a new secret or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Inserted,
    Replaced,
}

impl Vault {
    /// Store `value` under `name`.
    ///
    /// Replacing an existing secret preserves its access list, so grants
    /// survive value rotation.
    pub fn set(&mut self, name: &str, value: &str) -> Result<SetOutcome> {
        require_nonempty(name, "secret name")?;
        require_nonempty(value, "secret value")?;

        match self.index_of_secret(name) {
            Some(i) => {
                self.secrets[i].value = SecretString::new(value);
                Ok(SetOutcome::Replaced)
            }
            None => {
                self.secrets.push(SecretEntry {
                    name: name.to_string(),
                    value: SecretString::new(value),
                    access: Vec::new(),
                });
                Ok(SetOutcome::Inserted)
            }
        }
    }

    /// Retrieve the decrypted value of the secret named `name`.
    pub fn get(&self, name: &str) -> Result<&SecretString> {
        self.secret(name)
            .map(|entry| &entry.value)
            .ok_or_else(|| VaultError::NotFound(format!("secret: {name}")))
    }

    /// Remove the secret named `name`.
    ///
    /// Deletion is idempotent: removing an unknown name returns `false`
    /// rather than an error.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.index_of_secret(name) {
            Some(i) => {
                self.secrets.remove(i);
                true
            }
            None => false,
        }
    }

    /// Grant `service` access to every secret in `secret_names` and return
    /// the service's bearer token.
    ///
    /// Validation is all-or-nothing: if any named secret is missing the
    /// vault is left untouched. Re-granting for an existing service is
    /// idempotent - the original token is reused and access lists are
    /// deduplicated.
    pub fn add_access(
        &mut self,
        service: &str,
        secret_names: &[String],
        rng: &mut dyn RngCore,
    ) -> Result<String> {
        require_nonempty(service, "service name")?;
        if secret_names.is_empty() {
            return Err(VaultError::InvalidArgument(
                "must name at least one secret".to_string(),
            ));
        }

        // Validate every name before mutating anything.
        for name in secret_names {
            if self.index_of_secret(name).is_none() {
                return Err(VaultError::NotFound(format!("secret: {name}")));
            }
        }

        let token = match self.service(service) {
            Some(entry) => entry.token.expose().to_string(),
            None => {
                let token = token::generate_token(rng);
                self.services.push(ServiceEntry {
                    name: service.to_string(),
                    token: SecretString::new(token.clone()),
                });
                token
            }
        };

        for name in secret_names {
            // Checked above, so the index always resolves.
            if let Some(i) = self.index_of_secret(name) {
                let access = &mut self.secrets[i].access;
                if !access.iter().any(|s| s == service) {
                    access.push(service.to_string());
                }
            }
        }

        Ok(token)
    }

    /// Return the live token for `service`.
    pub fn access_token(&self, service: &str) -> Result<String> {
        self.service(service)
            .map(|entry| entry.token.expose().to_string())
            .ok_or_else(|| VaultError::NotFound(format!("service: {service}")))
    }

    /// Strip `service` from the access lists of only the named secrets.
    ///
    /// The service entry and its token survive, so access to any secret not
    /// listed is retained. Unknown service or secret names are no-ops.
    pub fn remove_access(&mut self, service: &str, secret_names: &[String]) {
        if !self.has_service(service) {
            return;
        }
        for name in secret_names {
            if let Some(i) = self.index_of_secret(name) {
                self.secrets[i].access.retain(|s| s != service);
            }
        }
    }

    /// Delete the service entry and strip its name from every access list.
    ///
    /// Revoking an unknown service is a no-op.
    pub fn revoke_service(&mut self, service: &str) {
        self.services.retain(|s| s.name != service);
        for secret in &mut self.secrets {
            secret.access.retain(|s| s != service);
        }
    }
}

fn require_nonempty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VaultError::InvalidArgument(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}
