//! File-backed account store.
//!
//! Accounts live in an in-memory map owned by the store and persist as a JSON
//! array in `{data_dir}/users.json`. The whole collection is rewritten on
//! every mutation; writes go to a temp file first and are renamed into place
//! so a failed write never leaves a partial authoritative file.
//!
//! Mutations (`create`, `update_profile`) run their full read-modify-persist
//! cycle under the write half of one `RwLock`, so a uniqueness check can never
//! interleave with a concurrent insert and file writes never overlap. Lookups
//! share the read half and observe a consistent snapshot.

use crate::auth::password::{self, CredentialScheme, PasswordError};
use crate::models::Account;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

const USERS_FILE: &str = "users.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Account not found")]
    UnknownAccount,

    #[error("Credential error: {0}")]
    Credential(#[from] PasswordError),

    #[error("Storage unavailable: {0}")]
    Unavailable(#[from] io::Error),

    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Single source of truth for account existence, uniqueness, and mutation.
///
/// Handlers receive clones of account records, never a handle into the live
/// map.
pub struct AccountStore {
    path: PathBuf,
    scheme: CredentialScheme,
    accounts: RwLock<HashMap<String, Account>>,
}

impl AccountStore {
    /// Open the store, loading `users.json` from `data_dir` if it exists.
    ///
    /// A missing file is an empty store. A malformed file is tolerated:
    /// unparseable records are skipped with a warning, and a file that is not
    /// a JSON array at all yields an empty store. Startup never fails because
    /// of corrupt persisted data.
    pub async fn open(data_dir: &Path, scheme: CredentialScheme) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).await?;
        let path = data_dir.join(USERS_FILE);

        let accounts = match fs::read(&path).await {
            Ok(raw) => {
                // The raw file contains credential secrets
                let raw = Zeroizing::new(raw);
                parse_accounts(&raw)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::Unavailable(e)),
        };

        tracing::info!(
            accounts = accounts.len(),
            path = %path.display(),
            "Account store loaded"
        );

        Ok(AccountStore {
            path,
            scheme,
            accounts: RwLock::new(accounts),
        })
    }

    /// Create an account and persist it before returning.
    ///
    /// Fails with `EmailTaken` on an exact-string email collision. If the
    /// write fails, the in-memory record is rolled back so callers never
    /// observe an account that is not durably saved.
    pub async fn create(
        &self,
        email: &str,
        secret: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Account, StoreError> {
        // Seal before taking the lock; Argon2 is deliberately slow
        let credential_secret = password::seal_secret(self.scheme, secret)?;

        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == email) {
            return Err(StoreError::EmailTaken);
        }

        let account = Account {
            id: nanoid::nanoid!(21),
            email: email.to_string(),
            credential_secret,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs(),
        };

        accounts.insert(account.id.clone(), account.clone());

        if let Err(e) = self.persist(&accounts).await {
            accounts.remove(&account.id);
            return Err(e);
        }

        Ok(account)
    }

    /// Look up an account by exact email plus credential verification.
    pub async fn find_by_credentials(&self, email: &str, secret: &str) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts
            .values()
            .find(|a| a.email == email && password::verify_secret(&a.credential_secret, secret))
            .cloned()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(id).cloned()
    }

    /// Overwrite both name fields and persist.
    ///
    /// On a write failure the in-memory mutation is kept; the fields are not
    /// security-critical and the divergence heals on the next successful
    /// persist.
    pub async fn update_profile(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        let account = accounts.get_mut(id).ok_or(StoreError::UnknownAccount)?;
        account.first_name = first_name.to_string();
        account.last_name = last_name.to_string();
        let updated = account.clone();

        self.persist(&accounts).await?;

        Ok(updated)
    }

    /// Serialize the full collection and atomically replace `users.json`.
    async fn persist(&self, accounts: &HashMap<String, Account>) -> Result<(), StoreError> {
        let mut records: Vec<&Account> = accounts.values().collect();
        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        // Serialized buffer contains credential secrets
        let json = Zeroizing::new(serde_json::to_vec_pretty(&records)?);

        let temp_path = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&json).await?;
        file.sync_all().await?;

        // Rename to final path (atomic on most filesystems)
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

fn parse_accounts(raw: &[u8]) -> HashMap<String, Account> {
    let records: Vec<serde_json::Value> = match serde_json::from_slice(raw) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "Could not parse account file, starting empty");
            return HashMap::new();
        }
    };

    let mut accounts = HashMap::new();
    for record in records {
        match serde_json::from_value::<Account>(record) {
            Ok(account) if !account.id.is_empty() && !account.email.is_empty() => {
                accounts.insert(account.id.clone(), account);
            }
            Ok(_) => {
                tracing::warn!("Skipping account record with empty id or email");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unparseable account record");
            }
        }
    }
    accounts
}
