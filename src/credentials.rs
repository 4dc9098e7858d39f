use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

pub const ENV_CLIENT_ID: &str = "AERIS_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "AERIS_CLIENT_SECRET";

/// Application id and secret key, appended to every top-level request as
/// `client_id` / `client_secret`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    id: String,
    secret: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let secret = secret.into();
        if id.is_empty() {
            return Err(Error::MissingAppId);
        }
        if secret.is_empty() {
            return Err(Error::MissingSecretKey);
        }
        Ok(Self { id, secret })
    }

    /// Read `AERIS_CLIENT_ID` and `AERIS_CLIENT_SECRET`.
    pub fn from_env() -> Result<Self> {
        let id = std::env::var(ENV_CLIENT_ID).map_err(|_| Error::MissingEnv(ENV_CLIENT_ID))?;
        let secret =
            std::env::var(ENV_CLIENT_SECRET).map_err(|_| Error::MissingEnv(ENV_CLIENT_SECRET))?;
        Self::new(id.trim(), secret.trim())
    }

    /// Read the id and secret from two text files; surrounding whitespace is ignored.
    pub fn from_files(id_path: impl AsRef<Path>, secret_path: impl AsRef<Path>) -> Result<Self> {
        let id = fs::read_to_string(id_path)?;
        let secret = fs::read_to_string(secret_path)?;
        Self::new(id.trim(), secret.trim())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub(crate) fn query_pairs(&self) -> [(String, String); 2] {
        [
            ("client_id".to_string(), self.id.clone()),
            ("client_secret".to_string(), self.secret.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("secret", &"<redacted>")
            .finish()
    }
}
