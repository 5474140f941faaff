#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use chrono::Utc;
use tokio::fs;

use crate::domain::models::CachedSession;
use crate::domain::models::UserIdentity;
use crate::infrastructure::http::auth::AuthClient;

/// Persists the login session between runs as a single JSON file in the
/// cache directory.
pub struct SessionStore {
    cache_dir: path::PathBuf,
}

impl Default for SessionStore {
    fn default() -> SessionStore {
        return SessionStore {
            cache_dir: dirs::cache_dir().unwrap().join("dossier"),
        };
    }
}

impl SessionStore {
    fn session_file(&self) -> path::PathBuf {
        return self.cache_dir.join("session.json");
    }

    pub async fn load(&self) -> Result<Option<CachedSession>> {
        let file = self.session_file();
        if !file.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file).await?;
        return Ok(Some(serde_json::from_str::<CachedSession>(&contents)?));
    }

    pub async fn save(&self, access_token: &str, user: Option<UserIdentity>) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir).await?;
        }

        let session = CachedSession {
            access_token: access_token.to_string(),
            user,
            timestamp: Utc::now().to_rfc3339(),
        };

        fs::write(self.session_file(), serde_json::to_string_pretty(&session)?).await?;
        return Ok(());
    }

    pub async fn clear(&self) -> Result<()> {
        let file = self.session_file();
        if file.exists() {
            fs::remove_file(file).await?;
        }
        return Ok(());
    }

    /// The startup auth gate. A cached identity is trusted as-is; a bare
    /// token is exchanged for one through the identity endpoint. No
    /// session at all means the user has to log in first.
    pub async fn resolve(&self, auth: &AuthClient) -> Result<(String, UserIdentity)> {
        let Some(session) = self.load().await? else {
            bail!("No session found");
        };

        if let Some(user) = session.user {
            return Ok((session.access_token, user));
        }

        let user = auth.me(&session.access_token).await?;
        self.save(&session.access_token, Some(user.clone())).await?;

        return Ok((session.access_token, user));
    }
}
