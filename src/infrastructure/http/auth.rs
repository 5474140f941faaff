#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::UserIdentity;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub user: Option<UserIdentity>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SsoRedirect {
    url: String,
}

/// Client for the backend's `/auth/*` routes. The identity check is a
/// single attempt; callers decide whether a failure means "go log in".
pub struct AuthClient {
    url: String,
    timeout: String,
}

impl Default for AuthClient {
    fn default() -> AuthClient {
        return AuthClient {
            url: Config::get(ConfigKey::BaseURL),
            timeout: Config::get(ConfigKey::HealthCheckTimeout),
        };
    }
}

impl AuthClient {
    pub async fn me(&self, token: &str) -> Result<UserIdentity> {
        let res = reqwest::Client::new()
            .get(format!("{url}/auth/me", url = self.url))
            .bearer_auth(token)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        if res.is_err() {
            tracing::error!(error = ?res.unwrap_err(), "Identity endpoint is not reachable");
            bail!("Identity endpoint is not reachable");
        }

        let res = res.unwrap();
        if !res.status().is_success() {
            tracing::warn!(status = res.status().as_u16(), "Identity check rejected");
            bail!("Identity check rejected");
        }

        return Ok(res.json::<UserIdentity>().await?);
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let params = [("username", username), ("password", password)];
        let res = reqwest::Client::new()
            .post(format!("{url}/auth/login", url = self.url))
            .form(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(status = res.status().as_u16(), "Login rejected");
            bail!("Login failed, double check your username and password");
        }

        return Ok(res.json::<LoginResponse>().await?);
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<()> {
        let res = reqwest::Client::new()
            .post(format!("{url}/auth/signup", url = self.url))
            .json(request)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!(status = res.status().as_u16(), "Signup rejected");
            bail!("Signup failed");
        }

        return Ok(());
    }

    /// Returns the Google OAuth redirect target for browser-based SSO.
    pub async fn google_login_url(&self) -> Result<String> {
        let res = reqwest::Client::new()
            .get(format!("{url}/auth/google/login", url = self.url))
            .send()
            .await?
            .json::<SsoRedirect>()
            .await?;

        return Ok(res.url);
    }
}
