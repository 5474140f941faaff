use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The record returned by `GET /auth/me`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub subscription_plan: Option<String>,
}

impl UserIdentity {
    pub fn display_name(&self) -> String {
        return self.name.clone().unwrap_or_else(|| {
            return self.username.to_string();
        });
    }

    pub fn plan(&self) -> String {
        return self
            .subscription_plan
            .clone()
            .unwrap_or_else(|| return "Free".to_string());
    }
}

/// What the session store keeps on disk between runs: the bearer token
/// from the last login and the identity it resolved to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedSession {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<UserIdentity>,
    pub timestamp: String,
}
