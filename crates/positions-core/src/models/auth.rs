use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

/// Successful login/register body. Registration may omit the token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
}

impl AuthResponse {
    /// The access token, treating an empty string as missing
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}
