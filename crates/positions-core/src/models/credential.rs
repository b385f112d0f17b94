use serde::{Deserialize, Serialize};

/// A bearer token plus the name shown in the dashboard header.
///
/// There is no client-side expiry. The API rejects requests once the token
/// is no longer accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Display name, or an empty string when none was stored
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or_default()
    }
}
