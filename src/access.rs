//! Permission checks for mutating API calls.

use serde::{Deserialize, Serialize};

/// Capabilities the API checks, keyed by name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Create groups and generate schedules.
    ManageCompetitions,
    /// Save edited fixtures.
    ManageMatches,
}

impl Permission {
    pub fn name(self) -> &'static str {
        match self {
            Permission::ManageCompetitions => "manage_competitions",
            Permission::ManageMatches => "manage_matches",
        }
    }
}

/// Answers "may the holder of this token do that?".
pub trait Authorizer {
    fn has_permission(&self, token: Option<&str>, permission: Permission) -> bool;
}

/// Single admin token holding every permission. Without a configured token nothing is allowed.
#[derive(Clone, Debug, Default)]
pub struct TokenAuthorizer {
    admin_token: Option<String>,
}

impl TokenAuthorizer {
    pub fn new(admin_token: Option<String>) -> Self {
        Self {
            admin_token: admin_token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.admin_token.is_some()
    }
}

impl Authorizer for TokenAuthorizer {
    fn has_permission(&self, token: Option<&str>, permission: Permission) -> bool {
        let allowed = matches!(
            (self.admin_token.as_deref(), token),
            (Some(expected), Some(given)) if expected == given
        );
        if !allowed {
            log::debug!("Denied {}", permission.name());
        }
        allowed
    }
}

/// Token from an `Authorization: Bearer <token>` header value. The scheme is case-insensitive.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}
