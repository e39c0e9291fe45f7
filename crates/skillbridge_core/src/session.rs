//! Session identity handed to the pipeline.
//!
//! Login and logout own the lifecycle of this value; everything else only
//! reads it. It is passed in explicitly instead of being looked up from
//! process-wide state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UserRole {
    Volunteer,
    Nonprofit,
    Hr,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Volunteer => "volunteer",
            UserRole::Nonprofit => "nonprofit",
            UserRole::Hr => "hr",
        }
    }
}

impl FromStr for UserRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "volunteer" => Ok(UserRole::Volunteer),
            "nonprofit" | "nonprofit_admin" | "admin" => Ok(UserRole::Nonprofit),
            "hr" => Ok(UserRole::Hr),
            _ => Err(CoreError::UnknownRole(s.to_string())),
        }
    }
}

impl TryFrom<String> for UserRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cached user object stored at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub token: String,
    pub user: SessionUser,
}

impl SessionContext {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user.id
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_session_decodes_cached_user() {
        let session: SessionContext = serde_json::from_value(json!({
            "token": "abc",
            "user": { "id": 7, "name": "Sam", "role": "Volunteer" }
        }))
        .unwrap();
        assert_eq!(session.user_id(), 7);
        assert_eq!(session.user.role, UserRole::Volunteer);
        assert_eq!(session.bearer(), "Bearer abc");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = SessionContext::new(
            "secret-token",
            SessionUser {
                id: 1,
                name: String::new(),
                email: None,
                role: UserRole::Hr,
            },
        );
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}
