//! Wire types for the user directory.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use ustr::Ustr;

/// Stable user identifier.
///
/// The backend may send ids as JSON strings or unsigned integers. The original
/// shape is kept so `PUT` bodies echo the id exactly as it was received.
/// String ids are interned since they are compared on every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawUserId", into = "RawUserId")]
pub enum UserId {
    Number(u64),
    Text(Ustr),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Number(u64),
    Text(String),
}

impl From<RawUserId> for UserId {
    fn from(raw: RawUserId) -> Self {
        match raw {
            RawUserId::Number(n) => Self::Number(n),
            RawUserId::Text(s) => Self::Text(Ustr::from(&s)),
        }
    }
}

impl From<UserId> for RawUserId {
    fn from(id: UserId) -> Self {
        match id {
            UserId::Number(n) => Self::Number(n),
            UserId::Text(s) => Self::Text(s.as_str().to_owned()),
        }
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::Text(Ustr::from(s))
    }
}

impl From<u64> for UserId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s.as_str()),
        }
    }
}

/// A user as returned by `GET /users` and sent by `PUT /users/{id}`.
///
/// Unknown fields in responses are ignored. A missing or `null` name or
/// email reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Working copy of one user's editable fields while the edit dialog is open.
///
/// The id is fixed at creation; only `name` and `email` change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    id: UserId,
    pub name: String,
    pub email: String,
}

impl EditDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Both fields are present. No format checks are made.
    pub fn has_required_fields(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}
