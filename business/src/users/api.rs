//! Client for the user directory backend.
//!
//! This module performs network IO against `{api}/users` and is meant to be
//! used by commands only. Every request carries the bearer token captured at
//! construction; it is never re-read afterwards.

use std::any::Any;

use reqwest::Url;
use roster_states::{State, snapshot_clone};
use thiserror::Error;

use crate::BusinessConfig;
use crate::http::{Client, HttpError, RequestBuilder};
use crate::users::model::{User, UserId};

#[derive(Debug, Error)]
pub enum UserDirectoryError {
    #[error("invalid API url {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error("API returned status: {status}")]
    Status { status: u16 },

    #[error("failed to parse {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// A typed API result.
pub type ApiResult<T> = Result<T, UserDirectoryError>;

/// Handle to `GET /users`, `PUT /users/{id}` and `DELETE /users/{id}`.
#[derive(Debug, Clone)]
pub struct UserDirectoryClient {
    http: Client,
    api_url: String,
    bearer_token: Option<String>,
}

impl UserDirectoryClient {
    pub fn new(config: &BusinessConfig) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url().as_str().to_owned(),
            bearer_token: config.bearer_token.clone(),
        }
    }

    /// `{api}/users` or `{api}/users/{id}` with the id percent-encoded as one segment.
    ///
    /// Ids `.` and `..` are rejected: URL normalization would drop them and
    /// the request would hit the collection instead.
    fn endpoint(&self, id: Option<UserId>) -> ApiResult<String> {
        let invalid = |message: &str| UserDirectoryError::InvalidUrl {
            url: self.api_url.clone(),
            message: message.to_owned(),
        };

        let mut url = Url::parse(&self.api_url).map_err(|e| invalid(&e.to_string()))?;
        {
            let Ok(mut segments) = url.path_segments_mut() else {
                return Err(invalid("URL cannot be a base"));
            };
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                let segment = id.to_string();
                if matches!(segment.as_str(), "." | "..") {
                    return Err(invalid(&format!("user id {segment:?} is not a path segment")));
                }
                segments.push(&segment);
            }
        }
        Ok(url.into())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(self.bearer_token.as_deref())
    }

    /// GET `/users`
    ///
    /// The body must be a JSON array. Records that do not decode as a [`User`]
    /// are logged and skipped so one bad entry does not hide the rest.
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let url = self.endpoint(None)?;
        let response = self.authorized(self.http.get(url)).send().await?;

        if !response.is_success() {
            return Err(UserDirectoryError::Status {
                status: response.status,
            });
        }

        let records = response
            .json::<Vec<serde_json::Value>>()
            .map_err(|source| UserDirectoryError::Decode {
                what: "user list",
                source,
            })?;

        let received = records.len();
        let users: Vec<User> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("UserDirectoryClient: Skipping unreadable user record: {e}");
                    None
                }
            })
            .collect();
        if users.len() < received {
            log::warn!(
                "UserDirectoryClient: Kept {} of {received} user records",
                users.len()
            );
        }
        Ok(users)
    }

    /// PUT `/users/{id}`
    /// Body: `{ "id": ..., "name": "...", "email": "..." }`
    ///
    /// The response body is ignored.
    pub async fn update_user(&self, user: &User) -> ApiResult<()> {
        let url = self.endpoint(Some(user.id))?;
        let request = self
            .authorized(self.http.put(url))
            .json(user)
            .map_err(UserDirectoryError::Encode)?;

        let response = request.send().await?;
        if !response.is_success() {
            return Err(UserDirectoryError::Status {
                status: response.status,
            });
        }
        Ok(())
    }

    /// DELETE `/users/{id}`
    ///
    /// The response body is ignored.
    pub async fn delete_user(&self, id: UserId) -> ApiResult<()> {
        let url = self.endpoint(Some(id))?;
        let response = self.authorized(self.http.delete(url)).send().await?;

        if !response.is_success() {
            return Err(UserDirectoryError::Status {
                status: response.status,
            });
        }
        Ok(())
    }
}

impl State for UserDirectoryClient {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}
