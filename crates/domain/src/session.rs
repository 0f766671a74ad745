use derive_more::AsRef;
use serde::{Deserialize, Serialize};

use crate::{CreateError, DeleteError, ReadError};

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn request_session(&self, email: &str, password: &str) -> Result<Session, ReadError>;
    async fn initialize_session(&self) -> Result<Session, ReadError>;
    async fn register(&self, email: &str, password: &str) -> Result<(), CreateError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn request_session(&self, email: &str, password: &str) -> Result<Session, ReadError>;
    async fn get_session(&self) -> Result<Session, ReadError>;
    async fn register(&self, email: &str, password: &str) -> Result<(), CreateError>;
    async fn delete_session(&self) -> Result<(), DeleteError>;
}

/// Bearer token issued by the login endpoint.
#[derive(AsRef, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl From<String> for AccessToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An authenticated session: the access token together with the email it
/// was issued for. Both are persisted to local storage so a reload keeps
/// the user signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: AccessToken,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_authorization_header() {
        let token = AccessToken::from(String::from("abc.def.ghi"));
        assert_eq!(token.authorization_header(), "Bearer abc.def.ghi");
    }
}
