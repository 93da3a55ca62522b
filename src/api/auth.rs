use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// On success the session holds the new token and username.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let token: TokenResponse = self
            .post_form("/api/auth/login", &Credentials { username, password })
            .await?;

        let mut session = self.session().write();
        session.token = Some(token.access_token.clone());
        session.username = Some(username.to_string());
        drop(session);

        tracing::info!(username, "logged in");
        Ok(token)
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<RegisteredUser, ApiError> {
        self.post_json("/api/auth/register", &Credentials { username, password })
            .await
    }

    pub fn logout(&self) {
        self.session().write().clear();
    }
}
