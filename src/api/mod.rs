//! Typed client for the Structures backend.
//!
//! Every endpoint goes through [`ApiClient`], which attaches the bearer token
//! from the shared session and turns non-2xx or non-JSON responses into
//! [`ApiError`]. Requests are never retried.

pub mod achievements;
pub mod auth;
pub mod error;
pub mod forums;
pub mod hints;
pub mod leaderboards;
pub mod levels;
pub mod problems;
pub mod profile;
pub mod snippets;
pub mod streaks;

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{validate_base_url, Config};
use crate::session::SharedSession;

pub use error::ApiError;

pub(crate) type Query = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SharedSession,
}

impl ApiClient {
    pub fn new(config: &Config, session: SharedSession) -> Result<Self, ApiError> {
        Self::from_parts(&config.api_base_url, config.request_timeout, session)
    }

    pub fn from_parts(
        base_url: &str,
        timeout: Duration,
        session: SharedSession,
    ) -> Result<Self, ApiError> {
        let base_url = validate_base_url(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            http,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get_json("/health", Vec::new()).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.session.read().bearer_token().map(str::to_owned);
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query,
    ) -> Result<T, ApiError> {
        tracing::debug!(method = "GET", path, "api request");
        let builder = self.http.get(self.url(path)).query(&query);
        self.send(builder).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = "POST", path, "api request");
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    pub(crate) async fn post_form<B, T>(&self, path: &str, form: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = "POST", path, "api request");
        self.send(self.http.post(self.url(path)).form(form)).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = "PUT", path, "api request");
        self.send(self.http.put(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.authorize(builder).send().await?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            let had_token = self.session.read().bearer_token().is_some();
            if had_token {
                tracing::warn!("backend rejected the stored token, clearing session");
                self.session.write().clear();
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::HttpStatus { status, body });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %String::from_utf8_lossy(&bytes),
                "failed to parse backend response"
            );
            ApiError::Json(e)
        })
    }
}
