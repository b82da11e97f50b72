//! Typed HTTP client for the users API.
//!
//! Used by the `users-cli` binary and the integration tests.

use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

use crate::users::User;

/// Error type for client calls.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("undecodable response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client bound to one service base URL (e.g. `http://localhost:3000`).
#[derive(Debug, Clone)]
pub struct UsersClient {
    client: Client,
    base_url: String,
}

impl UsersClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /users`
    pub async fn list(&self) -> Result<Vec<User>, ClientError> {
        let res = self.client.get(self.url("/users")).send().await?;
        Ok(expect_status(res, StatusCode::OK).await?.json().await?)
    }

    /// `GET /users/{id}`. `None` for an empty body or a 404.
    pub async fn get(&self, id: i64) -> Result<Option<User>, ClientError> {
        let res = self.client.get(self.url(&format!("/users/{id}"))).send().await?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let bytes = expect_status(res, StatusCode::OK).await?.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// `POST /users`. Returns the updated collection.
    pub async fn create(&self, user: &User) -> Result<Vec<User>, ClientError> {
        let res = self.client.post(self.url("/users")).json(user).send().await?;
        Ok(expect_status(res, StatusCode::CREATED).await?.json().await?)
    }

    /// `PUT /users/{id}`. Returns the echoed body.
    pub async fn replace(&self, id: i64, user: &User) -> Result<User, ClientError> {
        let res = self
            .client
            .put(self.url(&format!("/users/{id}")))
            .json(user)
            .send()
            .await?;
        Ok(expect_status(res, StatusCode::OK).await?.json().await?)
    }

    /// `DELETE /users/{id}`
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let res = self
            .client
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await?;
        expect_status(res, StatusCode::NO_CONTENT).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn expect_status(res: Response, expected: StatusCode) -> Result<Response, ClientError> {
    let status = res.status();
    if status == expected {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}
