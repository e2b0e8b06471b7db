//! Request plumbing shared by every backend call.

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use aula_auth::TokenStore;

use crate::error::ApiError;

/// Correlation id minted per outgoing request.
///
/// Views key state updates to the id of the request that produced them, so
/// responses resolving out of order cannot clobber newer data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RequestId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// File payload for multipart endpoints (attachments, submissions).
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Responses some list endpoints wrap as `{status, message, data}`.
/// Only `data` matters to the client; the rest is ignored.
#[derive(serde::Deserialize)]
pub(crate) struct Envelope<T> {
    pub(crate) data: T,
}

/// HTTP client for the LMS backend.
///
/// Cheap to clone; the token store is shared. Mutating calls return `()`:
/// callers always re-issue the corresponding query instead of patching local
/// state from mutation response bodies.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, tokens: Arc<dyn TokenStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the current bearer token (read now, not at construction), send,
    /// and enforce a success status.
    async fn send(
        &self,
        req: RequestBuilder,
        method: &'static str,
        path: &str,
    ) -> Result<Response, ApiError> {
        let request_id = RequestId::new();

        let req = match self.tokens.load() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        tracing::debug!(%request_id, method, path, "issuing API request");

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(%request_id, method, path, status = status.as_u16(), "API request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(self.http.get(self.url(path)), "GET", path).await?;
        decode_body(resp).await
    }

    /// GET an endpoint that wraps its payload in an envelope.
    pub(crate) async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let envelope: Envelope<T> = self.get_json(path).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn post_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.http.post(self.url(path)).json(body), "POST", path)
            .await?;
        Ok(())
    }

    pub(crate) async fn post_json_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .send(self.http.post(self.url(path)).json(body), "POST", path)
            .await?;
        decode_body(resp).await
    }

    pub(crate) async fn put_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.http.put(self.url(path)).json(body), "PUT", path)
            .await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(path)), "DELETE", path)
            .await?;
        Ok(())
    }

    /// DELETE with a JSON body (the roster removal endpoint wants one).
    pub(crate) async fn delete_json<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(path)).json(body), "DELETE", path)
            .await?;
        Ok(())
    }

    pub(crate) async fn post_multipart(&self, path: &str, form: Form) -> Result<(), ApiError> {
        self.send(self.http.post(self.url(path)).multipart(form), "POST", path)
            .await?;
        Ok(())
    }

    pub(crate) async fn put_multipart(&self, path: &str, form: Form) -> Result<(), ApiError> {
        self.send(self.http.put(self.url(path)).multipart(form), "PUT", path)
            .await?;
        Ok(())
    }
}

async fn decode_body<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
