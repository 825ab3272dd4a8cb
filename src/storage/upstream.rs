//! RecordStore backed by the upstream backend over HTTP
//!
//! In upstream mode nothing is kept locally: every store call is one request
//! to `{base_url}/{resource}`. Requests carry the current access token; a 401
//! triggers exactly one token refresh followed by one retry.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::UpstreamConfig;
use crate::core::error::{AdminError, AdminResult};
use crate::core::record::Record;
use crate::core::store::RecordStore;

/// Access/refresh token pair returned by `POST /auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Default)]
struct Credentials {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// HTTP client for the upstream backend
///
/// Cloned handles share credentials, so a refresh done by one store is seen
/// by all of them.
#[derive(Clone)]
pub struct UpstreamClient {
    base_url: String,
    http: Client,
    credentials: Arc<RwLock<Credentials>>,
}

impl UpstreamClient {
    pub fn new(config: &UpstreamConfig) -> AdminResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            credentials: Arc::new(RwLock::new(Credentials {
                access_token: config.access_token.clone(),
                refresh_token: config.refresh_token.clone(),
            })),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Current access token, if any
    pub async fn access_token(&self) -> Option<String> {
        self.credentials.read().await.access_token.clone()
    }

    async fn attempt(&self, method: &Method, path: &str, body: Option<&Value>) -> AdminResult<Response> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = self.access_token().await {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Send a request, refreshing the access token once on 401
    ///
    /// The returned response has any status except 401; callers decide how to
    /// treat 404 and the other error statuses.
    pub async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> AdminResult<Response> {
        let response = self.attempt(&method, path, body).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::warn!(%method, path, "upstream answered 401, refreshing access token");
        self.refresh().await?;

        let retried = self.attempt(&method, path, body).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            return Err(AdminError::unauthorized("upstream rejected refreshed credentials"));
        }
        Ok(retried)
    }

    /// Exchange a refresh token for a new token pair without touching stored credentials
    pub async fn exchange_refresh_token(&self, refresh_token: &str) -> AdminResult<TokenPair> {
        let response = self
            .http
            .post(self.url("auth/refresh"))
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "token refresh rejected");
            return Err(AdminError::unauthorized("token refresh failed"));
        }

        Ok(response.json::<TokenPair>().await?)
    }

    /// Refresh the stored access token using the stored refresh token
    pub async fn refresh(&self) -> AdminResult<()> {
        let refresh_token = self
            .credentials
            .read()
            .await
            .refresh_token
            .clone()
            .ok_or_else(|| AdminError::unauthorized("no refresh token available"))?;

        let pair = self.exchange_refresh_token(&refresh_token).await?;

        let mut credentials = self.credentials.write().await;
        credentials.access_token = Some(pair.access_token);
        if let Some(rotated) = pair.refresh_token {
            credentials.refresh_token = Some(rotated);
        }
        tracing::info!("upstream access token refreshed");
        Ok(())
    }
}

/// Turn a non-success response into [`AdminError::Upstream`]
async fn ensure_success(response: Response) -> AdminResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "upstream request failed");
    Err(AdminError::Upstream {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
    })
}

/// Decode a list payload: a bare array or an object with a `data` array
fn decode_list<T: Record>(payload: Value) -> AdminResult<Vec<T>> {
    let items = match payload {
        Value::Array(_) => payload,
        Value::Object(mut object) => object.remove("data").ok_or_else(|| AdminError::Upstream {
            status: StatusCode::BAD_GATEWAY.as_u16(),
            message: format!("{} list payload has no data field", T::resource_name()),
        })?,
        _ => {
            return Err(AdminError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                message: format!("unexpected {} list payload", T::resource_name()),
            });
        }
    };
    Ok(serde_json::from_value(items)?)
}

/// Record store forwarding every call to the upstream backend
pub struct UpstreamStore<T> {
    client: UpstreamClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> UpstreamStore<T> {
    pub fn new(client: UpstreamClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    fn item_path(id: u64) -> String {
        format!("{}/{}", T::resource_name(), id)
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for UpstreamStore<T> {
    async fn list(&self) -> AdminResult<Vec<T>> {
        let response = self.client.send(Method::GET, T::resource_name(), None).await?;
        let payload: Value = ensure_success(response).await?.json().await?;
        let records = decode_list::<T>(payload)?;
        tracing::debug!(resource = T::resource_name(), count = records.len(), "fetched upstream list");
        Ok(records)
    }

    async fn get(&self, id: u64) -> AdminResult<Option<T>> {
        let response = self.client.send(Method::GET, &Self::item_path(id), None).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(ensure_success(response).await?.json().await?))
    }

    async fn insert(&self, record: T) -> AdminResult<T> {
        let body = serde_json::to_value(&record)?;
        let response = self
            .client
            .send(Method::POST, T::resource_name(), Some(&body))
            .await?;
        let payload: Value = ensure_success(response).await?.json().await?;
        Ok(serde_json::from_value(payload).unwrap_or(record))
    }

    async fn update(&self, record: T) -> AdminResult<Option<T>> {
        let body = serde_json::to_value(&record)?;
        let response = self
            .client
            .send(Method::PUT, &Self::item_path(record.id()), Some(&body))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        // Acknowledgement bodies are accepted; the sent record is returned then
        let payload = response.json::<Value>().await.unwrap_or(Value::Null);
        Ok(Some(serde_json::from_value(payload).unwrap_or(record)))
    }

    async fn delete(&self, id: u64) -> AdminResult<bool> {
        let response = self
            .client
            .send(Method::DELETE, &Self::item_path(id), None)
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        ensure_success(response).await?;
        Ok(true)
    }
}
