//! Akeyless secrets store over the V2 REST gateway API

use crate::error::SourceError;
use crate::sources::{ListedItem, SecretStore};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ACCESS_TYPE_API_KEY: &str = "api_key";

/// Authenticated Akeyless client
pub struct AkeylessClient {
    http: reqwest::Client,
    gateway_url: String,
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct AuthRequest<'a> {
    access_id: &'a str,
    access_key: &'a str,
    access_type: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct ListItemsRequest<'a> {
    token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pagination_token: Option<&'a str>,
}

#[derive(Deserialize)]
struct ListItemsResponse {
    #[serde(default)]
    items: Vec<ItemEntry>,
    #[serde(default)]
    next_page: Option<String>,
}

#[derive(Deserialize)]
struct ItemEntry {
    item_name: String,
    item_type: String,
}

#[derive(Serialize)]
struct GetSecretValueRequest<'a> {
    names: [&'a str; 1],
    token: &'a str,
}

impl AkeylessClient {
    /// Exchange an access id and key for a token
    pub async fn authenticate(
        gateway_url: &str,
        access_id: &str,
        access_key: &str,
    ) -> Result<Self, SourceError> {
        let mut client = Self::with_token(gateway_url, String::new())?;

        let response: AuthResponse = client
            .post(
                "auth",
                &AuthRequest {
                    access_id,
                    access_key,
                    access_type: ACCESS_TYPE_API_KEY,
                },
            )
            .await
            .map_err(|e| SourceError::Authentication(e.to_string()))?;

        client.token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SourceError::Authentication("no token received".to_string()))?;

        info!("Authenticated with Akeyless at {}", client.gateway_url);
        Ok(client)
    }

    /// Build a client around an already-issued token
    pub fn with_token(gateway_url: &str, token: impl Into<String>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn gateway_url(&self) -> &str {
        &self.gateway_url
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<reqwest::Response, SourceError> {
        let url = format!("{}/{}", self.gateway_url, endpoint);
        Ok(self.http.post(&url).json(body).send().await?)
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, SourceError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.send(endpoint, body).await?;
        decode(endpoint, response).await
    }
}

async fn decode<R: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<R, SourceError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SourceError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    response.json::<R>().await.map_err(|e| SourceError::Decode {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

#[async_trait]
impl SecretStore for AkeylessClient {
    async fn list_children(&self, path: Option<&str>) -> Result<Vec<ListedItem>, SourceError> {
        let mut items = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let request = ListItemsRequest {
                token: &self.token,
                path,
                pagination_token: page.as_deref(),
            };
            let response: ListItemsResponse = self.post("list-items", &request).await?;

            items.extend(
                response
                    .items
                    .into_iter()
                    .map(|item| ListedItem::new(item.item_name, item.item_type)),
            );

            match response.next_page.filter(|p| !p.is_empty()) {
                Some(next) if page.as_deref() == Some(next.as_str()) => {
                    warn!(page = %next, "Gateway repeated a pagination token, stopping");
                    break;
                }
                Some(next) => {
                    debug!("Following list-items pagination for {:?}", path);
                    page = Some(next);
                }
                None => break,
            }
        }

        Ok(items)
    }

    async fn get_value(&self, identifier: &str) -> Result<Option<String>, SourceError> {
        let request = GetSecretValueRequest {
            names: [identifier],
            token: &self.token,
        };
        let response = self.send("get-secret-value", &request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let mut values: HashMap<String, serde_json::Value> =
            decode("get-secret-value", response).await?;

        match values.remove(identifier) {
            None => Ok(None),
            Some(serde_json::Value::String(value)) => Ok(Some(value)),
            // Structured values are exported as their JSON text
            Some(other) => Ok(Some(other.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "akeyless"
    }
}

impl std::fmt::Debug for AkeylessClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AkeylessClient")
            .field("gateway_url", &self.gateway_url)
            .finish_non_exhaustive()
    }
}
