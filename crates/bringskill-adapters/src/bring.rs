//! Bring! REST API adapter.
//!
//! Wraps the four list operations the skill needs: enumerate, add, remove,
//! and (through the [`ShoppingList`] default) membership check.  Every request
//! carries the configured user UUID; the list UUID selects the resource.
//! Any transport failure or non-2xx status surfaces as
//! [`AdapterError::VendorUnavailable`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AdapterError, Result};
use crate::item::ShoppingListItem;
use crate::traits::ShoppingList;

/// Default Bring API base URL.
const DEFAULT_BASE_URL: &str = "https://api.getbring.com/rest/";

/// Client identification the official Android app sends.
const DEFAULT_CLIENT: &str = "android";

/// Default country header.
const DEFAULT_COUNTRY: &str = "DE";

/// The two static identifiers every vendor call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    /// Bring account (user) UUID.
    pub user_uuid: Uuid,
    /// UUID of the shopping list to operate on.
    pub list_uuid: Uuid,
}

/// How a spoken "remove" is carried out on the vendor side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveMode {
    /// Check the item off into the "recently" list, as the app does.
    #[default]
    Recent,
    /// Delete the item outright.
    Delete,
}

impl RemoveMode {
    /// Form field the vendor expects for this mode.
    fn form_field(self) -> &'static str {
        match self {
            Self::Recent => "recently",
            Self::Delete => "remove",
        }
    }
}

/// Connection settings for the Bring API, the `[bring]` config section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BringConfig {
    /// Base URL of the REST API; a trailing slash is added when missing.
    pub base_url: String,
    /// Optional `X-BRING-API-KEY` header value.
    pub api_key: Option<String>,
    /// `X-BRING-CLIENT` header value.
    pub client: String,
    /// `X-BRING-COUNTRY` header value.
    pub country: String,
    /// Vendor operation used for a spoken "remove".
    pub remove_mode: RemoveMode,
}

impl Default for BringConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            client: DEFAULT_CLIENT.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            remove_mode: RemoveMode::default(),
        }
    }
}

/// Body of `GET bringlists/{list}`.
#[derive(Debug, Clone, Default, Deserialize)]
struct ListResponse {
    #[serde(default)]
    purchase: Vec<ShoppingListItem>,
}

/// Bring REST API client.
pub struct BringClient {
    /// Unique identifier for this adapter instance.
    id: String,
    credentials: Credentials,
    config: BringConfig,
    /// Fully resolved `.../bringlists/{list_uuid}` endpoint.
    list_url: url::Url,
    /// HTTP client for making requests.
    client: reqwest::Client,
}

impl BringClient {
    /// Create a client for the given credentials.
    ///
    /// Fails only when the configured base URL is not a valid URL.
    pub fn new(id: &str, credentials: Credentials, config: BringConfig) -> Result<Self> {
        let list_url = list_url(&config.base_url, &credentials.list_uuid)?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("bringskill/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Ok(Self {
            id: id.to_string(),
            credentials,
            config,
            list_url,
            client,
        })
    }

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    /// Attach the vendor headers to a request.
    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("X-BRING-USER-UUID", self.credentials.user_uuid.to_string())
            .header("X-BRING-CLIENT", &self.config.client)
            .header("X-BRING-COUNTRY", &self.config.country);
        match &self.config.api_key {
            Some(key) => request.header("X-BRING-API-KEY", key),
            None => request,
        }
    }

    /// Send a request and reject anything but a 2xx status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
    ) -> Result<reqwest::Response> {
        let response = self
            .with_headers(request)
            .send()
            .await
            .map_err(|e| AdapterError::vendor(operation, format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::vendor(
                operation,
                format!("Bring API returned {}", status.as_u16()),
            ));
        }
        Ok(response)
    }

    /// Issue a `PUT` against the list with the given form fields.
    async fn put_list(&self, operation: &str, fields: &[(&str, &str)]) -> Result<()> {
        let request = self.client.put(self.list_url.clone()).form(fields);
        self.send(request, operation).await?;
        Ok(())
    }
}

/// Build the list endpoint from the base URL and list UUID.
fn list_url(base_url: &str, list_uuid: &Uuid) -> Result<url::Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    let base = url::Url::parse(&base)
        .map_err(|e| AdapterError::ConfigError(format!("invalid Bring base URL `{base}`: {e}")))?;
    base.join(&format!("bringlists/{list_uuid}"))
        .map_err(|e| AdapterError::ConfigError(format!("invalid Bring list URL: {e}")))
}

/// Form fields for a `PUT` that sets exactly one of the item fields.
///
/// The vendor expects all fields present, with the unused ones empty.
fn form_fields<'a>(field: &str, name: &'a str, specification: &'a str) -> [(&'static str, &'a str); 5] {
    let pick = |key: &str| if key == field { name } else { "" };
    [
        ("purchase", pick("purchase")),
        ("recently", pick("recently")),
        ("specification", specification),
        ("remove", pick("remove")),
        ("sender", "null"),
    ]
}

#[async_trait]
impl ShoppingList for BringClient {
    fn id(&self) -> &str {
        &self.id
    }

    async fn list_items(&self) -> Result<Vec<ShoppingListItem>> {
        let request = self.client.get(self.list_url.clone());
        let response = self.send(request, "list_items").await?;
        let body: ListResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::vendor("list_items", format!("unreadable list: {e}")))?;

        debug!(id = %self.id, count = body.purchase.len(), "fetched shopping list");
        Ok(body.purchase)
    }

    async fn add_item(&self, name: &str, specification: Option<&str>) -> Result<()> {
        let fields = form_fields("purchase", name, specification.unwrap_or(""));
        self.put_list("add_item", &fields).await?;
        info!(id = %self.id, item = name, "item added to shopping list");
        Ok(())
    }

    async fn remove_item(&self, name: &str) -> Result<()> {
        let mode = self.config.remove_mode;
        let fields = form_fields(mode.form_field(), name, "");
        self.put_list("remove_item", &fields).await?;
        info!(id = %self.id, item = name, mode = ?mode, "item removed from shopping list");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            user_uuid: Uuid::parse_str("11111111-2222-3333-4444-555555555555").unwrap(),
            list_uuid: Uuid::parse_str("aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee").unwrap(),
        }
    }

    #[test]
    fn list_url_appends_missing_slash() {
        let url = list_url("https://api.getbring.com/rest", &credentials().list_uuid).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.getbring.com/rest/bringlists/aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee"
        );
    }

    #[test]
    fn list_url_rejects_garbage() {
        let result = list_url("not a url", &credentials().list_uuid);
        assert!(matches!(result, Err(AdapterError::ConfigError(_))));
    }

    #[test]
    fn form_fields_purchase_sets_only_purchase() {
        let fields = form_fields("purchase", "Milch", "2 Liter");
        assert_eq!(fields[0], ("purchase", "Milch"));
        assert_eq!(fields[1], ("recently", ""));
        assert_eq!(fields[2], ("specification", "2 Liter"));
        assert_eq!(fields[3], ("remove", ""));
        assert_eq!(fields[4], ("sender", "null"));
    }

    #[test]
    fn remove_mode_selects_form_field() {
        assert_eq!(RemoveMode::Recent.form_field(), "recently");
        assert_eq!(RemoveMode::Delete.form_field(), "remove");
        assert_eq!(RemoveMode::default(), RemoveMode::Recent);
    }

    #[test]
    fn bring_config_defaults() {
        let config = BringConfig::default();
        assert_eq!(config.base_url, "https://api.getbring.com/rest/");
        assert_eq!(config.client, "android");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn client_keeps_id() {
        let client = BringClient::new("bring-test", credentials(), BringConfig::default()).unwrap();
        assert_eq!(client.id(), "bring-test");
    }

    #[test]
    fn list_response_ignores_unknown_fields() {
        let body: ListResponse = serde_json::from_str(
            r#"{"uuid":"x","status":"SHARED","purchase":[{"name":"Milch","specification":""}],"recently":[{"name":"Brot"}]}"#,
        )
        .unwrap();
        assert_eq!(body.purchase, vec![ShoppingListItem {
            name: "Milch".into(),
            specification: Some(String::new()),
        }]);
    }
}
