use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::domain::account::{Account, CreateAccount};
use crate::domain::business_partner::{BusinessPartner, CreateBusinessPartner};
use crate::domain::ports::{BackofficeApi, Page};
use crate::domain::reference::ResourceId;
use crate::domain::transaction::{CreateExchange, CreatePayment, Transaction};
use crate::error::{ApiError, Result};

const LD_JSON: &str = "application/ld+json";

/// Paginated collection envelope wrapping every list response. Both fields
/// are optional; a missing member sequence means an empty collection.
#[derive(Debug, Deserialize)]
struct Collection<T> {
    #[serde(rename = "hydra:member")]
    member: Option<Vec<T>>,
    #[serde(rename = "hydra:totalItems")]
    total_items: Option<u64>,
}

impl<T> From<Collection<T>> for Page<T> {
    fn from(collection: Collection<T>) -> Self {
        Self {
            items: collection.member.unwrap_or_default(),
            total_items: collection.total_items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `BackofficeApi` over HTTP(S) via reqwest. Stateless between calls: no
/// caching, no retries, no timeouts; each request resolves or fails once.
#[derive(Debug, Clone)]
pub struct HttpBackofficeApi {
    base_url: String,
    http: Client,
}

impl HttpBackofficeApi {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(LD_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(LD_JSON));
        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: config.base_url,
            http,
        })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        debug!(%method, path, "issuing request");
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(body) = body {
            // Serialized by hand so the ld+json content type survives.
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Page<T>> {
        let collection: Collection<T> = self.get(path).await?;
        Ok(collection.into())
    }
}

#[async_trait]
impl BackofficeApi for HttpBackofficeApi {
    async fn list_business_partners(&self) -> Result<Page<BusinessPartner>> {
        self.list("/api/business_partners").await
    }

    async fn get_business_partner(&self, id: ResourceId) -> Result<BusinessPartner> {
        self.get(&format!("/api/business_partners/{id}")).await
    }

    async fn create_business_partner(
        &self,
        input: CreateBusinessPartner,
    ) -> Result<BusinessPartner> {
        self.post("/api/business_partners", &input).await
    }

    async fn list_accounts(&self) -> Result<Page<Account>> {
        self.list("/api/accounts").await
    }

    async fn get_account(&self, id: ResourceId) -> Result<Account> {
        self.get(&format!("/api/accounts/{id}")).await
    }

    async fn create_account(&self, input: CreateAccount) -> Result<Account> {
        self.post("/api/accounts", &input).await
    }

    async fn list_transactions(&self) -> Result<Page<Transaction>> {
        self.list("/api/transactions").await
    }

    async fn get_transaction(&self, id: ResourceId) -> Result<Transaction> {
        self.get(&format!("/api/transactions/{id}")).await
    }

    async fn create_payin(&self, input: CreatePayment) -> Result<Transaction> {
        self.post("/api/transactions/payin", &input).await
    }

    async fn create_payout(&self, input: CreatePayment) -> Result<Transaction> {
        self.post("/api/transactions/payout", &input).await
    }

    async fn create_exchange(&self, input: CreateExchange) -> Result<Transaction> {
        self.post("/api/transactions/exchange", &input).await
    }

    async fn execute_payout(&self, id: ResourceId) -> Result<Transaction> {
        self.request(
            Method::PATCH,
            &format!("/api/transactions/{id}/payout/execute"),
            Some(serde_json::json!({})),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_without_member_is_empty() {
        let collection: Collection<Transaction> = serde_json::from_str("{}").unwrap();
        let page: Page<Transaction> = collection.into();

        assert!(page.is_empty());
        assert_eq!(page.total_items, None);
    }

    #[test]
    fn test_envelope_preserves_member_order() {
        let json = r#"{
            "hydra:member": [{"id": 3}, {"id": 1}, {"id": 2}],
            "hydra:totalItems": 3
        }"#;

        #[derive(Debug, Deserialize, PartialEq)]
        struct Row {
            id: u64,
        }

        let collection: Collection<Row> = serde_json::from_str(json).unwrap();
        let page: Page<Row> = collection.into();

        let ids: Vec<u64> = page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(page.total_items, Some(3));
    }
}
