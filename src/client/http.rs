//! Invoice REST API client
//!
//! HTTP client for the Invoice API. Requests are sent once; failures come
//! back as [`DashboardError`] and are never retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;

use super::InvoiceApi;
use crate::config::ApiConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::invoice::{Invoice, NewInvoice};

/// Invoice API REST client
pub struct HttpInvoiceClient {
    client: Client,
    config: InvoiceClientConfig,
}

/// Configuration for the Invoice API client
#[derive(Debug, Clone)]
pub struct InvoiceClientConfig {
    /// Base URL of the Invoice API (e.g., "http://localhost:8081")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for InvoiceClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl From<&ApiConfig> for InvoiceClientConfig {
    fn from(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            request_timeout_ms: api.request_timeout_ms,
        }
    }
}

impl HttpInvoiceClient {
    /// Create a new client with the given configuration
    pub fn new(mut config: InvoiceClientConfig) -> DashboardResult<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();

        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| DashboardError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &InvoiceClientConfig {
        &self.config
    }

    fn collection_url(&self) -> String {
        format!("{}/api/invoice", self.config.base_url)
    }

    fn invoice_url(&self, invoice_number: &str) -> String {
        format!(
            "{}/api/invoice/{}",
            self.config.base_url,
            urlencoding::encode(invoice_number)
        )
    }

    /// Turn a non-success status into an API error
    async fn check_status(response: Response) -> DashboardResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(DashboardError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl InvoiceApi for HttpInvoiceClient {
    async fn list_invoices(&self) -> DashboardResult<Vec<Invoice>> {
        let url = self.collection_url();
        tracing::debug!(url = %url, "Listing invoices");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(DashboardError::from_transport)?;
        let response = Self::check_status(response).await?;

        response
            .json::<Vec<Invoice>>()
            .await
            .map_err(|e| DashboardError::Decode(e.to_string()))
    }

    async fn create_invoice(&self, invoice: &NewInvoice) -> DashboardResult<Invoice> {
        let url = self.collection_url();
        tracing::debug!(url = %url, invoice_number = %invoice.invoice_number, "Creating invoice");

        let response = self
            .client
            .post(&url)
            .json(invoice)
            .send()
            .await
            .map_err(DashboardError::from_transport)?;
        let response = Self::check_status(response).await?;

        response
            .json::<Invoice>()
            .await
            .map_err(|e| DashboardError::Decode(e.to_string()))
    }

    async fn delete_invoice(&self, invoice_number: &str) -> DashboardResult<()> {
        let url = self.invoice_url(invoice_number);
        tracing::debug!(url = %url, invoice_number = %invoice_number, "Deleting invoice");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(DashboardError::from_transport)?;

        // Confirmation body is not used
        Self::check_status(response).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{delete, get},
        Json, Router,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::{net::TcpListener, sync::Mutex};

    #[derive(Clone, Default)]
    struct StubState {
        invoices: Arc<Mutex<Vec<serde_json::Value>>>,
        posted: Arc<Mutex<Vec<serde_json::Value>>>,
        deleted: Arc<Mutex<Vec<String>>>,
    }

    async fn list(State(state): State<StubState>) -> Json<Vec<serde_json::Value>> {
        Json(state.invoices.lock().await.clone())
    }

    async fn create(
        State(state): State<StubState>,
        Json(body): Json<serde_json::Value>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        state.posted.lock().await.push(body.clone());
        let mut stored = body;
        stored["_id"] = serde_json::json!("stub-1");
        state.invoices.lock().await.push(stored.clone());
        (StatusCode::CREATED, Json(stored))
    }

    async fn remove(
        State(state): State<StubState>,
        Path(number): Path<String>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        state.deleted.lock().await.push(number.clone());
        let mut invoices = state.invoices.lock().await;
        let before = invoices.len();
        invoices.retain(|i| i["invoiceNumber"] != serde_json::json!(number));
        if invoices.len() == before {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": "Invoice not found" })),
            )
        } else {
            (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Invoice deleted" })),
            )
        }
    }

    async fn spawn_stub(state: StubState) -> String {
        let app = Router::new()
            .route("/api/invoice", get(list).post(create))
            .route("/api/invoice/:number", delete(remove))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: String) -> HttpInvoiceClient {
        HttpInvoiceClient::new(InvoiceClientConfig {
            base_url,
            request_timeout_ms: 2_000,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = InvoiceClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8081");
        assert_eq!(config.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_urls() {
        let client = client_for("http://localhost:8081/".to_string());
        assert_eq!(client.collection_url(), "http://localhost:8081/api/invoice");
        assert_eq!(
            client.invoice_url("INV 2024/01"),
            "http://localhost:8081/api/invoice/INV%202024%2F01"
        );
    }

    #[tokio::test]
    async fn test_list_invoices() {
        let state = StubState::default();
        state.invoices.lock().await.push(serde_json::json!({
            "_id": "a",
            "invoiceNumber": "A1",
            "invoiceAmount": 10,
            "invoiceDate": "2024-01-05T00:00:00.000Z",
        }));
        let client = client_for(spawn_stub(state).await);

        let invoices = client.list_invoices().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].invoice_number, "A1");
        assert_eq!(
            invoices[0].invoice_date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_sends_wire_body() {
        let state = StubState::default();
        let client = client_for(spawn_stub(state.clone()).await);

        let req = NewInvoice::from_input("A1", "abc", NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let created = client.create_invoice(&req).await.unwrap();
        assert_eq!(created.id.as_deref(), Some("stub-1"));
        assert!(created.invoice_amount.is_nan());

        let posted = state.posted.lock().await;
        assert_eq!(
            posted[0],
            serde_json::json!({
                "invoiceNumber": "A1",
                "invoiceAmount": null,
                "invoiceDate": "2024-01-05",
            })
        );
    }

    #[tokio::test]
    async fn test_delete_encodes_number() {
        let state = StubState::default();
        state.invoices.lock().await.push(serde_json::json!({
            "invoiceNumber": "INV 7",
            "invoiceAmount": 1,
            "invoiceDate": "2024-01-05",
        }));
        let client = client_for(spawn_stub(state.clone()).await);

        client.delete_invoice("INV 7").await.unwrap();
        assert_eq!(*state.deleted.lock().await, vec!["INV 7".to_string()]);
        assert!(state.invoices.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_api_error() {
        let client = client_for(spawn_stub(StubState::default()).await);

        let err = client.delete_invoice("nope").await.unwrap_err();
        match err {
            DashboardError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        // Bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{}", addr));
        let err = client.list_invoices().await.unwrap_err();
        assert!(matches!(err, DashboardError::Unavailable));
    }

    #[tokio::test]
    async fn test_malformed_list_is_decode_error() {
        let app = Router::new().route(
            "/api/invoice",
            get(|| async { Json(serde_json::json!({ "invoices": [] })) }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = client_for(format!("http://{}", addr));
        let err = client.list_invoices().await.unwrap_err();
        assert!(matches!(err, DashboardError::Decode(_)));
    }
}
