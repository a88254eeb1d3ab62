use std::time::Duration;

use anyhow::Context;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("card declined")]
    CardDeclined,

    #[error("incorrect security code")]
    IncorrectCvc,

    #[error("provider rejected request: {code}")]
    Api { code: String, message: String },

    #[error("payment provider unreachable")]
    Connect(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLineItem {
    pub name: String,
    pub unit_amount: i64,
    pub quantity: i64,
    pub currency: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub line_items: Vec<SessionLineItem>,
    pub mode: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
    pub payment_status: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: String,
    #[serde(default)]
    message: String,
}

/// Client for the hosted-checkout API. Sessions are only ever created and
/// retrieved; the provider never calls back into this service.
#[derive(Clone)]
pub struct CheckoutClient {
    base: Url,
    client: Client,
}

impl CheckoutClient {
    pub fn new(base_url: &str, secret_key: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).context("invalid payment api url")?;
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {secret_key}"))
            .context("invalid payment secret key")?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { base, client })
    }

    pub async fn create_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(self.sessions_url())
            .json(request)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(map_api_error(response).await);
        }
        Ok(response.json().await?)
    }

    pub async fn retrieve_session(&self, id: &str) -> Result<CheckoutSession, PaymentError> {
        let response = self.client.get(self.session_url(id)).send().await?;
        if !response.status().is_success() {
            return Err(map_api_error(response).await);
        }
        Ok(response.json().await?)
    }

    fn sessions_url(&self) -> Url {
        let mut url = self.base.clone();
        url.set_path("/v1/checkout/sessions");
        url
    }

    fn session_url(&self, id: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(&format!("/v1/checkout/sessions/{id}"));
        url
    }
}

async fn map_api_error(response: reqwest::Response) -> PaymentError {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => match body.error.code.as_str() {
            "card_declined" => PaymentError::CardDeclined,
            "incorrect_cvc" => PaymentError::IncorrectCvc,
            _ => PaymentError::Api {
                code: body.error.code,
                message: body.error.message,
            },
        },
        Err(_) => PaymentError::Api {
            code: status.as_u16().to_string(),
            message: "unrecognized provider error".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn sample_request() -> CreateSessionRequest {
        CreateSessionRequest {
            line_items: vec![SessionLineItem {
                name: "Pizza".into(),
                unit_amount: 800_000,
                quantity: 2,
                currency: "inr".into(),
            }],
            mode: "payment".into(),
            success_url: "http://localhost/verify?success=true&orderId=o1".into(),
            cancel_url: "http://localhost/verify?success=false&orderId=o1".into(),
        }
    }

    #[tokio::test]
    async fn create_session_returns_redirect_url() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(200).json_body(serde_json::json!({
                "id": "cs_test_1",
                "url": "http://provider.test/session/cs_test_1",
                "payment_status": "unpaid"
            }));
        });

        let client = CheckoutClient::new(&server.base_url(), "sk_test").unwrap();
        let session = client.create_session(&sample_request()).await.unwrap();
        assert_eq!(session.id, "cs_test_1");
        assert_eq!(session.url, "http://provider.test/session/cs_test_1");
        mock.assert();
    }

    #[tokio::test]
    async fn declined_card_maps_to_card_declined() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(402).json_body(serde_json::json!({
                "error": { "code": "card_declined", "message": "Your card was declined." }
            }));
        });

        let client = CheckoutClient::new(&server.base_url(), "sk_test").unwrap();
        let err = client.create_session(&sample_request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::CardDeclined));
    }

    #[tokio::test]
    async fn incorrect_cvc_maps_to_incorrect_cvc() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(402).json_body(serde_json::json!({
                "error": { "code": "incorrect_cvc", "message": "Security code is incorrect." }
            }));
        });

        let client = CheckoutClient::new(&server.base_url(), "sk_test").unwrap();
        let err = client.create_session(&sample_request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::IncorrectCvc));
    }

    #[tokio::test]
    async fn unknown_provider_code_is_preserved() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/checkout/sessions");
            then.status(400).json_body(serde_json::json!({
                "error": { "code": "rate_limited", "message": "Too many requests" }
            }));
        });

        let client = CheckoutClient::new(&server.base_url(), "sk_test").unwrap();
        let err = client.create_session(&sample_request()).await.unwrap_err();
        match err {
            PaymentError::Api { code, .. } => assert_eq!(code, "rate_limited"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_provider_maps_to_connect() {
        // Nothing is listening on this port.
        let client = CheckoutClient::new("http://127.0.0.1:1", "sk_test").unwrap();
        let err = client.create_session(&sample_request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Connect(_)));
    }

    #[tokio::test]
    async fn retrieve_session_reports_payment_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/v1/checkout/sessions/cs_test_1");
            then.status(200).json_body(serde_json::json!({
                "id": "cs_test_1",
                "url": "http://provider.test/session/cs_test_1",
                "payment_status": "paid"
            }));
        });

        let client = CheckoutClient::new(&server.base_url(), "sk_test").unwrap();
        let session = client.retrieve_session("cs_test_1").await.unwrap();
        assert_eq!(session.payment_status, "paid");
        mock.assert();
    }
}
