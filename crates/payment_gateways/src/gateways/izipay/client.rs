use error_stack::{report, ResultExt};
use gateway_interfaces::CustomResult;
use masking::{Mask, Maskable, PeekInterface, Secret};

use super::transformers::{ChargeRequest, ChargeResponse, StripeErrorEnvelope};

/// Errors raised while talking to the charge API. None of these reach the
/// payer; the gateway logs them and falls back to the generic server-error
/// redirect.
#[derive(Debug, thiserror::Error)]
pub enum ChargeError {
    #[error("Failed to reach the charge API")]
    RequestFailed,
    #[error("Failed to deserialize the charge API response")]
    ResponseDeserializationFailed,
    #[error("The charge API rejected the request: {error_type}: {message}")]
    ChargeRejected {
        error_type: String,
        message: String,
    },
    #[error("The charge API rejected the configured credentials")]
    InvalidCredentials,
}

/// Outbound charge API collaborator.
#[async_trait::async_trait]
pub trait ChargeClient: Send + Sync {
    /// Create a charge upstream. Called at most once per payment attempt,
    /// with no retries.
    async fn charge(&self, request: ChargeRequest) -> CustomResult<ChargeResponse, ChargeError>;

    /// Check that the configured secret key is accepted by the charge API.
    async fn verify_credentials(&self) -> CustomResult<(), ChargeError>;
}

/// [`ChargeClient`] backed by the Stripe charges endpoint.
#[derive(Debug, Clone)]
pub struct StripeChargeClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: Secret<String>,
}

impl StripeChargeClient {
    /// Client for the charge API at `base_url`, authenticating with
    /// `secret_key`.
    pub fn new(base_url: impl Into<String>, secret_key: Secret<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            secret_key,
        }
    }

    fn charges_url(&self) -> String {
        format!("{}/v1/charges", self.base_url.trim_end_matches('/'))
    }

    fn auth_headers(&self) -> Vec<(String, Maskable<String>)> {
        vec![(
            reqwest::header::AUTHORIZATION.to_string(),
            format!("Bearer {}", self.secret_key.peek()).into_masked(),
        )]
    }
}

#[async_trait::async_trait]
impl ChargeClient for StripeChargeClient {
    async fn charge(&self, request: ChargeRequest) -> CustomResult<ChargeResponse, ChargeError> {
        let url = self.charges_url();
        let headers = self.auth_headers();
        tracing::info!(method = "POST", url = %url, headers = ?headers, "calling the charge API");

        let mut builder = self.client.post(&url).form(&request);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.into_inner());
        }
        let response = builder
            .send()
            .await
            .change_context(ChargeError::RequestFailed)?;

        if response.status().is_success() {
            response
                .json::<ChargeResponse>()
                .await
                .change_context(ChargeError::ResponseDeserializationFailed)
        } else {
            let envelope = response
                .json::<StripeErrorEnvelope>()
                .await
                .change_context(ChargeError::ResponseDeserializationFailed)?;
            tracing::info!(charge_error = ?envelope.error, "charge API returned an error");
            Err(report!(ChargeError::ChargeRejected {
                error_type: envelope.error.error_type,
                message: envelope.error.message.unwrap_or_default(),
            }))
        }
    }

    async fn verify_credentials(&self) -> CustomResult<(), ChargeError> {
        let mut builder = self.client.get(self.charges_url());
        for (name, value) in self.auth_headers() {
            builder = builder.header(name.as_str(), value.into_inner());
        }
        let response = builder
            .send()
            .await
            .change_context(ChargeError::RequestFailed)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(report!(ChargeError::InvalidCredentials))
        }
    }
}
