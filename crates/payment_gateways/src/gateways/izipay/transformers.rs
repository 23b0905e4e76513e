use gateway_interfaces::types::{MinorUnit, PaymentAttempt};
use masking::Secret;
use serde::{Deserialize, Serialize};

/// Form payload of a charge creation call, field names as the upstream API
/// expects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChargeRequest {
    pub amount: MinorUnit,
    pub currency: String,
    pub source: Secret<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_email: Option<String>,
}

impl From<&PaymentAttempt> for ChargeRequest {
    fn from(item: &PaymentAttempt) -> Self {
        Self {
            amount: MinorUnit::from_major(item.amount),
            currency: item.currency.clone(),
            source: item.source_token.clone(),
            description: item.description.clone(),
            receipt_email: item.payer_email.clone(),
        }
    }
}

/// The slice of the upstream charge object the gateway branches on.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeResponse {
    pub id: String,
    pub captured: bool,
    #[serde(default)]
    pub failure_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorEnvelope {
    pub error: StripeErrorDetails,
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorDetails {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
