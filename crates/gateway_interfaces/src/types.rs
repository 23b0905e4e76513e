//! Types interface

use std::fmt;

use masking::Secret;
use serde::{Deserialize, Serialize};

/// Pointer to the business document a payment attempt settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReference {
    /// Document type, e.g. "Payment Request" or "Sales Invoice"
    pub doctype: String,
    /// Document name, e.g. "SINV-0001"
    pub docname: String,
}

impl PaymentReference {
    /// Construct a reference from its doctype and docname parts.
    pub fn new(doctype: impl Into<String>, docname: impl Into<String>) -> Self {
        Self {
            doctype: doctype.into(),
            docname: docname.into(),
        }
    }
}

/// One inbound payment attempt, as handed to a gateway controller.
///
/// Transient: validated against the gateway settings before any charge is
/// attempted, charged at most once, then dropped. Only the request log keeps
/// a durable trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentAttempt {
    /// Transaction amount in major currency units
    pub amount: f64,
    /// Transaction currency code
    pub currency: String,
    /// Opaque charge-source token minted by the checkout page
    pub source_token: Secret<String>,
    /// Human-readable description forwarded to the charge API
    pub description: Option<String>,
    /// Payer email, used as the charge receipt address
    pub payer_email: Option<String>,
    /// Payer display name
    pub payer_name: Option<String>,
    /// Merchant order identifier
    pub order_id: Option<String>,
    /// Business document the attempt settles, when known
    pub reference: Option<PaymentReference>,
    /// Caller-supplied target to return the payer to after the attempt
    pub redirect_to: Option<String>,
    /// Caller-supplied message to display on the redirect target
    pub redirect_message: Option<String>,
}

/// Status of a request log record.
///
/// Mutated at most once per attempt, after the charge call resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestLogStatus {
    /// Attempt recorded, charge outcome not yet known
    Queued,
    /// Charge captured by the upstream gateway
    Completed,
    /// Charge resolved without capturing funds
    Failed,
    /// Attempt aborted by an internal error
    Error,
}

impl fmt::Display for RequestLogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => f.write_str("Queued"),
            Self::Completed => f.write_str("Completed"),
            Self::Failed => f.write_str("Failed"),
            Self::Error => f.write_str("Error"),
        }
    }
}

/// Amount in the smallest unit of its currency, the convention of the
/// upstream charge API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MinorUnit(i64);

impl MinorUnit {
    /// Wrap an already-converted minor-unit amount.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Convert a major-unit amount, multiplying by 100 and truncating toward
    /// zero.
    #[allow(clippy::as_conversions)]
    pub fn from_major(amount: f64) -> Self {
        Self((amount * 100.0) as i64)
    }

    /// The raw minor-unit value.
    pub fn get_amount_as_i64(self) -> i64 {
        self.0
    }
}

/// Parameters carried on the checkout redirect URL.
///
/// Everything the checkout page needs to render and resume the flow; encoded
/// into the query string in field order, absent fields skipped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentUrlParams {
    /// Transaction amount in major currency units
    pub amount: f64,
    /// Title shown on the checkout page
    pub title: Option<String>,
    /// Description shown on the checkout page
    pub description: Option<String>,
    /// Doctype of the document requesting payment
    pub reference_doctype: Option<String>,
    /// Name of the document requesting payment
    pub reference_docname: Option<String>,
    /// Payer email
    pub payer_email: Option<String>,
    /// Payer display name
    pub payer_name: Option<String>,
    /// Merchant order identifier
    pub order_id: Option<String>,
    /// Transaction currency code
    pub currency: String,
}

/// Payload of an upstream payment request document, handed to the optional
/// submission and request-for-payment hooks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentRequestData {
    /// Business document the payment request belongs to
    pub reference: Option<PaymentReference>,
    /// Gateway the request was routed to
    pub payment_gateway: Option<String>,
    /// Remaining fields of the payment request document
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

/// Status carried on a [`RedirectDescriptor`].
///
/// The server-error short circuit reports a bare HTTP-like numeral while
/// every other outcome reports the request log label; both shapes are
/// observable wire behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RedirectOutcomeStatus {
    /// HTTP-like status code, used by the terminal server-error path
    Code(u16),
    /// Resolved status of the attempt's request log record
    Attempt(RequestLogStatus),
}

/// Outcome of a payment attempt, returned to the caller to complete the
/// browser-facing flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectDescriptor {
    /// URL to send the payer's browser to, query parameters included
    pub redirect_to: String,
    /// Resolved status of the attempt
    pub status: RedirectOutcomeStatus,
}
