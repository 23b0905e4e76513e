//! Gateway interface
//!
//! The contract a payment gateway controller must satisfy, together with the
//! interfaces of the collaborators a gateway talks to while resolving a
//! payment attempt: the request log, the authorized-payment hook on business
//! documents, and the gateway registry.
#![warn(missing_docs, missing_debug_implementations)]

pub mod api;
pub mod errors;
/// Business document hook and gateway registry interfaces
pub mod hooks;
/// Request log (audit record) interface
pub mod request_log;
pub mod types;

pub use api::PaymentGatewayController;
pub use errors::CustomResult;
