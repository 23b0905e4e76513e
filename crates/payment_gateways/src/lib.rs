//! Payment gateway settings controllers.
//!
//! Each gateway module pairs a settings document with the
//! [`gateway_interfaces::PaymentGatewayController`] contract and the outbound
//! charge flow: record the attempt, create the charge upstream, resolve the
//! audit status, and hand the caller a redirect descriptor to complete the
//! browser-facing flow.

pub mod configs;
pub mod consts;
pub mod gateways;
pub mod request_log;

pub use gateways::izipay::IzipaySettings;
