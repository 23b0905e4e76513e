use crate::{
    types::{PaymentReference, RequestLogStatus},
    CustomResult,
};

/// Errors raised by the business-document hook. The gateway swallows these:
/// a failed hook is logged and the redirect falls back to the caller-supplied
/// or default target.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The referenced business document does not exist.
    #[error("Business document {doctype} {docname} not found")]
    DocumentNotFound {
        /// Doctype of the missing document
        doctype: String,
        /// Name of the missing document
        docname: String,
    },
    /// The document's hook ran and failed.
    #[error("on_payment_authorized hook failed")]
    ExecutionFailed,
}

/// Dispatches `on_payment_authorized` to the business document a payment
/// attempt references.
#[async_trait::async_trait]
pub trait PaymentAuthorizedHook: Send + Sync {
    /// Notify the referenced document that its payment resolved to `status`.
    /// A `Some` return names the redirect target the document wants the
    /// payer sent to, overriding the caller-supplied one.
    ///
    /// # Errors
    /// [`HookError`] when the document is missing or its hook fails.
    async fn on_payment_authorized(
        &self,
        reference: &PaymentReference,
        status: RequestLogStatus,
    ) -> CustomResult<Option<String>, HookError>;
}

/// Errors raised by the gateway registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The gateway record could not be created or updated.
    #[error("Failed to register payment gateway")]
    RegistrationFailed,
    /// The gateway-enabled hook chain failed.
    #[error("Failed to run the gateway enabled hook")]
    EnabledHookFailed,
}

/// Registers gateways with the surrounding application when their settings
/// are saved.
#[async_trait::async_trait]
pub trait GatewayRegistry: Send + Sync {
    /// Create or update the gateway record named `gateway`, pointing at the
    /// settings document and controller that serve it.
    ///
    /// # Errors
    /// [`RegistryError::RegistrationFailed`] when the record cannot be
    /// written.
    async fn register_gateway(
        &self,
        gateway: &str,
        settings_doctype: &str,
        controller: &str,
    ) -> CustomResult<(), RegistryError>;

    /// Announce that `gateway` is configured and ready to take payments.
    ///
    /// # Errors
    /// [`RegistryError::EnabledHookFailed`] when a listener rejects the
    /// announcement.
    async fn gateway_enabled(&self, gateway: &str) -> CustomResult<(), RegistryError>;
}
