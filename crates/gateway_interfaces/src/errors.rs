//! Error types shared across gateway implementations

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Errors a gateway controller surfaces to its caller.
///
/// Only the pre-charge validations and the setup-time credential check fail
/// loudly; every failure inside the charge/finalize path is logged and
/// converted into a best-effort redirect instead.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GatewayError {
    /// The transaction currency is not in the gateway's supported set.
    #[error("Please select another payment method. {gateway} does not support transactions in currency '{currency}'")]
    CurrencyNotSupported {
        /// Currency code of the attempted transaction
        currency: String,
        /// Name of the rejecting gateway
        gateway: &'static str,
    },

    /// The transaction amount is below the configured floor for the currency.
    #[error("For currency {currency}, the minimum transaction amount should be {minimum}")]
    AmountBelowMinimum {
        /// Currency code of the attempted transaction
        currency: String,
        /// Configured minimum chargeable amount for the currency
        minimum: f64,
    },

    /// The gateway credentials failed verification against the upstream API.
    /// Raised during settings save; blocks activation of the gateway.
    #[error("Seems Publishable Key or Secret Key is wrong !!!")]
    CredentialVerificationFailed,

    /// The gateway could not be registered with the surrounding application
    /// on settings save.
    #[error("Failed to register the payment gateway")]
    RegistrationFailed,

    /// A field required by the gateway operation was not supplied.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField {
        /// Name of the missing field
        field_name: &'static str,
    },

    /// The checkout redirect URL could not be constructed.
    #[error("Failed to construct the payment URL")]
    PaymentUrlConstructionFailed,
}
