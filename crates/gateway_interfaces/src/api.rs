//! API interface

use url::Url;

use crate::{
    errors::GatewayError,
    types::{PaymentRequestData, PaymentUrlParams},
    CustomResult,
};

/// The contract a payment gateway controller must satisfy.
///
/// Two operations are mandatory; the remaining three carry safe defaults so
/// that a gateway without a minimum-amount floor or a request-payment flow
/// implements nothing for them. Implementations hold their configuration as
/// immutable per-gateway state and must not share mutable state across
/// payment attempts.
pub trait PaymentGatewayController: Send + Sync {
    /// Check that the gateway supports transactions in `currency`.
    ///
    /// Membership in the supported set is exact-match and case-sensitive.
    ///
    /// # Errors
    /// [`GatewayError::CurrencyNotSupported`] when the currency is outside
    /// the gateway's supported set.
    fn validate_transaction_currency(&self, currency: &str) -> CustomResult<(), GatewayError>;

    /// Build the URL the payer's browser is redirected to for checkout.
    ///
    /// Pure construction: carries `params` as an urlencoded query string and
    /// has no side effects beyond the encoding itself.
    ///
    /// # Errors
    /// [`GatewayError::PaymentUrlConstructionFailed`] when the parameters
    /// cannot be assembled into a valid URL.
    fn get_payment_url(&self, params: &PaymentUrlParams) -> CustomResult<Url, GatewayError>;

    /// Check that `amount` meets the gateway's floor for `currency`.
    ///
    /// Currencies absent from the gateway's minimum-amount table have no
    /// floor. The default accepts every amount.
    ///
    /// # Errors
    /// [`GatewayError::AmountBelowMinimum`] when the amount is strictly
    /// below the configured floor.
    fn validate_minimum_transaction_amount(
        &self,
        _currency: &str,
        _amount: f64,
    ) -> CustomResult<(), GatewayError> {
        Ok(())
    }

    /// Ask the gateway to request a payment from the payer, for gateways
    /// where the merchant initiates the flow. The default does nothing.
    fn request_for_payment(&self, _params: &PaymentRequestData) -> CustomResult<(), GatewayError> {
        Ok(())
    }

    /// Hook invoked when an upstream payment request is submitted; returns
    /// whether the submission is acceptable. The default accepts.
    fn on_payment_request_submission(
        &self,
        _request: &PaymentRequestData,
    ) -> CustomResult<bool, GatewayError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    // Implements only the two mandatory operations; the rest of the contract
    // must degrade to its defaults.
    struct BareGateway;

    impl PaymentGatewayController for BareGateway {
        fn validate_transaction_currency(&self, currency: &str) -> CustomResult<(), GatewayError> {
            if currency == "PEN" {
                Ok(())
            } else {
                Err(GatewayError::CurrencyNotSupported {
                    currency: currency.to_string(),
                    gateway: "Bare",
                }
                .into())
            }
        }

        fn get_payment_url(&self, params: &PaymentUrlParams) -> CustomResult<Url, GatewayError> {
            Url::parse(&format!("https://pay.example/checkout?amount={}", params.amount))
                .map_err(|_| GatewayError::PaymentUrlConstructionFailed.into())
        }
    }

    #[test]
    fn minimum_amount_defaults_to_no_floor() {
        assert!(BareGateway
            .validate_minimum_transaction_amount("PEN", 0.01)
            .is_ok());
    }

    #[test]
    fn request_for_payment_defaults_to_noop() {
        assert!(BareGateway
            .request_for_payment(&PaymentRequestData::default())
            .is_ok());
    }

    #[test]
    fn payment_request_submission_defaults_to_accept() {
        assert!(BareGateway
            .on_payment_request_submission(&PaymentRequestData::default())
            .unwrap());
    }
}
