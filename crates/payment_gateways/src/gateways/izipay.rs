pub mod client;
pub mod transformers;

use std::collections::HashMap;

use error_stack::ResultExt;
use gateway_interfaces::{
    errors::GatewayError,
    hooks::{GatewayRegistry, PaymentAuthorizedHook},
    request_log::{RequestLog, RequestLogRecord},
    types::{
        PaymentAttempt, PaymentUrlParams, RedirectDescriptor, RedirectOutcomeStatus,
        RequestLogStatus,
    },
    CustomResult, PaymentGatewayController,
};
use masking::{PeekInterface, Secret};
use url::{form_urlencoded, Url};

use self::{
    client::{ChargeClient, StripeChargeClient},
    transformers::ChargeRequest,
};
use crate::{
    configs::{ChargeApiParams, IzipayConfig},
    consts,
};

/// Izipay gateway settings document.
///
/// Immutable per-gateway configuration read at transaction time; nothing
/// here is shared mutable state, so every payment attempt is an independent
/// invocation.
#[derive(Debug, Clone)]
pub struct IzipaySettings {
    gateway_name: String,
    publishable_key: Secret<String>,
    secret_key: Secret<String>,
    redirect_url: Option<String>,
    site_url: String,
    charge_api: ChargeApiParams,
    supported_currencies: Vec<String>,
    currency_wise_minimum_charge_amount: HashMap<String, f64>,
}

impl From<IzipayConfig> for IzipaySettings {
    fn from(config: IzipayConfig) -> Self {
        Self {
            gateway_name: config.gateway_name,
            publishable_key: config.publishable_key,
            secret_key: config.secret_key,
            redirect_url: config.redirect_url.filter(|url| !url.is_empty()),
            site_url: config.site_url,
            charge_api: config.charge_api,
            supported_currencies: config.supported_currencies,
            currency_wise_minimum_charge_amount: config.currency_wise_minimum_charge_amount,
        }
    }
}

impl IzipaySettings {
    /// Name distinguishing this gateway instance.
    pub fn gateway_name(&self) -> &str {
        &self.gateway_name
    }

    /// Charge API client configured with this gateway's credentials.
    pub fn charge_client(&self) -> StripeChargeClient {
        StripeChargeClient::new(self.charge_api.base_url.clone(), self.secret_key.clone())
    }

    /// Settings-save lifecycle: register the gateway, announce it, then
    /// verify the credentials unless mandatory checks are suppressed.
    ///
    /// # Errors
    /// [`GatewayError::RegistrationFailed`] when the registry rejects the
    /// gateway, [`GatewayError::CredentialVerificationFailed`] when the
    /// charge API rejects the configured keys. Either blocks activation.
    pub async fn on_update(
        &self,
        registry: &dyn GatewayRegistry,
        client: &dyn ChargeClient,
        ignore_mandatory: bool,
    ) -> CustomResult<(), GatewayError> {
        let gateway = format!("Izipay-{}", self.gateway_name);
        registry
            .register_gateway(&gateway, consts::IZIPAY_SETTINGS_DOCTYPE, &self.gateway_name)
            .await
            .change_context(GatewayError::RegistrationFailed)?;
        registry
            .gateway_enabled(&gateway)
            .await
            .change_context(GatewayError::RegistrationFailed)?;
        if !ignore_mandatory {
            self.verify_credentials(client).await?;
        }
        Ok(())
    }

    /// Check the configured keys against the charge API. Skipped while
    /// either key is still unset.
    ///
    /// # Errors
    /// [`GatewayError::CredentialVerificationFailed`] when the charge API
    /// rejects the secret key.
    pub async fn verify_credentials(
        &self,
        client: &dyn ChargeClient,
    ) -> CustomResult<(), GatewayError> {
        if self.publishable_key.peek().is_empty() || self.secret_key.peek().is_empty() {
            return Ok(());
        }
        client
            .verify_credentials()
            .await
            .change_context(GatewayError::CredentialVerificationFailed)
    }

    /// Resolve one payment attempt end to end: record it, create the charge
    /// upstream, then compute the redirect outcome.
    ///
    /// Infallible by design: every failure past the caller's pre-charge
    /// validations is logged and converted into a navigable redirect. The
    /// charge is attempted at most once; a transport or API failure is
    /// terminal and short-circuits with the fixed server-error descriptor,
    /// leaving the audit record untouched.
    pub async fn create_request(
        &self,
        data: &PaymentAttempt,
        log: &dyn RequestLog,
        client: &dyn ChargeClient,
        hook: Option<&dyn PaymentAuthorizedHook>,
    ) -> RedirectDescriptor {
        let record = match log.create(data, consts::IZIPAY_SERVICE_NAME).await {
            Ok(record) => record,
            Err(error) => {
                tracing::error!(?error, "failed to record the payment attempt");
                return self.server_error_redirect();
            }
        };
        self.create_charge(data, record.as_ref(), client, hook).await
    }

    async fn create_charge(
        &self,
        data: &PaymentAttempt,
        record: &dyn RequestLogRecord,
        client: &dyn ChargeClient,
        hook: Option<&dyn PaymentAuthorizedHook>,
    ) -> RedirectDescriptor {
        let mut status_changed_to_completed = false;

        match client.charge(ChargeRequest::from(data)).await {
            Ok(charge) if charge.captured => {
                match record.set_status(RequestLogStatus::Completed).await {
                    Ok(()) => status_changed_to_completed = true,
                    Err(error) => {
                        tracing::error!(?error, "failed to mark the request log record Completed")
                    }
                }
            }
            Ok(charge) => {
                tracing::error!(
                    charge_id = %charge.id,
                    failure_message = ?charge.failure_message,
                    "Izipay payment not completed"
                );
            }
            Err(error) => {
                tracing::error!(?error, "charge creation failed");
                return self.server_error_redirect();
            }
        }

        self.finalize_request(data, record.status(), status_changed_to_completed, hook)
            .await
    }

    /// Compute the redirect outcome of an attempt. Pure function of its
    /// inputs: identical inputs produce identical descriptors.
    pub async fn finalize_request(
        &self,
        data: &PaymentAttempt,
        status: RequestLogStatus,
        status_changed_to_completed: bool,
        hook: Option<&dyn PaymentAuthorizedHook>,
    ) -> RedirectDescriptor {
        let mut redirect_to = data.redirect_to.clone().filter(|target| !target.is_empty());
        let redirect_message = data
            .redirect_message
            .clone()
            .filter(|message| !message.is_empty());

        let mut redirect_url;
        if status_changed_to_completed {
            if let Some(reference) = &data.reference {
                if let Some(hook) = hook {
                    match hook
                        .on_payment_authorized(reference, RequestLogStatus::Completed)
                        .await
                    {
                        Ok(Some(custom_redirect_to)) => redirect_to = Some(custom_redirect_to),
                        Ok(None) => {}
                        Err(error) => {
                            tracing::error!(?error, "on_payment_authorized hook failed")
                        }
                    }
                }

                redirect_url = format!(
                    "{}?doctype={}&docname={}",
                    consts::PAYMENT_SUCCESS_ROUTE,
                    reference.doctype,
                    reference.docname
                );
            } else {
                // Completed attempt without a business reference: land the
                // payer on the bare success page rather than leaving the
                // target unassigned.
                redirect_url = consts::PAYMENT_SUCCESS_ROUTE.to_string();
            }

            if let Some(override_url) = &self.redirect_url {
                redirect_url = override_url.clone();
                redirect_to = None;
            }
        } else {
            redirect_url = consts::PAYMENT_FAILED_ROUTE.to_string();
        }

        // Join rule kept exactly as other parts of the flow observe it:
        // `redirect_to` is always appended, with `&` only when a caller
        // target is present AND the base already carries a query string.
        // A Completed redirect with a reference and no caller target thus
        // ends in `?redirect_to=` after an existing query string.
        if redirect_to.is_some() && redirect_url.contains('?') {
            redirect_url.push('&');
        } else {
            redirect_url.push('?');
        }
        redirect_url.push_str(&encode_query_pair(
            "redirect_to",
            redirect_to.as_deref().unwrap_or_default(),
        ));

        if let Some(message) = redirect_message {
            redirect_url.push('&');
            redirect_url.push_str(&encode_query_pair("redirect_message", &message));
        }

        RedirectDescriptor {
            redirect_to: redirect_url,
            status: RedirectOutcomeStatus::Attempt(status),
        }
    }

    fn server_error_redirect(&self) -> RedirectDescriptor {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("title", consts::SERVER_ERROR_TITLE)
            .append_pair("message", consts::SERVER_ERROR_MESSAGE)
            .finish();
        RedirectDescriptor {
            redirect_to: format!("{}?{}", consts::MESSAGE_ROUTE, query),
            status: RedirectOutcomeStatus::Code(401),
        }
    }
}

impl PaymentGatewayController for IzipaySettings {
    fn validate_transaction_currency(&self, currency: &str) -> CustomResult<(), GatewayError> {
        if self
            .supported_currencies
            .iter()
            .any(|supported| supported == currency)
        {
            Ok(())
        } else {
            Err(GatewayError::CurrencyNotSupported {
                currency: currency.to_string(),
                gateway: consts::IZIPAY_SERVICE_NAME,
            }
            .into())
        }
    }

    fn get_payment_url(&self, params: &PaymentUrlParams) -> CustomResult<Url, GatewayError> {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("amount", &params.amount.to_string());
        if let Some(title) = &params.title {
            query.append_pair("title", title);
        }
        if let Some(description) = &params.description {
            query.append_pair("description", description);
        }
        if let Some(reference_doctype) = &params.reference_doctype {
            query.append_pair("reference_doctype", reference_doctype);
        }
        if let Some(reference_docname) = &params.reference_docname {
            query.append_pair("reference_docname", reference_docname);
        }
        if let Some(payer_email) = &params.payer_email {
            query.append_pair("payer_email", payer_email);
        }
        if let Some(payer_name) = &params.payer_name {
            query.append_pair("payer_name", payer_name);
        }
        if let Some(order_id) = &params.order_id {
            query.append_pair("order_id", order_id);
        }
        query.append_pair("currency", &params.currency);

        Url::parse(&self.site_url)
            .change_context(GatewayError::PaymentUrlConstructionFailed)?
            .join(&format!("{}?{}", consts::CHECKOUT_ROUTE, query.finish()))
            .change_context(GatewayError::PaymentUrlConstructionFailed)
    }

    fn validate_minimum_transaction_amount(
        &self,
        currency: &str,
        amount: f64,
    ) -> CustomResult<(), GatewayError> {
        if let Some(minimum) = self.currency_wise_minimum_charge_amount.get(currency) {
            if amount < *minimum {
                return Err(GatewayError::AmountBelowMinimum {
                    currency: currency.to_string(),
                    minimum: *minimum,
                }
                .into());
            }
        }
        Ok(())
    }
}

fn encode_query_pair(key: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use gateway_interfaces::{hooks::HookError, types::PaymentReference};

    use super::*;

    fn settings() -> IzipaySettings {
        IzipaySettings::from(config())
    }

    fn settings_with_override(override_url: &str) -> IzipaySettings {
        IzipaySettings::from(IzipayConfig {
            redirect_url: Some(override_url.to_string()),
            ..config()
        })
    }

    fn config() -> IzipayConfig {
        IzipayConfig {
            gateway_name: "Peru Store".to_string(),
            publishable_key: Secret::new("pk_test_1".to_string()),
            secret_key: Secret::new("sk_test_1".to_string()),
            redirect_url: None,
            site_url: "https://shop.example".to_string(),
            charge_api: ChargeApiParams::default(),
            supported_currencies: vec!["PEN".to_string()],
            currency_wise_minimum_charge_amount: HashMap::from([("PEN".to_string(), 1.0)]),
        }
    }

    fn attempt() -> PaymentAttempt {
        PaymentAttempt {
            amount: 25.0,
            currency: "PEN".to_string(),
            source_token: Secret::new("tok_visa".to_string()),
            description: Some("Order 1".to_string()),
            payer_email: Some("payer@example.com".to_string()),
            payer_name: None,
            order_id: None,
            reference: Some(PaymentReference::new("Sales Invoice", "SINV-0001")),
            redirect_to: None,
            redirect_message: None,
        }
    }

    struct StaticHook(Option<String>);

    #[async_trait::async_trait]
    impl PaymentAuthorizedHook for StaticHook {
        async fn on_payment_authorized(
            &self,
            _reference: &PaymentReference,
            _status: RequestLogStatus,
        ) -> CustomResult<Option<String>, HookError> {
            Ok(self.0.clone())
        }
    }

    struct FailingHook;

    #[async_trait::async_trait]
    impl PaymentAuthorizedHook for FailingHook {
        async fn on_payment_authorized(
            &self,
            _reference: &PaymentReference,
            _status: RequestLogStatus,
        ) -> CustomResult<Option<String>, HookError> {
            Err(HookError::ExecutionFailed.into())
        }
    }

    #[test]
    fn supported_currency_passes_validation() {
        assert!(settings().validate_transaction_currency("PEN").is_ok());
    }

    #[test]
    fn unsupported_currency_fails_validation() {
        let error = settings()
            .validate_transaction_currency("USD")
            .unwrap_err();
        assert_eq!(
            &GatewayError::CurrencyNotSupported {
                currency: "USD".to_string(),
                gateway: "Izipay",
            },
            error.current_context()
        );
    }

    #[test]
    fn currency_match_is_case_sensitive() {
        assert!(settings().validate_transaction_currency("pen").is_err());
    }

    #[test]
    fn amount_below_minimum_fails_validation() {
        let error = settings()
            .validate_minimum_transaction_amount("PEN", 0.5)
            .unwrap_err();
        assert_eq!(
            &GatewayError::AmountBelowMinimum {
                currency: "PEN".to_string(),
                minimum: 1.0,
            },
            error.current_context()
        );
    }

    #[test]
    fn amount_at_minimum_passes_validation() {
        assert!(settings()
            .validate_minimum_transaction_amount("PEN", 1.0)
            .is_ok());
    }

    #[test]
    fn currency_without_floor_has_no_minimum() {
        assert!(settings()
            .validate_minimum_transaction_amount("USD", 0.01)
            .is_ok());
    }

    #[test]
    fn payment_url_carries_urlencoded_params() {
        let url = settings()
            .get_payment_url(&PaymentUrlParams {
                amount: 25.0,
                title: Some("Order payment".to_string()),
                description: None,
                reference_doctype: Some("Payment Request".to_string()),
                reference_docname: Some("PR-0001".to_string()),
                payer_email: Some("payer@example.com".to_string()),
                payer_name: None,
                order_id: None,
                currency: "PEN".to_string(),
            })
            .unwrap();
        assert_eq!(
            "https://shop.example/stripe_checkout?amount=25&title=Order+payment\
             &reference_doctype=Payment+Request&reference_docname=PR-0001\
             &payer_email=payer%40example.com&currency=PEN",
            url.as_str()
        );
    }

    #[tokio::test]
    async fn finalize_completed_with_reference_and_no_caller_redirect() {
        // Scenario: captured charge, reference present, hook returns None.
        let descriptor = settings()
            .finalize_request(
                &attempt(),
                RequestLogStatus::Completed,
                true,
                Some(&StaticHook(None)),
            )
            .await;
        assert_eq!(
            "payment-success?doctype=Sales Invoice&docname=SINV-0001?redirect_to=",
            descriptor.redirect_to
        );
        assert_eq!(
            RedirectOutcomeStatus::Attempt(RequestLogStatus::Completed),
            descriptor.status
        );
    }

    #[tokio::test]
    async fn finalize_override_url_wins_and_clears_redirect_to() {
        let mut data = attempt();
        data.redirect_to = Some("https://caller.example/x".to_string());
        let descriptor = settings_with_override("https://shop.example/thanks")
            .finalize_request(&data, RequestLogStatus::Completed, true, None)
            .await;
        assert_eq!(
            "https://shop.example/thanks?redirect_to=",
            descriptor.redirect_to
        );
    }

    #[tokio::test]
    async fn finalize_failed_attempt_lands_on_failure_page() {
        let descriptor = settings()
            .finalize_request(&attempt(), RequestLogStatus::Failed, false, None)
            .await;
        assert_eq!("payment-failed?redirect_to=", descriptor.redirect_to);
        assert_eq!(
            RedirectOutcomeStatus::Attempt(RequestLogStatus::Failed),
            descriptor.status
        );
    }

    #[tokio::test]
    async fn finalize_appends_caller_redirect_with_ampersand_after_query() {
        let mut data = attempt();
        data.redirect_to = Some("https://caller.example/x".to_string());
        let descriptor = settings()
            .finalize_request(&data, RequestLogStatus::Completed, true, None)
            .await;
        assert_eq!(
            "payment-success?doctype=Sales Invoice&docname=SINV-0001\
             &redirect_to=https%3A%2F%2Fcaller.example%2Fx",
            descriptor.redirect_to
        );
    }

    #[tokio::test]
    async fn finalize_hook_redirect_overrides_caller_redirect() {
        let mut data = attempt();
        data.redirect_to = Some("https://caller.example/x".to_string());
        let hook = StaticHook(Some("https://invoice.example/paid".to_string()));
        let descriptor = settings()
            .finalize_request(&data, RequestLogStatus::Completed, true, Some(&hook))
            .await;
        assert_eq!(
            "payment-success?doctype=Sales Invoice&docname=SINV-0001\
             &redirect_to=https%3A%2F%2Finvoice.example%2Fpaid",
            descriptor.redirect_to
        );
    }

    #[tokio::test]
    async fn finalize_swallows_hook_failure() {
        let descriptor = settings()
            .finalize_request(
                &attempt(),
                RequestLogStatus::Completed,
                true,
                Some(&FailingHook),
            )
            .await;
        assert_eq!(
            "payment-success?doctype=Sales Invoice&docname=SINV-0001?redirect_to=",
            descriptor.redirect_to
        );
    }

    #[tokio::test]
    async fn finalize_completed_without_reference_falls_back_to_success_page() {
        let mut data = attempt();
        data.reference = None;
        let descriptor = settings()
            .finalize_request(&data, RequestLogStatus::Completed, true, None)
            .await;
        assert_eq!("payment-success?redirect_to=", descriptor.redirect_to);
    }

    #[tokio::test]
    async fn finalize_appends_redirect_message_with_ampersand() {
        let mut data = attempt();
        data.reference = None;
        data.redirect_message = Some("thank you".to_string());
        let descriptor = settings()
            .finalize_request(&data, RequestLogStatus::Failed, false, None)
            .await;
        assert_eq!(
            "payment-failed?redirect_to=&redirect_message=thank+you",
            descriptor.redirect_to
        );
    }

    #[tokio::test]
    async fn finalize_is_idempotent_for_identical_inputs() {
        let data = attempt();
        let first = settings()
            .finalize_request(&data, RequestLogStatus::Completed, true, None)
            .await;
        let second = settings()
            .finalize_request(&data, RequestLogStatus::Completed, true, None)
            .await;
        assert_eq!(first, second);
    }
}
