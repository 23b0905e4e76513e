//! Gateway related const declarations

/// Service name recorded on request log entries
pub const IZIPAY_SERVICE_NAME: &str = "Izipay";

/// Doctype holding the Izipay gateway settings
pub const IZIPAY_SETTINGS_DOCTYPE: &str = "Izipay Settings";

/// Route of the hosted checkout page (the Izipay flow is Stripe-backed and
/// reuses the Stripe checkout page)
pub const CHECKOUT_ROUTE: &str = "stripe_checkout";

/// Page the payer lands on after a captured charge
pub const PAYMENT_SUCCESS_ROUTE: &str = "payment-success";

/// Page the payer lands on after an uncaptured or failed charge
pub const PAYMENT_FAILED_ROUTE: &str = "payment-failed";

/// Generic message page used by the terminal server-error path
pub const MESSAGE_ROUTE: &str = "message";

/// Title shown on the server-error message page
pub const SERVER_ERROR_TITLE: &str = "Server Error";

/// Fixed user-facing copy for the server-error path; the underlying error is
/// only ever logged server-side
pub const SERVER_ERROR_MESSAGE: &str = "It seems that there is an issue with the server's stripe configuration. In case of failure, the amount will get refunded to your account.";
