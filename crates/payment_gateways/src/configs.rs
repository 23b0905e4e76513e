//! Gateway configuration

use std::collections::HashMap;

use masking::Secret;
use serde::Deserialize;

fn default_charge_api_base_url() -> String {
    "https://api.stripe.com".to_string()
}

fn default_supported_currencies() -> Vec<String> {
    vec!["PEN".to_string()]
}

fn default_minimum_charge_amounts() -> HashMap<String, f64> {
    HashMap::from([("PEN".to_string(), 1.0)])
}

/// Connection parameters for the upstream charge API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeApiParams {
    /// Base URL of the charge API
    #[serde(default = "default_charge_api_base_url")]
    pub base_url: String,
}

impl Default for ChargeApiParams {
    fn default() -> Self {
        Self {
            base_url: default_charge_api_base_url(),
        }
    }
}

/// Fields of the Izipay settings document, as saved from the configuration
/// UI, plus the deployment-level parameters the controller needs at
/// transaction time.
#[derive(Debug, Clone, Deserialize)]
pub struct IzipayConfig {
    /// Display name distinguishing this gateway instance
    pub gateway_name: String,
    /// Publishable credential handed to the checkout page
    pub publishable_key: Secret<String>,
    /// Secret credential used for charge API calls
    pub secret_key: Secret<String>,
    /// Static redirect override; when set it replaces the computed redirect
    /// target for every completed attempt
    #[serde(default)]
    pub redirect_url: Option<String>,
    /// Base URL the checkout and outcome pages are served from
    pub site_url: String,
    /// Upstream charge API parameters
    #[serde(default)]
    pub charge_api: ChargeApiParams,
    /// Currencies the gateway accepts, matched exactly
    #[serde(default = "default_supported_currencies")]
    pub supported_currencies: Vec<String>,
    /// Minimum chargeable amount per currency; currencies absent from the
    /// table have no floor
    #[serde(default = "default_minimum_charge_amounts")]
    pub currency_wise_minimum_charge_amount: HashMap<String, f64>,
}
