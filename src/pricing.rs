use std::env;

/// Conversion between catalog prices (major units, currency-agnostic) and the
/// minor-unit amounts the payment provider bills in, plus the flat delivery
/// surcharge added to every checkout.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    pub currency: String,
    pub fx_multiplier: i64,
    pub delivery_fee: i64,
}

impl PricingPolicy {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let currency =
            env::var("PAYMENT_CURRENCY").unwrap_or(defaults.currency);
        let fx_multiplier = env::var("PAYMENT_FX_MULTIPLIER")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults.fx_multiplier);
        let delivery_fee = env::var("DELIVERY_FEE")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(defaults.delivery_fee);
        Self {
            currency,
            fx_multiplier,
            delivery_fee,
        }
    }

    /// Minor-unit amount the provider charges for one unit at `price`.
    pub fn unit_amount(&self, price: i64) -> i64 {
        price * 100 * self.fx_multiplier
    }

    pub fn delivery_amount(&self) -> i64 {
        self.unit_amount(self.delivery_fee)
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            currency: "inr".to_string(),
            fx_multiplier: 80,
            delivery_fee: 2,
        }
    }
}
