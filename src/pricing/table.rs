use crate::config::PricingConfig;
use crate::consts::TOKENS_PER_PRICE_UNIT;
use crate::error::AppError;

use super::types::PriceTier;

/// Ordered prefix table. Later entries win when several keys match.
#[derive(Debug, Clone, Default)]
pub(crate) struct PricingTable {
    tiers: Vec<PriceTier>,
}

impl PricingTable {
    /// Gemini 2.5 list prices. `flash` precedes `flash-lite` so the longer
    /// key is the last match for lite model names.
    pub(crate) fn builtin() -> Self {
        PricingTable {
            tiers: vec![
                PriceTier::per_million("gemini-2.5-flash", (0.3, 0.3), (2.5, 2.5)),
                PriceTier::per_million("gemini-2.5-flash-lite", (0.1, 0.1), (0.4, 0.4)),
                PriceTier::per_million("gemini-2.5-pro", (1.25, 2.5), (10.0, 15.0)),
            ],
        }
    }

    /// Built-in table extended (or replaced) by configured tiers
    pub(crate) fn from_config(config: &PricingConfig) -> Result<Self, AppError> {
        let mut table = if config.replace_defaults {
            PricingTable::default()
        } else {
            PricingTable::builtin()
        };
        for model in &config.models {
            let tier = PriceTier {
                model_key: model.key.clone(),
                input_price_low: model.input_low / TOKENS_PER_PRICE_UNIT,
                input_price_high: model.input_high.unwrap_or(model.input_low) / TOKENS_PER_PRICE_UNIT,
                output_price_low: model.output_low / TOKENS_PER_PRICE_UNIT,
                output_price_high: model.output_high.unwrap_or(model.output_low)
                    / TOKENS_PER_PRICE_UNIT,
                tier_threshold_tokens: model.threshold_tokens,
            };
            table.push(tier)?;
        }
        Ok(table)
    }

    pub(crate) fn push(&mut self, tier: PriceTier) -> Result<(), AppError> {
        validate(&tier)?;
        self.tiers.push(tier);
        Ok(())
    }

    /// Scan every entry and keep the last key that prefixes `model_name`
    pub(crate) fn resolve(&self, model_name: &str) -> Option<&PriceTier> {
        self.tiers
            .iter()
            .filter(|tier| model_name.starts_with(tier.model_key.as_str()))
            .last()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PriceTier> {
        self.tiers.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.tiers.len()
    }
}

fn validate(tier: &PriceTier) -> Result<(), AppError> {
    let invalid = |reason: &str| AppError::InvalidPricing {
        key: tier.model_key.clone(),
        reason: reason.to_string(),
    };
    if tier.model_key.is_empty() {
        return Err(invalid("empty model key"));
    }
    let prices = [
        tier.input_price_low,
        tier.input_price_high,
        tier.output_price_low,
        tier.output_price_high,
    ];
    if prices.iter().any(|p| !p.is_finite() || *p < 0.0) {
        return Err(invalid("prices must be finite and non-negative"));
    }
    if tier.tier_threshold_tokens == 0 {
        return Err(invalid("threshold_tokens must be positive"));
    }
    Ok(())
}
