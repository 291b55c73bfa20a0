use std::ops::{Add, AddAssign};

use crate::consts::{DEFAULT_TIER_THRESHOLD_TOKENS, TOKENS_PER_PRICE_UNIT};

/// Unit prices for one model family (per token, not per million)
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PriceTier {
    pub(crate) model_key: String,
    pub(crate) input_price_low: f64,
    pub(crate) input_price_high: f64,
    pub(crate) output_price_low: f64,
    pub(crate) output_price_high: f64,
    pub(crate) tier_threshold_tokens: u64,
}

impl PriceTier {
    /// Build a tier from USD-per-million quotes with the default threshold
    pub(crate) fn per_million(
        model_key: &str,
        input: (f64, f64),
        output: (f64, f64),
    ) -> Self {
        PriceTier {
            model_key: model_key.to_string(),
            input_price_low: input.0 / TOKENS_PER_PRICE_UNIT,
            input_price_high: input.1 / TOKENS_PER_PRICE_UNIT,
            output_price_low: output.0 / TOKENS_PER_PRICE_UNIT,
            output_price_high: output.1 / TOKENS_PER_PRICE_UNIT,
            tier_threshold_tokens: DEFAULT_TIER_THRESHOLD_TOKENS,
        }
    }

    pub(crate) fn input_price(&self, tokens: u64) -> f64 {
        if tokens <= self.tier_threshold_tokens {
            self.input_price_low
        } else {
            self.input_price_high
        }
    }

    pub(crate) fn output_price(&self, tokens: u64) -> f64 {
        if tokens <= self.tier_threshold_tokens {
            self.output_price_low
        } else {
            self.output_price_high
        }
    }

    pub(crate) fn cost(&self, input_tokens: u64, output_tokens: u64) -> CostResult {
        CostResult {
            input_cost: input_tokens as f64 * self.input_price(input_tokens),
            output_cost: output_tokens as f64 * self.output_price(output_tokens),
        }
    }
}

/// Cost in the price table's currency
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CostResult {
    pub(crate) input_cost: f64,
    pub(crate) output_cost: f64,
}

impl CostResult {
    pub(crate) fn total(&self) -> f64 {
        self.input_cost + self.output_cost
    }
}

impl Add for CostResult {
    type Output = CostResult;

    fn add(self, rhs: CostResult) -> CostResult {
        CostResult {
            input_cost: self.input_cost + rhs.input_cost,
            output_cost: self.output_cost + rhs.output_cost,
        }
    }
}

impl AddAssign for CostResult {
    fn add_assign(&mut self, rhs: CostResult) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for CostResult {
    fn sum<I: Iterator<Item = CostResult>>(iter: I) -> CostResult {
        iter.fold(CostResult::default(), Add::add)
    }
}
