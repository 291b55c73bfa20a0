//! Per-message and aggregate token cost
//!
//! Only assistant messages are billed. Validation is fail-fast: missing
//! usage, malformed counts and unknown models are errors, never zero cost.

use tracing::debug;

use crate::consts::UNKNOWN;
use crate::error::CostError;
use crate::message::{AssistantMessage, Message};

use super::table::PricingTable;
use super::types::{CostResult, PriceTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CostScope {
    Single,
    Multi,
}

/// Cost of one assistant message together with the inputs it was priced from
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PricedMessage {
    pub(crate) tier: String,
    pub(crate) input_tokens: u64,
    pub(crate) output_tokens: u64,
    pub(crate) cost: CostResult,
}

/// Outcome for one assistant message in a conversation
#[derive(Debug)]
pub(crate) struct LineItem {
    /// 1-based position in the conversation, counting every message
    pub(crate) position: usize,
    pub(crate) model: String,
    pub(crate) outcome: Result<PricedMessage, CostError>,
}

pub(crate) fn format_cost_line(cost: &CostResult, scope: CostScope) -> String {
    let tag = match scope {
        CostScope::Single => "[single message]",
        CostScope::Multi => "[multi message]",
    };
    format!(
        "{tag} input cost: {:.5}, output cost: {:.5}, total cost: {:.5}",
        cost.input_cost,
        cost.output_cost,
        cost.total()
    )
}

fn usage_tokens(message: &AssistantMessage) -> Result<(u64, u64), CostError> {
    let usage = message
        .usage_metadata
        .as_ref()
        .filter(|u| !u.is_empty())
        .ok_or(CostError::MissingUsageMetadata)?;
    let input_tokens = usage.tokens("input_tokens")?;
    let output_tokens = usage.tokens("output_tokens")?;
    Ok((input_tokens, output_tokens))
}

fn resolve_tier<'t>(
    message: &AssistantMessage,
    table: &'t PricingTable,
) -> Result<&'t PriceTier, CostError> {
    let model_name = message.model_name().ok_or(CostError::MissingModelName)?;
    table
        .resolve(model_name)
        .ok_or_else(|| CostError::UnknownModel {
            model: model_name.to_string(),
        })
}

fn price_message(
    message: &AssistantMessage,
    table: &PricingTable,
) -> Result<PricedMessage, CostError> {
    let (input_tokens, output_tokens) = usage_tokens(message)?;
    let tier = resolve_tier(message, table)?;
    Ok(PricedMessage {
        tier: tier.model_key.clone(),
        input_tokens,
        output_tokens,
        cost: tier.cost(input_tokens, output_tokens),
    })
}

pub(crate) fn cost_of_message(
    message: &AssistantMessage,
    table: &PricingTable,
) -> Result<CostResult, CostError> {
    let priced = price_message(message, table)?;
    debug!(
        model = message.model_name().unwrap_or(UNKNOWN),
        tier = %priced.tier,
        "{}",
        format_cost_line(&priced.cost, CostScope::Single)
    );
    Ok(priced.cost)
}

/// Sum the cost of every assistant message; the first failure aborts.
pub(crate) fn cost_of_messages<'a, I>(messages: I, table: &PricingTable) -> Result<CostResult, CostError>
where
    I: IntoIterator<Item = &'a Message>,
{
    let total = messages
        .into_iter()
        .filter_map(|message| match message {
            Message::Assistant(assistant) => Some(assistant),
            _ => None,
        })
        .map(|assistant| cost_of_message(assistant, table))
        .sum::<Result<CostResult, CostError>>()?;
    debug!("{}", format_cost_line(&total, CostScope::Multi));
    Ok(total)
}

/// Price each assistant message separately, keeping failures per item
pub(crate) fn itemize(messages: &[Message], table: &PricingTable) -> Vec<LineItem> {
    messages
        .iter()
        .enumerate()
        .filter_map(|(i, message)| match message {
            Message::Assistant(assistant) => Some(LineItem {
                position: i + 1,
                model: assistant.model_name().unwrap_or(UNKNOWN).to_string(),
                outcome: price_message(assistant, table),
            }),
            _ => None,
        })
        .collect()
}
