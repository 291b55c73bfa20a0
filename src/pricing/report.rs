use tracing::warn;

use crate::error::{AppError, CostError};
use crate::message::Conversation;

use super::calculator::{PricedMessage, cost_of_messages, itemize};
use super::table::PricingTable;
use super::types::CostResult;

#[derive(Debug)]
pub(crate) struct ReportRow {
    pub(crate) source: String,
    pub(crate) position: usize,
    pub(crate) model: String,
    pub(crate) priced: PricedMessage,
}

#[derive(Debug)]
pub(crate) struct SkippedRow {
    pub(crate) source: String,
    pub(crate) position: usize,
    pub(crate) model: String,
    pub(crate) error: CostError,
}

/// Cost breakdown across every loaded conversation
#[derive(Debug, Default)]
pub(crate) struct CostReport {
    pub(crate) rows: Vec<ReportRow>,
    pub(crate) skipped: Vec<SkippedRow>,
    pub(crate) total: CostResult,
}

/// Price every conversation.
///
/// Strict mode aborts on the first failing message. With `skip_invalid` the
/// failures are reported as warnings and left out of the total.
pub(crate) fn build_report(
    conversations: &[Conversation],
    table: &PricingTable,
    skip_invalid: bool,
) -> Result<CostReport, AppError> {
    let mut report = CostReport::default();

    for conversation in conversations {
        let source = conversation.label();
        let items = itemize(&conversation.messages, table);

        if !skip_invalid {
            let subtotal = cost_of_messages(&conversation.messages, table).map_err(|e| {
                let location = match items.iter().find(|item| item.outcome.is_err()) {
                    Some(item) => format!("{source}#{}", item.position),
                    None => source.clone(),
                };
                AppError::Cost {
                    location,
                    source: e,
                }
            })?;
            report.total += subtotal;
        }

        for item in items {
            match item.outcome {
                Ok(priced) => {
                    if skip_invalid {
                        report.total += priced.cost;
                    }
                    report.rows.push(ReportRow {
                        source: source.clone(),
                        position: item.position,
                        model: item.model,
                        priced,
                    });
                }
                Err(error) => {
                    warn!(source = %source, position = item.position, "skipping message: {error}");
                    report.skipped.push(SkippedRow {
                        source: source.clone(),
                        position: item.position,
                        model: item.model,
                        error,
                    });
                }
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use serde_json::json;
    use std::path::PathBuf;

    fn conversation(name: &str, messages: serde_json::Value) -> Conversation {
        Conversation {
            source: PathBuf::from(name),
            messages: serde_json::from_value::<Vec<Message>>(messages).unwrap(),
        }
    }

    fn ai(model: &str, input: u64, output: u64) -> serde_json::Value {
        json!({
            "type": "ai",
            "content": "",
            "usage_metadata": {"input_tokens": input, "output_tokens": output},
            "response_metadata": {"model_name": model}
        })
    }

    #[test]
    fn report_totals_across_conversations() {
        let table = PricingTable::builtin();
        let convs = vec![
            conversation("a.json", json!([{"type": "human", "content": "hi"}, ai("gemini-2.5-flash", 100_000, 300_000)])),
            conversation("b.json", json!([ai("gemini-2.5-flash-lite", 1_000_000, 1_000_000)])),
        ];
        let report = build_report(&convs, &table, false).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].source, "a.json");
        assert_eq!(report.rows[0].position, 2);
        assert!(report.skipped.is_empty());
        assert!((report.total.input_cost - (0.03 + 0.1)).abs() < 1e-9);
        assert!((report.total.output_cost - (0.75 + 0.4)).abs() < 1e-9);
    }

    #[test]
    fn strict_report_fails_with_location() {
        let table = PricingTable::builtin();
        let convs = vec![conversation(
            "run.json",
            json!([ai("gemini-2.5-flash", 1, 1), {"type": "tool", "content": "x"}, ai("unknown-model-x", 1, 1)]),
        )];
        let err = build_report(&convs, &table, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "run.json#3: unknown-model-x: not a model name in the pricing table"
        );
    }

    #[test]
    fn tolerant_report_skips_failures() {
        let table = PricingTable::builtin();
        let convs = vec![conversation(
            "run.json",
            json!([
                ai("gemini-2.5-flash", 100_000, 0),
                {"type": "ai", "content": "no usage", "response_metadata": {"model_name": "gemini-2.5-flash"}},
                ai("unknown-model-x", 1, 1)
            ]),
        )];
        let report = build_report(&convs, &table, true).unwrap();
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].error, CostError::MissingUsageMetadata);
        assert_eq!(report.skipped[1].model, "unknown-model-x");
        assert!((report.total.total() - 0.03).abs() < 1e-9);
    }
}
