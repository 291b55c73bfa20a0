use comfy_table::{Cell, Color};
use serde_json::json;

use crate::pricing::{CostReport, CostResult, ReportRow};

use super::format::{
    create_styled_table, format_cost, format_number, header_cell, right_cell,
    styled_cell, to_pretty_json,
};

fn total_json(total: &CostResult) -> serde_json::Value {
    json!({
        "input_cost": total.input_cost,
        "output_cost": total.output_cost,
        "total_cost": total.total(),
    })
}

pub(crate) fn output_cost_json(report: &CostReport) -> String {
    let messages: Vec<_> = report
        .rows
        .iter()
        .map(|row| {
            json!({
                "source": row.source,
                "position": row.position,
                "model": row.model,
                "tier": row.priced.tier,
                "input_tokens": row.priced.input_tokens,
                "output_tokens": row.priced.output_tokens,
                "input_cost": row.priced.cost.input_cost,
                "output_cost": row.priced.cost.output_cost,
                "total_cost": row.priced.cost.total(),
            })
        })
        .collect();
    let skipped: Vec<_> = report
        .skipped
        .iter()
        .map(|row| {
            json!({
                "source": row.source,
                "position": row.position,
                "model": row.model,
                "error": row.error.to_string(),
            })
        })
        .collect();

    to_pretty_json(&json!({
        "messages": messages,
        "skipped": skipped,
        "total": total_json(&report.total),
    }))
}

/// Summed token counts for the total row, clamped at `u64::MAX`
fn token_totals(rows: &[ReportRow]) -> (u64, u64) {
    rows.iter().fold((0u64, 0u64), |(input, output), row| {
        (
            input.saturating_add(row.priced.input_tokens),
            output.saturating_add(row.priced.output_tokens),
        )
    })
}

pub(crate) fn print_cost_table(report: &CostReport, use_color: bool) {
    if report.rows.is_empty() && report.skipped.is_empty() {
        println!("No assistant messages found.");
        return;
    }

    let cyan = if use_color { Some(Color::Cyan) } else { None };
    let green = if use_color { Some(Color::Green) } else { None };

    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Source", use_color),
        header_cell("#", use_color),
        header_cell("Model", use_color),
        header_cell("Tier", use_color),
        header_cell("Input", use_color),
        header_cell("Output", use_color),
        header_cell("In Cost", use_color),
        header_cell("Out Cost", use_color),
        header_cell("Cost", use_color),
    ]);

    let (input_tokens, output_tokens) = token_totals(&report.rows);
    for row in &report.rows {
        let priced = &row.priced;
        table.add_row(vec![
            Cell::new(&row.source),
            right_cell(&row.position.to_string(), None, false),
            Cell::new(&row.model),
            Cell::new(&priced.tier),
            right_cell(&format_number(priced.input_tokens), None, false),
            right_cell(&format_number(priced.output_tokens), None, false),
            right_cell(&format_cost(priced.cost.input_cost), None, false),
            right_cell(&format_cost(priced.cost.output_cost), None, false),
            right_cell(&format_cost(priced.cost.total()), green, false),
        ]);
    }

    table.add_row(vec![
        styled_cell("TOTAL", cyan, true),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        right_cell(&format_number(input_tokens), cyan, true),
        right_cell(&format_number(output_tokens), cyan, true),
        right_cell(&format_cost(report.total.input_cost), cyan, true),
        right_cell(&format_cost(report.total.output_cost), cyan, true),
        right_cell(&format_cost(report.total.total()), green, true),
    ]);

    println!("\n  Token Cost\n");
    println!("{table}");

    if !report.skipped.is_empty() {
        println!("\n  Skipped {} message(s):", report.skipped.len());
        for row in &report.skipped {
            let line = format!("    {}#{} ({}): {}", row.source, row.position, row.model, row.error);
            if use_color {
                println!("\x1b[31m{line}\x1b[0m");
            } else {
                println!("{line}");
            }
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Conversation;
    use crate::pricing::{PricingTable, build_report};
    use std::path::PathBuf;

    #[test]
    fn token_totals_saturate() {
        let conversation = Conversation {
            source: PathBuf::from("huge.json"),
            messages: serde_json::from_value(json!([
                {
                    "type": "ai",
                    "content": "",
                    "usage_metadata": {"input_tokens": u64::MAX, "output_tokens": 1},
                    "response_metadata": {"model_name": "gemini-2.5-flash"}
                },
                {
                    "type": "ai",
                    "content": "",
                    "usage_metadata": {"input_tokens": 5, "output_tokens": 2},
                    "response_metadata": {"model_name": "gemini-2.5-flash"}
                }
            ]))
            .unwrap(),
        };
        let report = build_report(&[conversation], &PricingTable::builtin(), false).unwrap();
        assert_eq!(token_totals(&report.rows), (u64::MAX, 3));
    }

    #[test]
    fn cost_json_shape() {
        let conversation = Conversation {
            source: PathBuf::from("run.json"),
            messages: serde_json::from_value(json!([
                {"type": "human", "content": "hi"},
                {
                    "type": "ai",
                    "content": "hello",
                    "usage_metadata": {"input_tokens": 100000, "output_tokens": 300000},
                    "response_metadata": {"model_name": "gemini-2.5-flash"}
                }
            ]))
            .unwrap(),
        };
        let report = build_report(&[conversation], &PricingTable::builtin(), false).unwrap();
        let out: serde_json::Value = serde_json::from_str(&output_cost_json(&report)).unwrap();
        assert_eq!(out["messages"][0]["position"], json!(2));
        assert_eq!(out["messages"][0]["tier"], json!("gemini-2.5-flash"));
        assert!((out["total"]["total_cost"].as_f64().unwrap() - 0.78).abs() < 1e-9);
        assert_eq!(out["skipped"], json!([]));
    }
}
