use serde_json::json;

use crate::pricing::PricingTable;

use super::format::{
    create_styled_table, format_number, format_unit_price, header_cell, right_cell, styled_cell,
    to_pretty_json,
};
use crate::consts::TOKENS_PER_PRICE_UNIT;

pub(crate) fn output_models_json(table: &PricingTable) -> String {
    let models: Vec<_> = table
        .iter()
        .map(|tier| {
            json!({
                "key": tier.model_key,
                "input_low": tier.input_price_low * TOKENS_PER_PRICE_UNIT,
                "input_high": tier.input_price_high * TOKENS_PER_PRICE_UNIT,
                "output_low": tier.output_price_low * TOKENS_PER_PRICE_UNIT,
                "output_high": tier.output_price_high * TOKENS_PER_PRICE_UNIT,
                "threshold_tokens": tier.tier_threshold_tokens,
            })
        })
        .collect();
    to_pretty_json(&json!(models))
}

pub(crate) fn print_models_table(table: &PricingTable, use_color: bool) {
    let cyan = if use_color {
        Some(comfy_table::Color::Cyan)
    } else {
        None
    };

    let mut out = create_styled_table();
    out.set_header(vec![
        header_cell("Model Prefix", use_color),
        header_cell("Input", use_color),
        header_cell("Input (high)", use_color),
        header_cell("Output", use_color),
        header_cell("Output (high)", use_color),
        header_cell("Threshold", use_color),
    ]);
    for tier in table.iter() {
        out.add_row(vec![
            styled_cell(&tier.model_key, cyan, false),
            right_cell(&format_unit_price(tier.input_price_low), None, false),
            right_cell(&format_unit_price(tier.input_price_high), None, false),
            right_cell(&format_unit_price(tier.output_price_low), None, false),
            right_cell(&format_unit_price(tier.output_price_high), None, false),
            right_cell(&format_number(tier.tier_threshold_tokens), None, false),
        ]);
    }

    println!("\n  Pricing (USD per 1M tokens, last matching prefix wins)\n");
    println!("{out}");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_json_lists_builtin_in_order() {
        let out: serde_json::Value =
            serde_json::from_str(&output_models_json(&PricingTable::builtin())).unwrap();
        let keys: Vec<_> = out
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["key"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            keys,
            vec!["gemini-2.5-flash", "gemini-2.5-flash-lite", "gemini-2.5-pro"]
        );
        assert!((out[2]["output_high"].as_f64().unwrap() - 15.0).abs() < 1e-9);
        assert_eq!(out[2]["threshold_tokens"], json!(200_000));
    }
}
