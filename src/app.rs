use serde_json::json;
use tracing::debug;

use crate::cli::{Cli, Commands, PrintMode};
use crate::config::Config;
use crate::consts::DEFAULT_MAX_DEPTH;
use crate::error::AppError;
use crate::inspect::{Node, PrintOptions, render_messages, to_printable};
use crate::message::{Conversation, load_conversations};
use crate::output::{
    output_cost_json, output_models_json, print_cost_table, print_models_table, to_pretty_json,
};
use crate::pricing::{PricingTable, build_report};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) config: &'a Config,
    pub(crate) pricing: &'a PricingTable,
}

fn handle_cost(inputs: &[String], skip_invalid: bool, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let conversations = load_conversations(inputs)?;
    let report = build_report(&conversations, ctx.pricing, skip_invalid)?;
    debug!(
        conversations = conversations.len(),
        priced = report.rows.len(),
        skipped = report.skipped.len(),
        "cost report ready"
    );
    if ctx.cli.json {
        println!("{}", output_cost_json(&report));
    } else {
        print_cost_table(&report, ctx.cli.use_color());
    }
    Ok(())
}

/// Printable form of every message, grouped by source file
fn inspect_json(conversations: &[Conversation], max_depth: usize) -> String {
    let files: Vec<_> = conversations
        .iter()
        .map(|conversation| {
            let messages: Vec<_> = conversation
                .messages
                .iter()
                .map(|m| to_printable(&Node::Object(m), max_depth, 0))
                .collect();
            json!({"source": conversation.label(), "messages": messages})
        })
        .collect();
    to_pretty_json(&json!(files))
}

fn handle_inspect(
    inputs: &[String],
    options: PrintOptions,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let conversations = load_conversations(inputs)?;

    if ctx.cli.json {
        let max_depth = options.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);
        println!("{}", inspect_json(&conversations, max_depth));
        return Ok(());
    }

    for conversation in &conversations {
        if conversations.len() > 1 {
            println!("# {}", conversation.label());
        }
        print!("{}", render_messages(&conversation.messages, &options));
    }
    Ok(())
}

fn handle_models(ctx: &CommandContext<'_>) {
    if ctx.cli.json {
        println!("{}", output_models_json(ctx.pricing));
    } else {
        print_models_table(ctx.pricing, ctx.cli.use_color());
    }
}

/// Dispatch the parsed command
pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let pricing = PricingTable::from_config(&config.pricing)?;
    debug!(tiers = pricing.len(), "pricing table ready");

    let ctx = CommandContext {
        cli,
        config,
        pricing: &pricing,
    };

    match &cli.command {
        Commands::Cost {
            inputs,
            skip_invalid,
        } => handle_cost(inputs, *skip_invalid, &ctx),
        Commands::Inspect {
            inputs,
            mode,
            max_content_length,
            max_depth,
            no_metadata,
            no_content,
        } => {
            let options = PrintOptions {
                mode: *mode,
                show_metadata: !no_metadata,
                show_content: !no_content,
                max_content_length: max_content_length.or(ctx.config.max_content_length),
                max_depth: max_depth.or(ctx.config.max_depth),
            };
            debug!(mode = ?options.mode, "inspecting messages");
            handle_inspect(inputs, options, &ctx)
        }
        Commands::Models => {
            handle_models(&ctx);
            Ok(())
        }
    }
}
