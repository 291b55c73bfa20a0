mod cost;
mod format;
mod models;

pub(crate) use cost::{output_cost_json, print_cost_table};
pub(crate) use format::to_pretty_json;
pub(crate) use models::{output_models_json, print_models_table};
