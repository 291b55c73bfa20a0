mod node;
mod printable;
mod printer;
mod truncate;

pub(crate) use node::{Describable, Node};
pub(crate) use printable::to_printable;
pub(crate) use printer::{PrintOptions, render_messages};
