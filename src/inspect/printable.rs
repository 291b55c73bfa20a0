//! Recursive conversion of a [`Node`] tree into JSON for display

use serde_json::{Map, Value};

use super::node::{Describable, Node};

/// Key holding the type name of a converted object
pub(crate) const CLASS_KEY: &str = "__class__";

/// Convert `value` into a JSON-safe structure.
///
/// Anything deeper than `max_depth` is rendered with [`Node::repr`]. Objects
/// already on the current path are rendered as `<cycle TypeName>`.
pub(crate) fn to_printable(value: &Node<'_>, max_depth: usize, depth: usize) -> Value {
    let mut path = Vec::new();
    convert(value, max_depth, depth, &mut path)
}

fn object_addr(obj: &dyn Describable) -> *const () {
    obj as *const dyn Describable as *const ()
}

fn convert(node: &Node<'_>, max_depth: usize, depth: usize, path: &mut Vec<*const ()>) -> Value {
    if depth > max_depth {
        return Value::String(node.repr());
    }

    match node {
        Node::Null => Value::Null,
        Node::Str(s) => Value::String((*s).to_string()),
        Node::Json(json) => convert_json(json, max_depth, depth),
        Node::List(items) => Value::Array(
            items
                .iter()
                .map(|item| convert(item, max_depth, depth + 1, path))
                .collect(),
        ),
        Node::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), convert(v, max_depth, depth + 1, path)))
                .collect(),
        ),
        Node::Object(obj) => {
            let addr = object_addr(*obj);
            if path.contains(&addr) {
                return Value::String(format!("<cycle {}>", obj.type_name()));
            }
            path.push(addr);
            let mut map = Map::new();
            map.insert(CLASS_KEY.to_string(), Value::String(obj.type_name().to_string()));
            for (name, field) in obj.fields() {
                map.insert(name.to_string(), convert(&field, max_depth, depth + 1, path));
            }
            path.pop();
            Value::Object(map)
        }
    }
}

fn convert_json(json: &Value, max_depth: usize, depth: usize) -> Value {
    if depth > max_depth {
        return Value::String(Node::Json(json).repr());
    }
    match json {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| convert_json(item, max_depth, depth + 1))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), convert_json(v, max_depth, depth + 1)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}
