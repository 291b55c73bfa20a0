use serde_json::{Map, Value};

/// Borrowed view of a value for the printable converter.
///
/// Structured types expose themselves through [`Describable`] instead of
/// runtime reflection.
pub(crate) enum Node<'a> {
    Null,
    Str(&'a str),
    Json(&'a Value),
    List(Vec<Node<'a>>),
    Map(Vec<(String, Node<'a>)>),
    Object(&'a dyn Describable),
}

pub(crate) trait Describable {
    fn type_name(&self) -> &'static str;

    /// Named fields in declaration order
    fn fields(&self) -> Vec<(&'static str, Node<'_>)>;

    /// Shallow string form used once the depth cap is reached
    fn repr(&self) -> String {
        format!("<{}>", self.type_name())
    }
}

impl<'a> Node<'a> {
    pub(crate) fn opt_str(value: Option<&'a str>) -> Self {
        value.map_or(Node::Null, Node::Str)
    }

    pub(crate) fn map(map: &'a Map<String, Value>) -> Self {
        Node::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), Node::Json(v)))
                .collect(),
        )
    }

    pub(crate) fn list<T: Describable>(items: &'a [T]) -> Self {
        Node::List(
            items
                .iter()
                .map(|item| Node::Object(item as &dyn Describable))
                .collect(),
        )
    }

    /// String representation. Containers render as compact JSON; nested
    /// objects contribute their own [`Describable::repr`].
    pub(crate) fn repr(&self) -> String {
        match self {
            Node::Str(s) => (*s).to_string(),
            Node::Json(Value::String(s)) => s.clone(),
            Node::Object(obj) => obj.repr(),
            other => other.shallow_json().to_string(),
        }
    }

    fn shallow_json(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Str(s) => Value::String((*s).to_string()),
            Node::Json(v) => (*v).clone(),
            Node::List(items) => Value::Array(items.iter().map(Node::shallow_json).collect()),
            Node::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.shallow_json()))
                    .collect(),
            ),
            Node::Object(obj) => Value::String(obj.repr()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Point {
        x: Value,
    }

    impl Describable for Point {
        fn type_name(&self) -> &'static str {
            "Point"
        }

        fn fields(&self) -> Vec<(&'static str, Node<'_>)> {
            vec![("x", Node::Json(&self.x))]
        }
    }

    #[test]
    fn repr_primitives() {
        assert_eq!(Node::Null.repr(), "null");
        let n = json!(42);
        assert_eq!(Node::Json(&n).repr(), "42");
        assert_eq!(Node::Str("abc").repr(), "abc");
    }

    #[test]
    fn repr_json_string_is_unquoted() {
        let v = json!("hello");
        assert_eq!(Node::Json(&v).repr(), "hello");
        let v = json!({"a": 1});
        assert_eq!(Node::Json(&v).repr(), r#"{"a":1}"#);
    }

    #[test]
    fn repr_containers_render_compact_json() {
        let points = [Point { x: json!(1) }, Point { x: json!(2) }];
        assert_eq!(Node::list(&points).repr(), r#"["<Point>","<Point>"]"#);
        assert_eq!(Node::Object(&points[0]).repr(), "<Point>");

        let usage = json!({"input_tokens": 3, "output_tokens": 4});
        let map = Node::map(usage.as_object().unwrap());
        assert_eq!(map.repr(), Node::Json(&usage).repr());
        assert_eq!(map.repr(), r#"{"input_tokens":3,"output_tokens":4}"#);
    }

    #[test]
    fn opt_str_none_is_null() {
        assert!(matches!(Node::opt_str(None), Node::Null));
        assert!(matches!(Node::opt_str(Some("id")), Node::Str("id")));
    }
}
