// Target-agnostic type descriptor. No serde_json::Value here.

use indexmap::IndexMap;

/// Object fields keyed by the original JSON key; insertion order is source order.
pub type Fields = IndexMap<String, Ty>;

#[derive(Debug, Clone, PartialEq)]
pub enum Ty {
    Null,
    String,
    Integer,                 // numeric sample with zero fractional part
    Number,
    Bool,
    Array(Box<Ty>),          // element type of the first element only
    Object(Fields),
    Any,                     // unclassifiable, or the element of an empty array
}

impl Ty {
    pub fn as_object(&self) -> Option<&Fields> {
        match self {
            Ty::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Strip every array layer, returning the innermost element and how many layers were removed.
    pub fn innermost(&self) -> (&Ty, usize) {
        let mut ty = self;
        let mut depth = 0;
        while let Ty::Array(item) = ty {
            ty = item;
            depth += 1;
        }
        (ty, depth)
    }

    /// Minimal JSON Schema–ish view of the descriptor, for debugging and the `schema` command.
    pub fn to_schema(&self) -> serde_json::Value {
        use serde_json::{json, Map, Value};
        match self {
            Ty::Null => json!({ "type": "null" }),
            Ty::String => json!({ "type": "string" }),
            Ty::Integer => json!({ "type": "integer" }),
            Ty::Number => json!({ "type": "number" }),
            Ty::Bool => json!({ "type": "boolean" }),
            Ty::Any => json!({}),
            Ty::Array(item) => json!({
                "type": "array",
                "items": item.to_schema(),
            }),
            Ty::Object(fields) => {
                let mut props = Map::new();
                for (k, ty) in fields {
                    props.insert(k.clone(), ty.to_schema());
                }
                let required = fields.keys().cloned().map(Value::from).collect::<Vec<_>>();
                let mut o = json!({ "type": "object", "properties": props });
                if !required.is_empty() {
                    o["required"] = Value::Array(required);
                }
                o
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn innermost_unwraps_all_array_layers() {
        let ty = Ty::Array(Box::new(Ty::Array(Box::new(Ty::String))));
        let (inner, depth) = ty.innermost();
        assert_eq!(inner, &Ty::String);
        assert_eq!(depth, 2);
        assert_eq!(Ty::Bool.innermost(), (&Ty::Bool, 0));
    }

    #[test]
    fn schema_view_keeps_field_order() {
        let mut fields = Fields::new();
        fields.insert("b".into(), Ty::Integer);
        fields.insert("a".into(), Ty::Array(Box::new(Ty::Any)));
        let schema = Ty::Object(fields).to_schema();
        let keys = schema["properties"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(schema["properties"]["a"]["items"], serde_json::json!({}));
        assert_eq!(schema["required"], serde_json::json!(["b", "a"]));
    }
}
