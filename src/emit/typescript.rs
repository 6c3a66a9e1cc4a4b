//! TypeScript `interface` declarations. Keys are used verbatim, so wire names
//! never need metadata; keys that are not identifiers are quoted.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::is_js_identifier;
use crate::options::PlainOptions;

/// Globals that a top-level declaration would merge with or shadow.
pub(crate) const GLOBAL_TYPES: &[&str] = &[
    "Array", "Boolean", "Date", "Error", "Function", "JSON", "Map", "Math", "Number", "Object",
    "Promise", "Record", "RegExp", "Set", "String", "Symbol",
];

pub struct TypeScript;

impl Emitter for TypeScript {
    type Options = PlainOptions;
    const TARGET: Target = Target::TypeScript;

    fn reserves_type_name(name: &str) -> bool {
        GLOBAL_TYPES.contains(&name)
    }

    fn emit(&self, plan: &Plan<'_>, _options: &PlainOptions) -> Rendered {
        let mut blocks = plan.types().map(render_interface).collect::<Vec<_>>();
        if plan.root_array_depth > 0 {
            let root = &plan.root.name;
            blocks.push(format!("type {root}Array = {root}{};", "[]".repeat(plan.root_array_depth)));
        }
        Rendered::Single {
            content: stack("", &blocks, "\n\n"),
            language: Target::TypeScript.language(),
        }
    }
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null => "null".to_string(),
        Slot::String => "string".to_string(),
        Slot::Integer | Slot::Number => "number".to_string(),
        Slot::Bool => "boolean".to_string(),
        Slot::Any => "any".to_string(),
        Slot::List(item) => format!("{}[]", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

fn property_key(key: &str) -> String {
    if is_js_identifier(key) {
        key.to_string()
    } else {
        format!("\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn render_interface(ty: &NamedType<'_>) -> String {
    let mut code = format!("interface {} {{\n", ty.name);
    if ty.is_empty() {
        code.push_str("  [key: string]: unknown;\n");
    }
    for (key, slot) in ty.slots() {
        code.push_str(&format!("  {}: {};\n", property_key(key), type_expr(&slot)));
    }
    code.push('}');
    code
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit;
    use crate::inference::infer;
    use serde_json::Value;

    fn render(src: &str, root: &str) -> String {
        let ty = infer(src).unwrap();
        emit(Target::TypeScript, &ty, root, &Value::Null).unwrap().as_text().unwrap().to_string()
    }

    #[test]
    fn person_round_trip() {
        let out = render(
            r#"{"name":"Ada","age":37,"active":true,"tags":["x","y"],"address":{"city":"London"}}"#,
            "Person",
        );
        assert_eq!(
            out,
            "interface Address {\n  city: string;\n}\n\n\
             interface Person {\n  name: string;\n  age: number;\n  active: boolean;\n  tags: string[];\n  address: Address;\n}\n"
        );
    }

    #[test]
    fn keys_are_verbatim_or_quoted() {
        let out = render(r#"{"user_id":1,"first name":"x","$ref":null,"empty":[]}"#, "Row");
        assert!(out.contains("  user_id: number;"));
        assert!(out.contains("  \"first name\": string;"));
        assert!(out.contains("  $ref: null;"));
        assert!(out.contains("  empty: any[];"));
    }

    #[test]
    fn field_order_is_preserved() {
        let out = render(r#"{"b":1,"a":2}"#, "Root");
        assert!(out.find("  b:").unwrap() < out.find("  a:").unwrap());
    }

    #[test]
    fn empty_object_gets_index_signature() {
        let out = render(r#"{"meta":{},"rows":[{}]}"#, "Root");
        assert!(out.contains("interface Meta {\n  [key: string]: unknown;\n}"));
        assert!(out.contains("interface RowsItem {\n  [key: string]: unknown;\n}"));
        assert!(out.contains("  rows: RowsItem[];"));
    }

    #[test]
    fn global_names_are_not_redeclared() {
        let out = render(r#"[{"date":{"a":1},"tags":["x"]}]"#, "object");
        assert!(out.contains("interface DateType {\n  a: number;\n}"));
        assert!(out.contains("interface ObjectType {\n  date: DateType;\n  tags: string[];\n}"));
        assert!(!out.contains("interface Date {"));
        assert!(out.ends_with("type ObjectTypeArray = ObjectType[];\n"));
    }

    #[test]
    fn array_root_gets_alias() {
        let out = render(r#"[{"id":1}]"#, "User");
        assert!(out.ends_with("type UserArray = User[];\n"));
    }
}
