//! Rust structs deriving serde, with `#[serde(rename = "...")]` wherever the
//! snake_case field name differs from the JSON key.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::to_snake_case;
use crate::options::PlainOptions;

/// Keywords usable as raw identifiers (`r#type`).
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let", "loop",
    "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return", "static",
    "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual",
    "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NOT_RAW: &[&str] = &["crate", "self", "super", "Self", "_"];

/// Prelude and serde names the generated code refers to, plus `Self`/`_`.
const RESERVED_TYPES: &[&str] = &[
    "Self", "_", "String", "Vec", "Option", "Result", "Box", "Some", "None", "Ok", "Err",
    "Serialize", "Deserialize",
];

const HEADER: &str = "use serde::{Deserialize, Serialize};\n\n";

pub struct Rust;

impl Emitter for Rust {
    type Options = PlainOptions;
    const TARGET: Target = Target::Rust;

    fn reserves_type_name(name: &str) -> bool {
        RESERVED_TYPES.contains(&name)
    }

    fn emit(&self, plan: &Plan<'_>, _options: &PlainOptions) -> Rendered {
        let blocks = plan.types().map(render_struct).collect::<Vec<_>>();
        Rendered::Single {
            content: stack(HEADER, &blocks, "\n\n"),
            language: Target::Rust.language(),
        }
    }
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null => "Option<()>".to_string(),
        Slot::String => "String".to_string(),
        Slot::Integer => "i64".to_string(),
        Slot::Number => "f64".to_string(),
        Slot::Bool => "bool".to_string(),
        Slot::Any => "serde_json::Value".to_string(),
        Slot::List(item) => format!("Vec<{}>", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

/// Field identifier for `key`, and whether serde needs an explicit rename.
fn field_ident(key: &str) -> (String, bool) {
    let snake = to_snake_case(key);
    if NOT_RAW.contains(&snake.as_str()) {
        return (format!("{snake}_"), true);
    }
    let renamed = snake != key;
    if KEYWORDS.contains(&snake.as_str()) {
        // serde strips the `r#` prefix when deriving the wire name
        return (format!("r#{snake}"), renamed);
    }
    (snake, renamed)
}

fn render_struct(ty: &NamedType<'_>) -> String {
    let mut code = String::from("#[derive(Debug, Clone, Serialize, Deserialize)]\n");
    code.push_str(&format!("pub struct {} {{\n", ty.name));
    if ty.is_empty() {
        code.push_str("    // no fields observed\n");
    }
    for (key, slot) in ty.slots() {
        let (field, renamed) = field_ident(key);
        if renamed {
            code.push_str(&format!("    #[serde(rename = \"{}\")]\n", key.escape_default()));
        }
        code.push_str(&format!("    pub {field}: {},\n", type_expr(&slot)));
    }
    code.push('}');
    code
}
