//! Python `@dataclass` declarations with snake_case attributes.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::{suffix_if_reserved, to_snake_case};
use crate::options::PlainOptions;

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

/// Capitalised keywords and the `typing` import.
const RESERVED_TYPES: &[&str] = &["None", "True", "False", "Any"];

const HEADER: &str = "from dataclasses import dataclass\nfrom typing import Any\n\n\n";

pub struct Python;

impl Emitter for Python {
    type Options = PlainOptions;
    const TARGET: Target = Target::Python;

    fn reserves_type_name(name: &str) -> bool {
        RESERVED_TYPES.contains(&name)
    }

    fn emit(&self, plan: &Plan<'_>, _options: &PlainOptions) -> Rendered {
        let blocks = plan.types().map(render_dataclass).collect::<Vec<_>>();
        Rendered::Single {
            content: stack(HEADER, &blocks, "\n\n"),
            language: Target::Python.language(),
        }
    }
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null => "None".to_string(),
        Slot::String => "str".to_string(),
        Slot::Integer => "int".to_string(),
        Slot::Number => "float".to_string(),
        Slot::Bool => "bool".to_string(),
        Slot::Any => "Any".to_string(),
        Slot::List(item) => format!("list[{}]", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

fn render_dataclass(ty: &NamedType<'_>) -> String {
    let mut code = format!("@dataclass\nclass {}:\n", ty.name);
    if ty.is_empty() {
        code.push_str("    pass\n");
    }
    for (key, slot) in ty.slots() {
        let field = suffix_if_reserved(to_snake_case(key), KEYWORDS);
        code.push_str(&format!("    {field}: {}\n", type_expr(&slot)));
    }
    code
}
