//! C typedef'd structs. Type names are `snake_case_t`; arrays are pointers
//! paired with a `size_t <field>_count`.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::{suffix_if_reserved, to_snake_case};
use crate::options::PlainOptions;

const KEYWORDS: &[&str] = &[
    "auto", "bool", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register", "restrict",
    "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
    "unsigned", "void", "volatile", "while",
];

/// Typedefs from the included headers that a `<name>_t` could redefine.
const HEADER_TYPES: &[&str] = &[
    "size_t", "ptrdiff_t", "wchar_t", "max_align_t", "int8_t", "int16_t", "int32_t", "int64_t",
    "uint8_t", "uint16_t", "uint32_t", "uint64_t", "intptr_t", "uintptr_t", "intmax_t",
    "uintmax_t",
];

const HEADER: &str = "#include <stdbool.h>\n#include <stddef.h>\n#include <stdint.h>\n\n";

pub struct C;

impl Emitter for C {
    type Options = PlainOptions;
    const TARGET: Target = Target::C;

    fn reserves_type_name(name: &str) -> bool {
        HEADER_TYPES.contains(&type_name(name).as_str())
    }

    fn emit(&self, plan: &Plan<'_>, _options: &PlainOptions) -> Rendered {
        let blocks = plan.types().map(render_struct).collect::<Vec<_>>();
        Rendered::Single {
            content: stack(HEADER, &blocks, "\n\n"),
            language: Target::C.language(),
        }
    }
}

fn type_name(name: &str) -> String {
    format!("{}_t", to_snake_case(name))
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null | Slot::Any => "void*".to_string(),
        Slot::String => "char*".to_string(),
        Slot::Integer => "int64_t".to_string(),
        Slot::Number => "double".to_string(),
        Slot::Bool => "bool".to_string(),
        Slot::List(item) => format!("{}*", type_expr(item)),
        Slot::Named(name) => type_name(name),
    }
}

fn render_struct(ty: &NamedType<'_>) -> String {
    let mut code = String::from("typedef struct {\n");
    if ty.is_empty() {
        code.push_str("    int dummy; /* empty struct placeholder */\n");
    }
    for (key, slot) in ty.slots() {
        let field = suffix_if_reserved(to_snake_case(key), KEYWORDS);
        code.push_str(&format!("    {} {field};\n", type_expr(&slot)));
        if matches!(slot, Slot::List(_)) {
            code.push_str(&format!("    size_t {field}_count;\n"));
        }
    }
    code.push_str(&format!("}} {};", type_name(&ty.name)));
    code
}
