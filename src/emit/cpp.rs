//! C++ structs over standard library types.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::{suffix_if_reserved, to_snake_case};
use crate::options::PlainOptions;

const KEYWORDS: &[&str] = &[
    "alignas", "alignof", "and", "asm", "auto", "bool", "break", "case", "catch", "char", "class",
    "const", "constexpr", "continue", "decltype", "default", "delete", "do", "double", "else",
    "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto", "if",
    "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "nullptr",
    "operator", "or", "private", "protected", "public", "register", "return", "short", "signed",
    "sizeof", "static", "struct", "switch", "template", "this", "throw", "true", "try", "typedef",
    "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while", "xor",
];

const HEADER: &str =
    "#include <any>\n#include <cstddef>\n#include <cstdint>\n#include <string>\n#include <vector>\n\n";

pub struct Cpp;

impl Emitter for Cpp {
    type Options = PlainOptions;
    const TARGET: Target = Target::Cpp;

    fn emit(&self, plan: &Plan<'_>, _options: &PlainOptions) -> Rendered {
        let blocks = plan.types().map(render_struct).collect::<Vec<_>>();
        Rendered::Single {
            content: stack(HEADER, &blocks, "\n\n"),
            language: Target::Cpp.language(),
        }
    }
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null => "std::nullptr_t".to_string(),
        Slot::String => "std::string".to_string(),
        Slot::Integer => "std::int64_t".to_string(),
        Slot::Number => "double".to_string(),
        Slot::Bool => "bool".to_string(),
        Slot::Any => "std::any".to_string(),
        Slot::List(item) => format!("std::vector<{}>", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

fn render_struct(ty: &NamedType<'_>) -> String {
    let mut code = format!("struct {} {{\n", ty.name);
    if ty.is_empty() {
        code.push_str("    // no fields observed\n");
    }
    for (key, slot) in ty.slots() {
        let field = suffix_if_reserved(to_snake_case(key), KEYWORDS);
        code.push_str(&format!("    {} {field};\n", type_expr(&slot)));
    }
    code.push('\n');
    code.push_str(&format!("    {}() = default;\n}};", ty.name));
    code
}
