//! Kotlin data classes with camelCase `val` properties.
use crate::assemble::{per_type_files, stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::to_camel_case;
use crate::options::KotlinOptions;

/// Hard keywords; soft keywords are valid property names.
const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Types the generated code names unqualified.
const RESERVED_TYPES: &[&str] = &["_", "Any", "String", "Int", "Double", "Boolean", "List", "JsonProperty"];

pub struct Kotlin;

impl Emitter for Kotlin {
    type Options = KotlinOptions;
    const TARGET: Target = Target::Kotlin;
    const SPLITS_FILES: bool = true;

    fn reserves_type_name(name: &str) -> bool {
        RESERVED_TYPES.contains(&name)
    }

    fn emit(&self, plan: &Plan<'_>, options: &KotlinOptions) -> Rendered {
        let header = if options.use_json_property {
            "import com.fasterxml.jackson.annotation.JsonProperty\n\n"
        } else {
            ""
        };
        let language = Target::Kotlin.language();
        if options.multiple_files {
            let declarations = plan
                .types()
                .map(|ty| (ty.name.clone(), render_class(ty, options)))
                .collect();
            return Rendered::Files(per_type_files(declarations, header, Target::Kotlin.extension(), language));
        }
        let blocks = plan.types().map(|ty| render_class(ty, options)).collect::<Vec<_>>();
        Rendered::Single { content: stack(header, &blocks, "\n\n"), language }
    }
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null => "Any?".to_string(),
        Slot::String => "String".to_string(),
        Slot::Integer => "Int".to_string(),
        Slot::Number => "Double".to_string(),
        Slot::Bool => "Boolean".to_string(),
        Slot::Any => "Any".to_string(),
        Slot::List(item) => format!("List<{}>", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

fn property_ident(key: &str) -> String {
    let name = to_camel_case(key);
    if name == "_" {
        // underscore-only names are reserved and cannot be backticked
        return "_0".to_string();
    }
    if KEYWORDS.contains(&name.as_str()) { format!("`{name}`") } else { name }
}

fn render_class(ty: &NamedType<'_>, options: &KotlinOptions) -> String {
    // a data class needs at least one constructor property
    if ty.is_empty() {
        return format!("class {} {{\n    // no fields observed\n}}", ty.name);
    }
    let properties = ty
        .slots()
        .map(|(key, slot)| {
            let ident = property_ident(key);
            let mut line = String::new();
            if options.use_json_property && ident.trim_matches('`') != key {
                line.push_str(&format!(
                    "    @JsonProperty(\"{}\")\n",
                    key.replace('\\', "\\\\").replace('"', "\\\"").replace('$', "\\$")
                ));
            }
            line.push_str(&format!("    val {ident}: {}", type_expr(&slot)));
            line
        })
        .collect::<Vec<_>>();
    format!("data class {}(\n{}\n)", ty.name, properties.join(",\n"))
}
