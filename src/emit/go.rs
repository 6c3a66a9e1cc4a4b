//! Go structs with exported PascalCase fields and `json:"..."` tags.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::to_pascal_case;
use crate::options::GoOptions;

pub struct Go;

/// Package clause used when the host names none; a Go file must declare one.
const DEFAULT_PACKAGE: &str = "main";

impl Emitter for Go {
    type Options = GoOptions;
    const TARGET: Target = Target::Go;

    fn reserves_type_name(name: &str) -> bool {
        // the blank identifier declares nothing
        name == "_"
    }

    fn emit(&self, plan: &Plan<'_>, options: &GoOptions) -> Rendered {
        let package = options.package_name.as_deref().unwrap_or(DEFAULT_PACKAGE);
        let header = format!("package {package}\n\n");
        let blocks = plan.types().map(render_struct).collect::<Vec<_>>();
        Rendered::Single {
            content: stack(&header, &blocks, "\n\n"),
            language: Target::Go.language(),
        }
    }
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null | Slot::Any => "interface{}".to_string(),
        Slot::String => "string".to_string(),
        Slot::Integer => "int64".to_string(),
        Slot::Number => "float64".to_string(),
        Slot::Bool => "bool".to_string(),
        Slot::List(item) => format!("[]{}", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

/// Exported field name; Go keywords are all lowercase, so PascalCase never collides.
fn field_ident(key: &str) -> String {
    let name = to_pascal_case(key);
    // a leading underscore would leave the field unexported
    match name.strip_prefix('_') {
        Some(rest) => format!("X{rest}"),
        None => name,
    }
}

fn render_struct(ty: &NamedType<'_>) -> String {
    let mut code = format!("type {} struct {{\n", ty.name);
    if ty.is_empty() {
        code.push_str("\t// no fields observed\n");
    }
    for (key, slot) in ty.slots() {
        let field = field_ident(key);
        let tag = if field != key {
            format!(" `json:\"{}\"`", key.replace('\\', "\\\\").replace('"', "\\\""))
        } else {
            String::new()
        };
        code.push_str(&format!("\t{field} {}{tag}\n", type_expr(&slot)));
    }
    code.push('}');
    code
}
