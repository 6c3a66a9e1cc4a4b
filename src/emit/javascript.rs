//! JavaScript classes with JSDoc types. Constructors copy fields from a plain
//! `data` object and instantiate nested classes.
use crate::assemble::{stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::emit::typescript::GLOBAL_TYPES;
use crate::naming::is_js_identifier;
use crate::options::PlainOptions;

pub struct JavaScript;

impl Emitter for JavaScript {
    type Options = PlainOptions;
    const TARGET: Target = Target::JavaScript;

    fn reserves_type_name(name: &str) -> bool {
        GLOBAL_TYPES.contains(&name)
    }

    fn emit(&self, plan: &Plan<'_>, _options: &PlainOptions) -> Rendered {
        let mut blocks = plan.types().map(render_class).collect::<Vec<_>>();
        if plan.root_array_depth > 0 {
            let root = &plan.root.name;
            let mut list = root.clone();
            for _ in 0..plan.root_array_depth {
                list = format!("Array<{list}>");
            }
            blocks.push(format!("/**\n * @typedef {{{list}}} {root}Array\n */"));
        }
        Rendered::Single {
            content: stack("", &blocks, "\n\n"),
            language: Target::JavaScript.language(),
        }
    }
}

fn jsdoc_type(slot: &Slot) -> String {
    match slot {
        Slot::Null => "null".to_string(),
        Slot::String => "string".to_string(),
        Slot::Integer | Slot::Number => "number".to_string(),
        Slot::Bool => "boolean".to_string(),
        Slot::Any => "*".to_string(),
        Slot::List(item) => format!("Array<{}>", jsdoc_type(item)),
        Slot::Named(name) => name.clone(),
    }
}

fn access(object: &str, key: &str) -> String {
    if is_js_identifier(key) {
        format!("{object}.{key}")
    } else {
        format!("{object}[\"{}\"]", key.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// Right-hand side of the constructor assignment for one field.
fn initializer(key: &str, slot: &Slot) -> String {
    let source = access("data", key);
    match construct(&source, slot, 0) {
        Some(built) => format!("{source} == null ? {source} : {built}"),
        None => source,
    }
}

/// Expression instantiating the classes inside `expr`, mapping one list layer
/// per level. `None` when no class is reachable.
fn construct(expr: &str, slot: &Slot, depth: usize) -> Option<String> {
    match slot {
        Slot::Named(name) => Some(format!("new {name}({expr})")),
        Slot::List(item) => {
            let var = if depth == 0 { "item".to_string() } else { format!("item{depth}") };
            let inner = construct(&var, item, depth + 1)?;
            Some(format!("{expr}.map(({var}) => {inner})"))
        }
        _ => None,
    }
}

fn render_class(ty: &NamedType<'_>) -> String {
    let mut code = format!("class {} {{\n", ty.name);
    code.push_str("  /**\n   * @param {Object} data\n   */\n");
    code.push_str("  constructor(data) {\n");
    if ty.is_empty() {
        code.push_str("    // no fields\n");
    }
    for (key, slot) in ty.slots() {
        code.push_str(&format!("    /** @type {{{}}} */\n", jsdoc_type(&slot)));
        code.push_str(&format!("    {} = {};\n", access("this", key), initializer(key, &slot)));
    }
    code.push_str("  }\n}");
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
        emit(Target::JavaScript, &ty, root, &Value::Null).unwrap().as_text().unwrap().to_string()
    }

    #[test]
    fn person_round_trip() {
        let out = render(
            r#"{"name":"Ada","age":37,"active":true,"tags":["x","y"],"address":{"city":"London"}}"#,
            "Person",
        );
        let address = out.find("class Address {").expect("address class");
        let person = out.find("class Person {").expect("person class");
        assert!(address < person);
        assert!(out.contains("    /** @type {Array<string>} */\n    this.tags = data.tags;"));
        assert!(out.contains("    /** @type {boolean} */\n    this.active = data.active;"));
        assert!(out.contains(
            "    /** @type {Address} */\n    this.address = data.address == null ? data.address : new Address(data.address);"
        ));
        let fields = ["this.name", "this.age", "this.active", "this.tags", "this.address"];
        let positions = fields.iter().map(|f| out.rfind(f).unwrap()).collect::<Vec<_>>();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn arrays_of_objects_are_mapped() {
        let out = render(r#"{"items":[{"id":1}]}"#, "Root");
        assert!(out.contains("this.items = data.items == null ? data.items : data.items.map((item) => new ItemsItem(item));"));
    }

    #[test]
    fn nested_lists_are_mapped_per_layer() {
        let out = render(r#"{"grid":[[{"x":1}]],"raw":[[1]]}"#, "Board");
        assert!(out.contains(
            "    /** @type {Array<Array<GridItem>>} */\n    this.grid = data.grid == null ? data.grid : data.grid.map((item) => item.map((item1) => new GridItem(item1)));"
        ));
        assert!(out.contains("    this.raw = data.raw;"));
    }

    #[test]
    fn global_names_are_not_redeclared() {
        let out = render(r#"{"map":{"a":1},"error":"x"}"#, "Root");
        assert!(out.contains("class MapType {"));
        assert!(!out.contains("class Map {"));
        assert!(out.contains("this.map = data.map == null ? data.map : new MapType(data.map);"));
    }

    #[test]
    fn awkward_keys_use_brackets() {
        let out = render(r#"{"first name":"x"}"#, "Root");
        assert!(out.contains("    this[\"first name\"] = data[\"first name\"];"));
    }

    #[test]
    fn empty_class_is_valid() {
        let out = render("{}", "Root");
        assert_eq!(out, "class Root {\n  /**\n   * @param {Object} data\n   */\n  constructor(data) {\n    // no fields\n  }\n}\n");
    }

    #[test]
    fn array_root_gets_typedef() {
        let out = render(r#"[{"id":1}]"#, "User");
        assert!(out.ends_with("/**\n * @typedef {Array<User>} UserArray\n */\n"));
    }
}
