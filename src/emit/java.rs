//! Java POJOs.
//!
//! Three layouts: nested types as `public static` inner classes of the root
//! (default), as package-private classes ahead of the root in one file, or one
//! `public` class per file. Boilerplate is either hand-written (constructors,
//! accessors) or delegated to Lombok.
use crate::assemble::{nest_inside, per_type_files, stack, Rendered};
use crate::collect::{NamedType, Plan, Slot};
use crate::emit::{Emitter, Target};
use crate::naming::{suffix_if_reserved, to_camel_case};
use crate::options::JavaOptions;

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while", "var", "record", "yield", "_",
];

/// Types the generated code names unqualified.
const RESERVED_TYPES: &[&str] = &[
    "_", "List", "String", "Object", "Integer", "Double", "Boolean", "JsonProperty", "Data",
    "NoArgsConstructor", "AllArgsConstructor",
];

const INDENT: &str = "    ";

pub struct Java;

impl Emitter for Java {
    type Options = JavaOptions;
    const TARGET: Target = Target::Java;
    const SPLITS_FILES: bool = true;

    fn reserves_type_name(name: &str) -> bool {
        RESERVED_TYPES.contains(&name)
    }

    fn emit(&self, plan: &Plan<'_>, options: &JavaOptions) -> Rendered {
        let header = imports(options);
        let language = Target::Java.language();

        if options.multiple_files {
            let declarations = plan
                .types()
                .map(|ty| (ty.name.clone(), render_class(ty, options, "public ")))
                .collect();
            return Rendered::Files(per_type_files(declarations, &header, Target::Java.extension(), language));
        }

        let root = render_class(&plan.root, options, "public ");
        let content = if options.use_inner_class {
            let inner = plan
                .nested
                .iter()
                .map(|ty| indent(&render_class(ty, options, "public static ")))
                .collect::<Vec<_>>();
            stack(&header, &[nest_inside(&root, &inner)], "")
        } else {
            // only one public top-level class per file
            let mut blocks = plan
                .nested
                .iter()
                .map(|ty| render_class(ty, options, ""))
                .collect::<Vec<_>>();
            blocks.push(root);
            stack(&header, &blocks, "\n\n")
        };
        Rendered::Single { content, language }
    }
}

fn imports(options: &JavaOptions) -> String {
    let mut out = String::from("import java.util.List;\n");
    if options.use_json_property {
        out.push_str("import com.fasterxml.jackson.annotation.JsonProperty;\n");
    }
    if options.use_lombok {
        out.push_str("import lombok.Data;\nimport lombok.NoArgsConstructor;\nimport lombok.AllArgsConstructor;\n");
    }
    out.push('\n');
    out
}

fn type_expr(slot: &Slot) -> String {
    match slot {
        Slot::Null | Slot::Any => "Object".to_string(),
        Slot::String => "String".to_string(),
        Slot::Integer => "Integer".to_string(),
        Slot::Number => "Double".to_string(),
        Slot::Bool => "Boolean".to_string(),
        Slot::List(item) => format!("List<{}>", type_expr(item)),
        Slot::Named(name) => name.clone(),
    }
}

struct Field {
    key: String,
    ident: String,
    ty: String,
}

impl Field {
    /// `userId` → `UserId`, used after `get`/`set`.
    fn accessor_suffix(&self) -> String {
        let mut chars = self.ident.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

fn fields(ty: &NamedType<'_>) -> Vec<Field> {
    ty.slots()
        .map(|(key, slot)| Field {
            key: key.to_string(),
            ident: suffix_if_reserved(to_camel_case(key), KEYWORDS),
            ty: type_expr(&slot),
        })
        .collect()
}

/// Render one class at column zero with the given modifier prefix.
fn render_class(ty: &NamedType<'_>, options: &JavaOptions, modifier: &str) -> String {
    let fields = fields(ty);
    let name = &ty.name;
    let mut code = String::new();

    if options.use_lombok {
        code.push_str("@Data\n@NoArgsConstructor\n");
        // an all-args constructor with zero args would clash with the no-args one
        if !fields.is_empty() {
            code.push_str("@AllArgsConstructor\n");
        }
    }
    code.push_str(&format!("{modifier}class {name} {{\n"));

    let mut members = Vec::new();

    let mut declarations = String::new();
    if fields.is_empty() {
        declarations.push_str("    // Empty class\n");
    }
    for field in &fields {
        if options.use_json_property && field.ident != field.key {
            declarations.push_str(&format!("    @JsonProperty(\"{}\")\n", escape(&field.key)));
        }
        declarations.push_str(&format!("    private {} {};\n", field.ty, field.ident));
    }
    members.push(declarations);

    if !options.use_lombok && options.include_constructor && !fields.is_empty() {
        members.push(format!("    public {name}() {{\n    }}\n"));
        let params = fields
            .iter()
            .map(|f| format!("{} {}", f.ty, f.ident))
            .collect::<Vec<_>>()
            .join(", ");
        let mut all_args = format!("    public {name}({params}) {{\n");
        for field in &fields {
            all_args.push_str(&format!("        this.{0} = {0};\n", field.ident));
        }
        all_args.push_str("    }\n");
        members.push(all_args);
    }

    if !options.use_lombok && options.include_getter_setter {
        for field in &fields {
            let suffix = field.accessor_suffix();
            members.push(format!(
                "    public {ty} get{suffix}() {{\n        return {ident};\n    }}\n",
                ty = field.ty,
                ident = field.ident,
            ));
            members.push(format!(
                "    public void set{suffix}({ty} {ident}) {{\n        this.{ident} = {ident};\n    }}\n",
                ty = field.ty,
                ident = field.ident,
            ));
        }
    }

    code.push_str(&members.join("\n"));
    code.push('}');
    code
}

fn escape(key: &str) -> String {
    key.replace('\\', "\\\\").replace('"', "\\\"")
}

fn indent(block: &str) -> String {
    block
        .lines()
        .map(|line| if line.is_empty() { String::new() } else { format!("{INDENT}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit;
    use crate::inference::infer;
    use serde_json::{json, Value};

    const PERSON: &str =
        r#"{"name":"Ada","age":37,"active":true,"tags":["x","y"],"address":{"city":"London"}}"#;

    fn render(src: &str, root: &str, options: Value) -> Rendered {
        let ty = infer(src).unwrap();
        emit(Target::Java, &ty, root, &options).unwrap()
    }

    fn text(src: &str, root: &str, options: Value) -> String {
        render(src, root, options).as_text().unwrap().to_string()
    }

    #[test]
    fn default_layout_nests_static_classes() {
        let out = text(r#"{"user_name":"a","address":{"city":"x"}}"#, "Person", Value::Null);
        assert_eq!(
            out,
            "import java.util.List;\n\n\
             public class Person {\n\
             \x20   private String userName;\n\
             \x20   private Address address;\n\n\
             \x20   public String getUserName() {\n        return userName;\n    }\n\n\
             \x20   public void setUserName(String userName) {\n        this.userName = userName;\n    }\n\n\
             \x20   public Address getAddress() {\n        return address;\n    }\n\n\
             \x20   public void setAddress(Address address) {\n        this.address = address;\n    }\n\n\
             \x20   public static class Address {\n\
             \x20       private String city;\n\n\
             \x20       public String getCity() {\n            return city;\n        }\n\n\
             \x20       public void setCity(String city) {\n            this.city = city;\n        }\n\
             \x20   }\n\
             }\n"
        );
    }

    #[test]
    fn person_types() {
        let out = text(PERSON, "Person", json!({ "includeGetterSetter": false }));
        assert!(out.contains(
            "    private String name;\n    private Integer age;\n    private Boolean active;\n    private List<String> tags;\n    private Address address;\n"
        ));
        assert!(out.contains("    public static class Address {\n        private String city;\n    }\n}"));
    }

    #[test]
    fn separate_classes_precede_the_root() {
        let out = text(
            r#"{"items":[{"id":1}],"meta":{}}"#,
            "Order",
            json!({ "useInnerClass": false, "includeGetterSetter": false }),
        );
        assert_eq!(
            out,
            "import java.util.List;\n\n\
             class ItemsItem {\n    private Integer id;\n}\n\n\
             class Meta {\n    // Empty class\n}\n\n\
             public class Order {\n    private List<ItemsItem> items;\n    private Meta meta;\n}\n"
        );
    }

    #[test]
    fn lombok_replaces_boilerplate() {
        let out = text(
            r#"{"a":1,"empty":{}}"#,
            "Root",
            json!({ "useLombok": true, "includeConstructor": true, "useInnerClass": false }),
        );
        assert!(out.starts_with(
            "import java.util.List;\nimport lombok.Data;\nimport lombok.NoArgsConstructor;\nimport lombok.AllArgsConstructor;\n\n"
        ));
        assert!(out.contains("@Data\n@NoArgsConstructor\nclass Empty {"));
        assert!(out.contains("@Data\n@NoArgsConstructor\n@AllArgsConstructor\npublic class Root {"));
        assert!(!out.contains("getA"));
        assert!(!out.contains("public Root("));
    }

    #[test]
    fn constructors_and_json_property() {
        let out = text(
            r#"{"user_id":7,"name":"x","class":"c"}"#,
            "Row",
            json!({ "includeConstructor": true, "includeGetterSetter": false, "useJsonProperty": true }),
        );
        assert!(out.contains("import com.fasterxml.jackson.annotation.JsonProperty;\n"));
        assert!(out.contains("    @JsonProperty(\"user_id\")\n    private Integer userId;\n"));
        assert!(out.contains("    private String name;\n"));
        assert!(!out.contains("@JsonProperty(\"name\")"));
        assert!(out.contains("    @JsonProperty(\"class\")\n    private String class_;\n"));
        assert!(out.contains("    public Row() {\n    }\n"));
        assert!(out.contains(
            "    public Row(Integer userId, String name, String class_) {\n        this.userId = userId;\n        this.name = name;\n        this.class_ = class_;\n    }\n}"
        ));
    }

    #[test]
    fn multiple_files_one_public_class_each() {
        let rendered = render(PERSON, "person", json!({ "multipleFiles": true, "useInnerClass": true }));
        let files = rendered.files();
        let names = files.iter().map(|f| f.filename.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Address.java", "Person.java"]);
        assert!(files.iter().all(|f| f.language == "java"));
        assert!(files[0].content.starts_with("import java.util.List;\n\npublic class Address {\n"));
        assert!(files[1].content.contains("public class Person {"));
        assert!(!files[1].content.contains("static class"));
    }

    #[test]
    fn empty_root_is_valid() {
        let out = text("{}", "Root", Value::Null);
        assert_eq!(out, "import java.util.List;\n\npublic class Root {\n    // Empty class\n}\n");
    }

    #[test]
    fn type_names_avoid_imported_and_boxed_types() {
        let out = text(r#"{"list":{"a":1},"tags":["x"],"_":true}"#, "Root", Value::Null);
        assert!(out.contains("    public static class ListType {\n"));
        assert!(out.contains("    private ListType list;\n"));
        assert!(out.contains("    private List<String> tags;\n"));
        assert!(out.contains("    private Boolean __;\n"));
        assert!(!out.contains("class List "));

        let files = render(r#"{"string":{"a":1}}"#, "Data", json!({ "multipleFiles": true }));
        let names = files.files().iter().map(|f| f.filename.clone()).collect::<Vec<_>>();
        assert_eq!(names, vec!["StringType.java", "DataType.java"]);
    }
}
