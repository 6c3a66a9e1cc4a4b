//! Target registry and the emitter contract.
//!
//! Every target is one variant of [`Target`] and one module under `emit/`.
//! Emitters share the traversal (a [`Plan`] of named types in dependency order)
//! but own their type tables, naming conventions, annotations and file policy.
pub mod c;
pub mod cpp;
pub mod go;
pub mod java;
pub mod javascript;
pub mod kotlin;
pub mod python;
pub mod rust;
pub mod typescript;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::assemble::Rendered;
use crate::collect::{self, Plan};
use crate::error::{Error, Result};
use crate::ir::Ty;

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    TypeScript,
    JavaScript,
    Python,
    Rust,
    Go,
    C,
    Cpp,
    Java,
    Kotlin,
}

impl Target {
    pub const ALL: [Target; 9] = [
        Target::TypeScript,
        Target::JavaScript,
        Target::Python,
        Target::Rust,
        Target::Go,
        Target::C,
        Target::Cpp,
        Target::Java,
        Target::Kotlin,
    ];

    /// Canonical identifier accepted from the host.
    pub fn id(self) -> &'static str {
        match self {
            Target::TypeScript => "typescript",
            Target::JavaScript => "javascript",
            Target::Python => "python",
            Target::Rust => "rust",
            Target::Go => "go",
            Target::C => "c",
            Target::Cpp => "cpp",
            Target::Java => "java",
            Target::Kotlin => "kotlin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Target::TypeScript => "TypeScript",
            Target::JavaScript => "JavaScript",
            Target::Python => "Python",
            Target::Rust => "Rust",
            Target::Go => "Go",
            Target::C => "C",
            Target::Cpp => "C++",
            Target::Java => "Java",
            Target::Kotlin => "Kotlin",
        }
    }

    /// Language tag for syntax highlighting of the rendered output.
    pub fn language(self) -> &'static str {
        self.id()
    }

    pub fn extension(self) -> &'static str {
        match self {
            Target::TypeScript => "ts",
            Target::JavaScript => "js",
            Target::Python => "py",
            Target::Rust => "rs",
            Target::Go => "go",
            Target::C => "h",
            Target::Cpp => "hpp",
            Target::Java => "java",
            Target::Kotlin => "kt",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let target = match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Target::TypeScript,
            "javascript" | "js" => Target::JavaScript,
            "python" | "py" => Target::Python,
            "rust" | "rs" => Target::Rust,
            "go" | "golang" => Target::Go,
            "c" => Target::C,
            "cpp" | "c++" => Target::Cpp,
            "java" => Target::Java,
            "kotlin" | "kt" => Target::Kotlin,
            _ => return Err(Error::UnsupportedTarget(s.to_string())),
        };
        Ok(target)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONTRACT
// ————————————————————————————————————————————————————————————————————————————

pub trait Emitter {
    /// The target's explicit configuration, decoded from the options bag.
    type Options: DeserializeOwned + Default;

    const TARGET: Target;

    /// Whether `multipleFiles` changes the output shape for this target.
    const SPLITS_FILES: bool = false;

    /// Whether a type declared as `name` would clash with a keyword or with a
    /// type the generated code already refers to.
    fn reserves_type_name(_name: &str) -> bool {
        false
    }

    /// Render the plan. Infallible: the plan is always produced internally.
    fn emit(&self, plan: &Plan<'_>, options: &Self::Options) -> Rendered;
}

/// Render `root` as `target` source, with the root type named after `root_name`.
pub fn emit(target: Target, root: &Ty, root_name: &str, options: &Value) -> Result<Rendered> {
    match target {
        Target::TypeScript => run(&typescript::TypeScript, root, root_name, options),
        Target::JavaScript => run(&javascript::JavaScript, root, root_name, options),
        Target::Python => run(&python::Python, root, root_name, options),
        Target::Rust => run(&rust::Rust, root, root_name, options),
        Target::Go => run(&go::Go, root, root_name, options),
        Target::C => run(&c::C, root, root_name, options),
        Target::Cpp => run(&cpp::Cpp, root, root_name, options),
        Target::Java => run(&java::Java, root, root_name, options),
        Target::Kotlin => run(&kotlin::Kotlin, root, root_name, options),
    }
}

fn run<E: Emitter>(emitter: &E, root: &Ty, root_name: &str, bag: &Value) -> Result<Rendered> {
    let options = crate::options::decode::<E::Options>(E::TARGET, bag)?;
    if !E::SPLITS_FILES && bag.get("multipleFiles").and_then(Value::as_bool) == Some(true) {
        tracing::debug!(lang = %E::TARGET, "multipleFiles has no effect for this target");
    }
    let plan = collect::plan(root, root_name, &E::reserves_type_name);
    tracing::debug!(lang = %E::TARGET, root = %plan.root.name, "emitting");
    let rendered = emitter.emit(&plan, &options);
    tracing::debug!(lang = %E::TARGET, files = rendered.files().len(), "rendered");
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip_through_from_str() {
        for target in Target::ALL {
            assert_eq!(target.id().parse::<Target>().unwrap(), target);
        }
        assert_eq!("C++".parse::<Target>().unwrap(), Target::Cpp);
        assert_eq!(" TS ".parse::<Target>().unwrap(), Target::TypeScript);
    }

    #[test]
    fn unknown_target_is_unsupported() {
        let err = "swift".parse::<Target>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedTarget(ref id) if id == "swift"));
        assert_eq!(err.to_string(), "generator for `swift` not implemented yet");
    }

    #[test]
    fn options_are_decoded_per_target() {
        let ty = crate::inference::infer(r#"{"a":1}"#).unwrap();
        let bag = serde_json::json!({ "useLombok": true });
        assert!(emit(Target::Java, &ty, "Root", &bag).is_ok());
        assert!(matches!(emit(Target::Rust, &ty, "Root", &bag), Err(Error::Options { .. })));
    }
}
