//! Infer a type schema from one JSON sample and render it as source code
//! declarations for one of several target languages.
//!
//! ```text
//! JSON text ──infer──▶ Ty ──plan──▶ named types ──emit──▶ Rendered
//! ```
pub mod assemble;
pub mod cli;
pub mod collect;
pub mod emit;
pub mod error;
pub mod inference;
pub mod ir;
pub mod jq_exec;
pub mod naming;
pub mod options;
pub mod path_de;

use serde_json::Value;

pub use assemble::{Rendered, SourceFile};
pub use emit::Target;
pub use error::{Error, NameError, Result};
pub use ir::Ty;

/// One request: parse `json_text`, infer its shape and render it for the
/// target identified by `target`, naming the root type after `root_name`.
///
/// The root name is re-cased but not validated here; hosts that accept names
/// from users run [`naming::validate_type_name`] first. All-or-nothing: on
/// error nothing is rendered.
pub fn generate(json_text: &str, target: &str, root_name: &str, options: &Value) -> Result<Rendered> {
    let root = inference::infer(json_text)?;
    let target = target.parse::<Target>()?;
    emit::emit(target, &root, root_name, options)
}
