//! Per-target configuration decoded from the host's loosely-typed options bag.
//!
//! Keys are camelCase. Unknown keys are rejected so a typo never silently
//! falls back to a default. A `null` bag means "all defaults".
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::emit::Target;
use crate::error::{Error, Result};

/// Options for targets that always render a single blob
/// (TypeScript, JavaScript, Python, Rust, C, C++).
///
/// `multipleFiles` is accepted for host uniformity and has no effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PlainOptions {
    pub multiple_files: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct GoOptions {
    /// Accepted, no effect.
    pub multiple_files: bool,
    /// Package clause heading the file; `main` when unset.
    pub package_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct KotlinOptions {
    /// One `.kt` file per data class.
    pub multiple_files: bool,
    /// `@JsonProperty("wire_name")` on properties whose name was re-cased.
    pub use_json_property: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct JavaOptions {
    /// One `.java` file per class. Overrides `use_inner_class`.
    pub multiple_files: bool,
    /// `@JsonProperty("wire_name")` on fields whose name was re-cased.
    pub use_json_property: bool,
    /// `@Data`/`@NoArgsConstructor`/`@AllArgsConstructor` instead of hand-written boilerplate.
    pub use_lombok: bool,
    /// No-args and all-args constructors (ignored with Lombok).
    pub include_constructor: bool,
    /// `getX`/`setX` pairs (ignored with Lombok).
    pub include_getter_setter: bool,
    /// Nested types as `public static` inner classes of the root class,
    /// instead of package-private top-level classes before it.
    pub use_inner_class: bool,
}

impl Default for JavaOptions {
    fn default() -> Self {
        Self {
            multiple_files: false,
            use_json_property: false,
            use_lombok: false,
            include_constructor: false,
            include_getter_setter: true,
            use_inner_class: true,
        }
    }
}

/// Decode `bag` into the options structure of `target`.
pub fn decode<T: DeserializeOwned + Default>(target: Target, bag: &Value) -> Result<T> {
    if bag.is_null() {
        return Ok(T::default());
    }
    crate::path_de::from_value_with_path(bag).map_err(|message| Error::Options {
        target: target.to_string(),
        message,
    })
}
