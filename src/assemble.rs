//! Output assembly: per-type fragments → one blob, or one file per type.

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub filename: String,
    pub content: String,
    pub language: &'static str,
}

/// What an emitter hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Single { content: String, language: &'static str },
    Files(Vec<SourceFile>),
}

impl Rendered {
    pub fn language(&self) -> Option<&'static str> {
        match self {
            Rendered::Single { language, .. } => Some(*language),
            Rendered::Files(files) => files.first().map(|f| f.language),
        }
    }

    /// The single blob, if this is single-file output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Single { content, .. } => Some(content.as_str()),
            Rendered::Files(_) => None,
        }
    }

    pub fn files(&self) -> &[SourceFile] {
        match self {
            Rendered::Single { .. } => &[],
            Rendered::Files(files) => files,
        }
    }
}

/// `header`, then the blocks separated by `separator`, newline-terminated.
///
/// Callers pass nested declarations before the root so dependencies are declared first.
pub fn stack(header: &str, blocks: &[String], separator: &str) -> String {
    let mut out = String::from(header);
    out.push_str(&blocks.join(separator));
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Re-open a rendered `outer` declaration's closing brace and place `inner`
/// declarations inside its body, after the existing members.
pub fn nest_inside(outer: &str, inner: &[String]) -> String {
    let trimmed = outer.trim_end();
    if inner.is_empty() {
        return trimmed.to_string();
    }
    let Some(body) = trimmed.strip_suffix('}') else {
        return trimmed.to_string();
    };
    let mut out = body.trim_end().to_string();
    out.push_str("\n\n");
    out.push_str(&inner.join("\n\n"));
    out.push_str("\n}");
    out
}

/// One file per `(type name, declaration)` pair, each prefixed with `header`.
/// Order is preserved, so the root (passed last) lands last.
pub fn per_type_files(
    declarations: Vec<(String, String)>,
    header: &str,
    extension: &str,
    language: &'static str,
) -> Vec<SourceFile> {
    declarations
        .into_iter()
        .map(|(name, decl)| SourceFile {
            filename: format!("{name}.{extension}"),
            content: stack(header, &[decl], ""),
            language,
        })
        .collect()
}
