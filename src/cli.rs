//! CLI host: JSON file(s) → generated declarations for one target.
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde_json::{Map, Value};

use crate::assemble::Rendered;
use crate::emit::Target;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer a type schema from a JSON sample and generate matching declarations
#[derive(Parser, Debug)]
#[command(name = "json-typegen", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and emit declarations for one target language
    Generate(GenerateOut),
    /// infer and print the JSON-schema-ish view of the descriptor
    Schema(SchemaOut),
    /// list the supported targets
    Targets,
    /// check a root type name against the naming rules
    CheckName(CheckName),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// jq filter applied to each document; must yield exactly one value
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths, quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct GenerateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// target language (typescript, javascript, python, rust, go, c, cpp, java, kotlin)
    #[arg(long, short)]
    target: String,

    /// top-level type name
    #[arg(long, default_value = "Root")]
    root_type: String,

    /// target option as key=value; the value is parsed as JSON, falling back to a string
    #[arg(long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// JSON object of target options; --option pairs override it
    #[arg(long)]
    options_file: Option<PathBuf>,

    /// shortcut for --option multipleFiles=true
    #[arg(long)]
    multiple_files: bool,

    /// output file (stdout if omitted); single-file output only
    #[arg(short, long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// output directory
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(clap::Parser, Debug)]
struct CheckName {
    name: String,
}

/// One input document after pointer/jq selection.
#[derive(Debug)]
struct Document {
    label: String,
    stem: String,
    value: Value,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for source in resolve_file_path_patterns(&self.input)? {
            let (label, stem, text) = match &source {
                None => {
                    let mut text = String::new();
                    std::io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
                    ("<stdin>".to_string(), "stdin".to_string(), text)
                }
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    let stem = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_else(|| "output".to_string());
                    (path.display().to_string(), stem, text)
                }
            };
            let value = serde_json::from_str::<Value>(&text)
                .map_err(crate::error::Error::from)
                .with_context(|| format!("failed to parse {label}"))?;
            let value = self.select(value).with_context(|| format!("failed to select from {label}"))?;
            tracing::info!(input = %label, "loaded document");
            documents.push(Document { label, stem, value });
        }
        Ok(documents)
    }

    fn select(&self, value: Value) -> Result<Value> {
        let value = match self.json_pointer.as_deref() {
            None => value,
            Some(pointer) => match value.pointer(pointer) {
                Some(node) => node.clone(),
                None => bail!("JSON pointer `{pointer}` does not resolve"),
            },
        };
        match self.jq_expr.as_deref() {
            None => Ok(value),
            Some(jq_expr) => crate::jq_exec::select_single(jq_expr, &value),
        }
    }
}

impl GenerateOut {
    fn options_bag(&self) -> Result<Value> {
        let mut bag = match self.options_file.as_ref() {
            None => Map::new(),
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                crate::path_de::from_str_with_path::<Map<String, Value>>(&text)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("invalid options file {}", path.display()))?
            }
        };
        for pair in &self.options {
            let (key, value) = parse_option_pair(pair)?;
            bag.insert(key, value);
        }
        if self.multiple_files {
            bag.insert("multipleFiles".to_string(), Value::Bool(true));
        }
        Ok(Value::Object(bag))
    }

    fn run(&self) -> Result<()> {
        let root_name = crate::naming::validate_type_name(&self.root_type)?;
        let target = self.target.parse::<Target>()?;
        let options = self.options_bag()?;
        let documents = self.input_settings.load_documents()?;
        if documents.len() > 1 && self.out.is_some() {
            bail!("{} inputs resolved; use --out-dir instead of --out", documents.len());
        }

        for document in &documents {
            let root = crate::inference::infer_value(&document.value)?;
            let rendered = crate::emit::emit(target, &root, root_name, &options)?;
            tracing::info!(input = %document.label, lang = %target, "generated");

            match (&rendered, self.out.as_ref(), self.out_dir.as_ref()) {
                (Rendered::Single { content, .. }, Some(out), _) => write_file(out, content)?,
                (Rendered::Files(_), Some(_), _) => {
                    bail!("multi-file output needs --out-dir")
                }
                (_, None, Some(dir)) => {
                    let dir = if documents.len() > 1 && matches!(rendered, Rendered::Files(_)) {
                        dir.join(&document.stem)
                    } else {
                        dir.clone()
                    };
                    write_rendered(&dir, &document.stem, target, &rendered)?
                }
                (Rendered::Single { content, .. }, None, None) => print!("{content}"),
                (Rendered::Files(files), None, None) => {
                    for file in files {
                        println!("{}", format!("// ==> {}", file.filename).dimmed());
                        print!("{}", file.content);
                    }
                }
            }
        }
        Ok(())
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Generate(generate) => generate.run(),
            Command::Schema(schema) => {
                let documents = schema.input_settings.load_documents()?;
                let mut views = Vec::with_capacity(documents.len());
                for document in &documents {
                    views.push(crate::inference::infer_value(&document.value)?.to_schema());
                }
                let view = match views.len() {
                    1 => views.remove(0),
                    _ => Value::Array(views),
                };
                let schema_src = serde_json::to_string_pretty(&view)?;
                match schema.out.as_ref() {
                    Some(out) => write_file(out, &schema_src),
                    None => {
                        println!("{schema_src}");
                        Ok(())
                    }
                }
            }
            Command::Targets => {
                for target in Target::ALL {
                    println!("{:<12} {:<12} .{}", target.id().bold(), target.label(), target.extension());
                }
                Ok(())
            }
            Command::CheckName(check) => {
                let name = crate::naming::validate_type_name(&check.name)?;
                println!("{} `{name}` is a valid type name", "OK".green().bold());
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// `key=value`, with `value` parsed as JSON when possible (`true`, `3`, `"x"`).
fn parse_option_pair(pair: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = pair.split_once('=') else {
        bail!("option `{pair}` is not of the form key=value");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("option `{pair}` has an empty key");
    }
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

fn write_file(out: &Path, content: &str) -> Result<()> {
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out, content).with_context(|| format!("failed to write {}", out.display()))?;
    eprintln!("{} {}", "wrote".green(), out.display());
    Ok(())
}

fn write_rendered(dir: &Path, stem: &str, target: Target, rendered: &Rendered) -> Result<()> {
    match rendered {
        Rendered::Single { content, .. } => {
            write_file(&dir.join(format!("{stem}.{}", target.extension())), content)
        }
        Rendered::Files(files) => {
            for file in files {
                write_file(&dir.join(&file.filename), &file.content)?;
            }
            Ok(())
        }
    }
}

/// Expand inputs; `None` stands for stdin (`-`).
fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<Option<PathBuf>>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern == "-" {
            out.push(None);
        } else if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(Some(entry?));
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(Some(PathBuf::from(pattern)));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("json-typegen-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn generate_args(cli: CommandLineInterface) -> GenerateOut {
        match cli.cmd {
            Command::Generate(generate) => generate,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn option_pairs_parse_json_or_fall_back_to_string() {
        assert_eq!(parse_option_pair("useLombok=true").unwrap(), ("useLombok".into(), json!(true)));
        assert_eq!(parse_option_pair("packageName=models").unwrap(), ("packageName".into(), json!("models")));
        assert_eq!(parse_option_pair("x=\"1\"").unwrap(), ("x".into(), json!("1")));
        assert!(parse_option_pair("nokey").is_err());
        assert!(parse_option_pair("=1").is_err());
    }

    #[test]
    fn options_bag_merges_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "json-typegen", "generate", "-i", "a.json", "-t", "java",
            "--option", "useLombok=true", "--option", "useInnerClass=false", "--multiple-files",
        ])
        .unwrap();
        let bag = generate_args(cli).options_bag().unwrap();
        assert_eq!(bag, json!({ "useLombok": true, "useInnerClass": false, "multipleFiles": true }));
    }

    #[test]
    fn out_and_out_dir_conflict() {
        let parsed = CommandLineInterface::try_parse_from([
            "json-typegen", "generate", "-i", "a.json", "-t", "go", "--out", "a.go", "--out-dir", "x",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn literal_paths_and_stdin_pass_through() {
        let resolved = resolve_file_path_patterns(["a.json", "-"]).unwrap();
        assert_eq!(resolved, vec![Some(PathBuf::from("a.json")), None]);
        assert!(resolve_file_path_patterns(["/definitely/missing/*.json"]).is_err());
    }

    #[test]
    fn pointer_and_jq_select_the_document() {
        let settings = InputSettings {
            json_pointer: Some("/data".into()),
            jq_expr: Some(".user".into()),
            input: vec![],
        };
        let selected = settings.select(json!({ "data": { "user": { "id": 1 } } })).unwrap();
        assert_eq!(selected, json!({ "id": 1 }));

        let missing = InputSettings { json_pointer: Some("/nope".into()), jq_expr: None, input: vec![] };
        assert!(missing.select(json!({})).is_err());
    }

    #[test]
    fn generate_writes_one_file_per_class() {
        let dir = scratch_dir("java");
        let input = dir.join("person.json");
        std::fs::write(&input, r#"{"name":"Ada","address":{"city":"London"}}"#).unwrap();
        let out_dir = dir.join("out");
        let cli = CommandLineInterface::try_parse_from([
            "json-typegen", "generate", "-t", "java", "--root-type", "Person", "--multiple-files",
            "-i", input.to_str().unwrap(), "--out-dir", out_dir.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();
        assert!(out_dir.join("Address.java").is_file());
        let person = std::fs::read_to_string(out_dir.join("Person.java")).unwrap();
        assert!(person.contains("public class Person {"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn generate_rejects_reserved_root_names() {
        let cli = CommandLineInterface::try_parse_from([
            "json-typegen", "generate", "-t", "rust", "--root-type", "class", "-i", "unused.json",
        ])
        .unwrap();
        let err = cli.run().unwrap_err();
        assert!(err.to_string().contains("reserved word"), "{err}");
    }
}
