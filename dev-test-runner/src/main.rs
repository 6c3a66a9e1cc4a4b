//! Renders every fixture for every target and writes the results under `out/`
//! for eyeballing or feeding to real compilers.
//!
//! Cases come from `manifest.json`; fixtures not named there run with default
//! options against all targets.
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use json_typegen::{generate, Rendered, Target};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    cases: Vec<Case>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Case {
    name: String,
    input: PathBuf,
    #[serde(default = "default_root_type")]
    root_type: String,
    /// All targets when omitted.
    #[serde(default)]
    targets: Option<Vec<String>>,
    #[serde(default)]
    options: Value,
}

fn default_root_type() -> String {
    "Root".to_string()
}

fn main() -> ExitCode {
    match run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{failures} case(s) failed");
            ExitCode::FAILURE
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<usize> {
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let manifest_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| root.join("manifest.json"));
    let base = manifest_path.parent().unwrap_or(root).to_path_buf();
    let out_root = base.join("out");

    let manifest_src = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&manifest_src);
    let mut manifest: Manifest = serde_path_to_error::deserialize(de)
        .map_err(|e| anyhow::anyhow!("at JSON path {} → {}", e.path(), e.inner()))?;

    let listed = manifest.cases.iter().map(|c| base.join(&c.input)).collect::<BTreeSet<_>>();
    let pattern = base.join("fixtures").join("*.json");
    for entry in glob::glob(&pattern.to_string_lossy())? {
        let path = entry?;
        if listed.contains(&path) {
            continue;
        }
        let name = path.file_stem().map(|s| s.to_string_lossy().to_string()).unwrap_or_default();
        let input = path.strip_prefix(&base).map(Path::to_path_buf).unwrap_or(path);
        manifest.cases.push(Case { name, input, root_type: default_root_type(), targets: None, options: Value::Null });
    }

    let mut failures = 0;
    for case in &manifest.cases {
        let input = base.join(&case.input);
        let json = std::fs::read_to_string(&input).with_context(|| format!("failed to read {}", input.display()))?;
        let targets = match &case.targets {
            Some(ids) => ids.clone(),
            None => Target::ALL.iter().map(|t| t.id().to_string()).collect(),
        };
        for target in &targets {
            match generate(&json, target, &case.root_type, &case.options) {
                Ok(rendered) => {
                    let dir = out_root.join(&case.name).join(target);
                    let written = write(&dir, &case.root_type, target, &rendered)?;
                    println!("ok    {:<24} {:<11} {written} file(s)", case.name, target);
                }
                Err(error) => {
                    failures += 1;
                    println!("FAIL  {:<24} {:<11} {error}", case.name, target);
                }
            }
        }
    }
    Ok(failures)
}

fn write(dir: &Path, root_type: &str, target: &str, rendered: &Rendered) -> Result<usize> {
    std::fs::create_dir_all(dir)?;
    match rendered {
        Rendered::Single { content, .. } => {
            let extension = target.parse::<Target>()?.extension();
            std::fs::write(dir.join(format!("{root_type}.{extension}")), content)?;
            Ok(1)
        }
        Rendered::Files(files) => {
            for file in files {
                std::fs::write(dir.join(&file.filename), &file.content)?;
            }
            Ok(files.len())
        }
    }
}
