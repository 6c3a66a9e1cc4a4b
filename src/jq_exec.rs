//! jq pre-selection of the document to infer from, via `jaq`.
use anyhow::{anyhow, bail, Result};
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

/// Run `filter_src` over `input` and collect every output.
pub fn run_filter(filter_src: &str, input: &Value) -> Result<Vec<Value>> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader.load(&arena, program).map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let outputs = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    for item in outputs {
        let val = item.map_err(|e| anyhow!("jq runtime error: {e:?}"))?;
        // Val renders as JSON text
        out.push(serde_json::from_str::<Value>(&val.to_string())?);
    }
    Ok(out)
}

/// Run `filter_src` and require exactly one resulting document.
pub fn select_single(filter_src: &str, input: &Value) -> Result<Value> {
    let mut outputs = run_filter(filter_src, input)?;
    match outputs.len() {
        1 => Ok(outputs.remove(0)),
        0 => bail!("jq expression `{filter_src}` produced no output"),
        n => bail!("jq expression `{filter_src}` produced {n} outputs, expected exactly one"),
    }
}

fn format_parse_errors(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> anyhow::Error {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    anyhow!(s)
}

fn format_undefined_errors(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> anyhow::Error {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    anyhow!(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selects_a_subdocument() {
        let doc = json!({ "data": { "user": { "id": 1 } } });
        assert_eq!(select_single(".data.user", &doc).unwrap(), json!({ "id": 1 }));
    }

    #[test]
    fn many_outputs_are_rejected() {
        let doc = json!({ "rows": [{ "a": 1 }, { "a": 2 }] });
        assert_eq!(run_filter(".rows[]", &doc).unwrap().len(), 2);
        let err = select_single(".rows[]", &doc).unwrap_err();
        assert!(err.to_string().contains("2 outputs"), "{err}");
        assert!(select_single("empty", &doc).is_err());
    }

    #[test]
    fn unknown_functions_are_reported() {
        let err = run_filter("no_such_filter_here", &json!({})).unwrap_err();
        assert!(err.to_string().contains("no_such_filter_here"), "{err}");
    }
}
