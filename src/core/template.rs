//! Jinja-style template rendering against a YAML variables file.

use std::path::Path;

use minijinja::Environment;
use serde::Serialize;
use serde_yml::Value;

use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::io::read_file;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Drop the first newline after a block tag (`{% ... %}`).
    pub trim_blocks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            trim_blocks: Defaults::default().template.trim_blocks,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedTemplate {
    pub variables: Value,
    pub output: String,
}

/// Parse YAML text into a variables mapping. An empty document is an empty mapping.
pub fn parse_variables(source: &str, origin: &str) -> Result<Value> {
    let mut value: Value =
        serde_yml::from_str(source).map_err(|e| Error::config_invalid_yaml(origin, e))?;
    value
        .apply_merge()
        .map_err(|e| Error::config_invalid_yaml(origin, e))?;

    match value {
        Value::Null => Ok(Value::Mapping(serde_yml::Mapping::new())),
        Value::Mapping(_) => Ok(value),
        other => Err(Error::config_invalid_value(
            "variables",
            Some(origin.to_string()),
            format!(
                "Top level of the variables file must be a mapping, found {}",
                kind_of(&other)
            ),
        )),
    }
}

pub fn load_variables(path: &Path) -> Result<Value> {
    let source = read_file(path, "read variables file")?;
    parse_variables(&source, &path.display().to_string())
}

/// Render `source` with `variables` as the template context.
///
/// Undefined names render as empty strings.
pub fn render_template(source: &str, variables: &Value, options: &RenderOptions) -> Result<String> {
    let mut env = Environment::new();
    env.set_trim_blocks(options.trim_blocks);

    env.render_str(source, variables)
        .map_err(|e| Error::template_render_failed(&e))
}

pub fn render_files(
    template_path: &Path,
    vars_path: &Path,
    options: &RenderOptions,
) -> Result<RenderedTemplate> {
    let variables = load_variables(vars_path)?;
    let source = read_file(template_path, "read template file")?;
    let output = render_template(&source, &variables, options)?;

    Ok(RenderedTemplate { variables, output })
}

/// Single-document YAML dump of the variables, without the leading `---`.
pub fn dump_variables(variables: &Value) -> Result<String> {
    let dumped = serde_yml::to_string(variables)
        .map_err(|e| Error::internal_unexpected(format!("dump variables: {}", e)))?;
    Ok(dumped
        .strip_prefix("---\n")
        .unwrap_or(&dumped)
        .to_string())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
