use super::types::{
    ControllerSpec, HandlerMeta, HandlerOrigin, ParameterKind, ParameterLocation, ParameterMeta,
};
use crate::action::names_eq;
use anyhow::{bail, Context};
use http::Method;
use serde::Deserialize;
use std::path::Path;

const METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS", "HEAD", "TRACE", "CONNECT",
];

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    controllers: Vec<ControllerEntry>,
}

#[derive(Debug, Deserialize)]
struct ControllerEntry {
    name: String,
    #[serde(default)]
    handlers: Vec<HandlerEntry>,
}

#[derive(Debug, Deserialize)]
struct HandlerEntry {
    name: String,
    #[serde(default)]
    methods: Vec<String>,
    #[serde(default)]
    parameters: Vec<ParameterEntry>,
    #[serde(default)]
    extra_uri_parameters: Vec<String>,
    #[serde(default)]
    origin: HandlerOrigin,
}

#[derive(Debug, Deserialize)]
struct ParameterEntry {
    name: String,
    #[serde(rename = "type", default = "default_type_name")]
    type_name: String,
    #[serde(default = "default_required")]
    required: bool,
    #[serde(default)]
    kind: ParameterKind,
    #[serde(rename = "in", default = "default_location")]
    location: ParameterLocation,
    #[serde(default)]
    prefix: Option<String>,
}

fn default_type_name() -> String {
    "string".to_string()
}

fn default_required() -> bool {
    true
}

fn default_location() -> ParameterLocation {
    ParameterLocation::Query
}

fn parse_method(controller: &str, handler: &str, raw: &str) -> anyhow::Result<Method> {
    let upper = raw.trim().to_ascii_uppercase();
    if !METHODS.contains(&upper.as_str()) {
        bail!("unknown HTTP method '{raw}' on {controller}::{handler}");
    }
    Method::from_bytes(upper.as_bytes())
        .with_context(|| format!("invalid HTTP method '{raw}' on {controller}::{handler}"))
}

impl ControllerEntry {
    fn into_spec(self) -> anyhow::Result<ControllerSpec> {
        let mut handlers = Vec::with_capacity(self.handlers.len());
        for entry in self.handlers {
            let mut handler = HandlerMeta::new(entry.name).origin(entry.origin);
            for raw in &entry.methods {
                let method = parse_method(&self.name, &handler.name, raw)?;
                handler = handler.method(method);
            }
            for p in entry.parameters {
                handler = handler.param(ParameterMeta {
                    name: p.name,
                    type_name: p.type_name,
                    required: p.required,
                    kind: p.kind,
                    location: p.location,
                    prefix: p.prefix,
                });
            }
            handler.extra_uri_parameters = entry.extra_uri_parameters;
            handlers.push(handler);
        }
        Ok(ControllerSpec::new(self.name).with_handlers(handlers))
    }
}

/// Parse controller specs from manifest text.
///
/// `format` is the file extension: `yaml`/`yml`, `toml`, anything else is JSON.
pub fn parse_manifest(content: &str, format: &str) -> anyhow::Result<Vec<ControllerSpec>> {
    let manifest: Manifest = match format {
        "yaml" | "yml" => serde_yaml::from_str(content).context("invalid YAML manifest")?,
        "toml" => toml::from_str(content).context("invalid TOML manifest")?,
        _ => serde_json::from_str(content).context("invalid JSON manifest")?,
    };

    let mut seen: Vec<String> = Vec::with_capacity(manifest.controllers.len());
    let mut specs = Vec::with_capacity(manifest.controllers.len());
    for entry in manifest.controllers {
        if entry.name.trim().is_empty() {
            bail!("controller entry with empty name");
        }
        if seen.iter().any(|n| names_eq(n, &entry.name)) {
            bail!("duplicate controller '{}'", entry.name);
        }
        seen.push(entry.name.clone());
        specs.push(entry.into_spec()?);
    }
    Ok(specs)
}

/// Load controller specs from a YAML, JSON, or TOML manifest file.
pub fn load_manifest(path: impl AsRef<Path>) -> anyhow::Result<Vec<ControllerSpec>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    parse_manifest(&content, &format)
        .with_context(|| format!("failed to load manifest {}", path.display()))
}
