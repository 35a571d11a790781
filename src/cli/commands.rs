use crate::action::{names_eq, ActionRequest};
use crate::controller::{load_manifest, ControllerMetadata, ControllerSpec};
use crate::runtime_config::RuntimeConfig;
use crate::selector::ActionSelector;
use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use http::Method;
use std::io::Write;
use std::path::PathBuf;

/// Command-line interface for brrtrouter-actions
///
/// Inspects controller manifests and tries action selection against them.
#[derive(Parser)]
#[command(name = "brrtrouter-actions")]
#[command(about = "BRRTRouter action selection CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print every controller's action name → handler mapping
    Inspect {
        /// Controller manifest (YAML, JSON, or TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Only show this controller
        #[arg(short, long)]
        controller: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Resolve one request against a controller and print the outcome
    Select {
        /// Controller manifest (YAML, JSON, or TOML)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Controller name, as the routing table would supply it
        #[arg(short, long)]
        controller: String,

        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Action name route value
        #[arg(short, long)]
        action: Option<String>,

        /// Extra route values as key=value (repeatable)
        #[arg(short, long = "route", value_name = "KEY=VALUE")]
        routes: Vec<String>,

        /// Raw query string, e.g. `id=7&page=2`
        #[arg(short, long)]
        query: Option<String>,
    },
}

fn find_controller<'a>(
    specs: &'a [ControllerSpec],
    name: &str,
) -> anyhow::Result<&'a ControllerSpec> {
    specs
        .iter()
        .find(|c| names_eq(c.name(), name))
        .ok_or_else(|| anyhow!("controller '{name}' not found in manifest"))
}

fn parse_route_value(raw: &str) -> anyhow::Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k, v)),
        _ => bail!("route value '{raw}' must look like key=value"),
    }
}

/// Execute a parsed command, writing human output to `out`.
///
/// Returns `Ok(false)` when `select` could not pick an action, so the binary
/// can exit non-zero without treating it as an internal error.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded, the controller is not in
/// it, or an argument is malformed.
pub fn execute(cli: Cli, out: &mut dyn Write) -> anyhow::Result<bool> {
    let selector = ActionSelector::with_config(RuntimeConfig::from_env());

    match cli.command {
        Commands::Inspect {
            manifest,
            controller,
            format,
        } => {
            let specs = load_manifest(&manifest)?;
            let selected: Vec<&ControllerSpec> = match &controller {
                Some(name) => vec![find_controller(&specs, name)?],
                None => specs.iter().collect(),
            };

            match format {
                OutputFormat::Json => {
                    let mut doc = serde_json::Map::new();
                    for spec in selected {
                        let mapping = serde_json::to_value(selector.mapping(spec))?;
                        doc.insert(spec.name().to_string(), mapping);
                    }
                    writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
                }
                OutputFormat::Text => {
                    for spec in selected {
                        writeln!(out, "[controller] {}", spec.name())?;
                        let mapping = selector.mapping(spec);
                        for (name, handlers) in mapping.iter() {
                            for handler in handlers {
                                writeln!(out, "  {name} -> {handler}")?;
                            }
                        }
                    }
                }
            }
            Ok(true)
        }
        Commands::Select {
            manifest,
            controller,
            method,
            action,
            routes,
            query,
        } => {
            let specs = load_manifest(&manifest)?;
            let spec = find_controller(&specs, &controller)?;
            let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
                .with_context(|| format!("invalid HTTP method '{method}'"))?;

            let mut builder = ActionRequest::builder()
                .method(method)
                .controller(spec.name());
            if let Some(action) = action {
                builder = builder.action(action);
            }
            for raw in &routes {
                let (key, value) = parse_route_value(raw)?;
                builder = builder.route_value(key, value);
            }
            if let Some(query) = &query {
                builder = builder.query_string(query);
            }
            let request = builder.build()?;

            match selector.select(spec, &request) {
                Ok(action) => {
                    writeln!(out, "{}", action.signature())?;
                    Ok(true)
                }
                Err(err) => {
                    writeln!(out, "{} {}", err.status_code(), err)?;
                    Ok(false)
                }
            }
        }
    }
}

/// Parse process arguments and run.
///
/// # Errors
///
/// See [`execute`].
pub fn run_cli() -> anyhow::Result<bool> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    execute(cli, &mut lock)
}
