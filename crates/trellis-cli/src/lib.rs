//! CLI logic for the Trellis theme tool.
//!
//! This module contains the core CLI logic: loading the configured theme,
//! resolving elements, printing the element tree and position-adjusting
//! rows read from TOML files.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
};

use log::{error, info};
use serde::{Deserialize, Serialize};

use trellis::{
    Resolver, TrellisError,
    config::AppConfig,
    position::{PositionAdjustment, StackRow},
    tree::ElementTree,
};

/// The layout of a rows file: a `[[rows]]` array of tables.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RowsFile {
    #[serde(default)]
    pub rows: Vec<StackRow>,
}

/// Run the Trellis CLI application, writing results to stdout.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Theme building and element resolution errors
/// - Position adjustment errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_with_output(args, &mut out)
}

/// Run the Trellis CLI application, writing results to `out`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), TrellisError> {
    let app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Resolve { elements, all } => resolve(&app_config, elements, *all, out),
        Command::Tree => print_tree(out),
        Command::Fill {
            input,
            output,
            stack,
        } => fill(&app_config, input, output.as_deref(), *stack, out),
    }
}

fn resolve(
    app_config: &AppConfig,
    elements: &[String],
    all: bool,
    out: &mut impl Write,
) -> Result<(), TrellisError> {
    let theme = app_config.theme().build()?;
    let resolver = Resolver::new(ElementTree::builtin());

    if !all {
        for name in elements {
            let element = resolver.resolve(name, &theme)?;
            writeln!(out, "{name}: {element}")?;
        }
        info!(elements_count = elements.len(); "Elements resolved");
        return Ok(());
    }

    let mut first_error = None;
    for (name, result) in resolver.resolve_all(&theme) {
        match result {
            Ok(element) => writeln!(out, "{name}: {element}")?,
            Err(err) => {
                error!(element = name; "{err}");
                writeln!(out, "{name}: <error>")?;
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn print_tree(out: &mut impl Write) -> Result<(), TrellisError> {
    for node in ElementTree::builtin().nodes() {
        if node.is_root() {
            writeln!(out, "{}: {}", node.name(), node.kind())?;
        } else {
            writeln!(
                out,
                "{}: {} <- {}",
                node.name(),
                node.kind(),
                node.parents().join(", ")
            )?;
        }
    }
    Ok(())
}

fn fill(
    app_config: &AppConfig,
    input: &str,
    output: Option<&str>,
    stack: bool,
    out: &mut impl Write,
) -> Result<(), TrellisError> {
    info!(input_path = input, stack; "Adjusting rows");

    let source = fs::read_to_string(input)?;
    let rows_file: RowsFile = toml::from_str(&source).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("invalid rows file {input}: {err}"),
        )
    })?;

    let position = app_config.position();
    let rows = if stack {
        position.stack().compute(rows_file.rows)?
    } else {
        position.fill().compute(rows_file.rows)?
    };
    let rows_count = rows.len();

    let rendered = toml::to_string(&RowsFile { rows })
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err.to_string()))?;

    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path, rows_count; "Rows written");
        }
        None => out.write_all(rendered.as_bytes())?,
    }
    Ok(())
}
