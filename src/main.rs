// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Linkmap CLI entrypoint.
//!
//! Reads a topology as JSON, routes its links, places node labels and writes the
//! topology back out. `-` or a missing path means stdin/stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use linkmap::config::{ConfigError, LayoutConfig};
use linkmap::layout::{layout_topology, RouteInvariantError};
use linkmap::model::{Topology, TopologyError};

/// Route links and place labels for a network topology map.
#[derive(Parser, Debug)]
#[command(name = "linkmap", version, about)]
struct Cli {
    /// Topology JSON to read (stdin if absent or `-`)
    input: Option<PathBuf>,

    /// Where to write the laid-out topology (stdout if absent or `-`)
    output: Option<PathBuf>,

    /// Layout configuration file (JSON)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long = "dump-config")]
    dump_config: bool,

    /// Don't penalise routes for running beside other links
    #[arg(long = "no-spread-links")]
    no_spread_links: bool,

    /// Only route horizontally and vertically
    #[arg(long = "orthogonal")]
    orthogonal: bool,

    /// Leave node label directions untouched
    #[arg(long = "no-labels")]
    no_labels: bool,

    /// Log routing progress to stderr (repeat for more detail)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read {}", display_path(.path))]
    Read {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", display_path(.path))]
    Write {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode topology from {}", display_path(.path))]
    Topology {
        path: Option<PathBuf>,
        #[source]
        source: TopologyError,
    },
    #[error("failed to encode topology")]
    Encode(#[source] TopologyError),
    #[error("internal routing error")]
    Routing(#[from] RouteInvariantError),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "stdin/stdout".to_owned(),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "linkmap=debug",
        _ => "linkmap=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// `None` for stdin/stdout.
fn file_arg(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|path| path.as_os_str() != "-")
}

fn effective_config(cli: &Cli) -> Result<LayoutConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => LayoutConfig::load(path)?,
        None => LayoutConfig::default(),
    };
    if cli.no_spread_links {
        config.router.spread_links = false;
    }
    if cli.orthogonal {
        config.router.orthogonal = true;
    }
    if cli.no_labels {
        config.place_labels = false;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String, AppError> {
    let result = match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };
    result.map_err(|source| AppError::Read { path: path.map(Path::to_path_buf), source })
}

fn write_output(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    let result = match path {
        Some(path) => write_atomic(path, contents.as_bytes()),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents.as_bytes()).and_then(|()| stdout.write_all(b"\n"))
        }
    };
    result.map_err(|source| AppError::Write { path: path.map(Path::to_path_buf), source })
}

/// Writes to a temporary sibling file and renames it over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(io::Error::other("path has no file name"));
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path = parent.join(format!(".linkmap.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&tmp_path)?;
    let written = file.write_all(contents).and_then(|()| file.write_all(b"\n")).and_then(|()| file.flush());
    drop(file);
    if let Err(err) = written.and_then(|()| rename_overwrite(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err) if matches!(err.kind(), io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied) => {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = effective_config(&cli)?;
    if cli.dump_config {
        println!("{}", config.to_json_string_pretty());
        return Ok(());
    }

    let input = file_arg(cli.input);
    let output = file_arg(cli.output);

    let raw = read_input(input.as_deref())?;
    let mut topo = Topology::from_json_str(&raw)
        .map_err(|source| AppError::Topology { path: input.clone(), source })?;
    debug!(nodes = topo.nodes().len(), links = topo.links().len(), "topology loaded");

    let summary = layout_topology(&mut topo, &config)?;
    info!(
        routed = summary.routing.routed,
        unrouted = summary.routing.unrouted,
        labels = summary.labels.map_or(0, |labels| labels.placed),
        "layout done"
    );

    let json = topo.to_json_string_pretty().map_err(AppError::Encode)?;
    write_output(output.as_deref(), &json)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "linkmap failed");
            let mut message = format!("error: {err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                message.push_str(&format!("\n  caused by: {cause}"));
                source = cause.source();
            }
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
