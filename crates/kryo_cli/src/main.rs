//! kryo CLI
//!
//! Parse, lower, run, and hot-reload-watch KRYO sources from the
//! command line.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::KryoConfig;

#[derive(Parser)]
#[command(name = "kryo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "KRYO declarative UI toolchain CLI", long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a KRY source file and report diagnostics
    Parse {
        /// Path to a .kry source file
        source: PathBuf,
    },
    /// Parse and lower a KRY source file, printing its KIR document
    Lower {
        /// Path to a .kry source file
        source: PathBuf,
    },
    /// Parse a Tcl/Tk script through the adapter, printing its KIR document
    LowerTcl {
        /// Path to a .tcl source file
        source: PathBuf,
    },
    /// Load a KRY source file into an instance and print a summary
    Run {
        /// Path to a .kry source file
        source: PathBuf,
    },
    /// Load a KRY source file and watch it for hot-reload
    Watch {
        /// Path to a .kry source file
        source: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    match cli.command {
        Commands::Parse { source } => cmd_parse(&source),
        Commands::Lower { source } => cmd_lower(&source),
        Commands::LowerTcl { source } => cmd_lower_tcl(&source),
        Commands::Run { source } => cmd_run(&source),
        Commands::Watch { source } => cmd_watch(&source),
    }
}

fn base_dir_of(source: &Path) -> PathBuf {
    source.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
}

fn cmd_parse(source: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source.display()))?;
    let mut parser = kryo_parser::Parser::new(&text);
    let items = parser.parse_program();

    info!(items = items.len(), "parsed top-level items");
    for diagnostic in &parser.diagnostics.entries {
        warn!(level = ?diagnostic.level, category = ?diagnostic.category, message = %diagnostic.message, "diagnostic");
    }
    if parser.diagnostics.entries.iter().any(|d| d.level == kryo_parser::DiagnosticLevel::Fatal) {
        anyhow::bail!("parse failed with a fatal diagnostic");
    }
    Ok(())
}

fn cmd_lower(source: &Path) -> Result<()> {
    let config = KryoConfig::load_from_dir(&base_dir_of(source)).unwrap_or_else(|_| KryoConfig {
        project: config::ProjectMetadata { name: "kryo_app".to_string(), authors: Vec::new() },
        build: config::BuildConfig::default(),
    });
    info!(project = %config.project.name, "lowering");

    let text = std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source.display()))?;
    let mut ctx = kryo_core::IRContext::new(kryo_core::InstanceId(0));
    let handles = kryo_runtime::compile_source(&mut ctx, base_dir_of(source), &text, None)
        .context("failed to compile source")?;

    let Some(&root) = handles.first() else {
        anyhow::bail!("source produced no components");
    };
    let json = kryo_serde::serialize_to_string(&ctx, root).context("failed to serialize IR tree")?;
    println!("{json}");
    Ok(())
}

fn cmd_lower_tcl(source: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source.display()))?;
    let document = kryo_tcl::parse_document(&text).context("failed to parse tcl script")?;
    match document {
        Some(doc) => println!("{}", serde_json::to_string_pretty(&doc)?),
        None => warn!("script produced no widgets"),
    }
    Ok(())
}

fn cmd_run(source: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source.display()))?;
    let base_dir = base_dir_of(source);

    let mut registry = kryo_runtime::InstanceRegistry::new();
    let id = registry.create("kryo_run", &base_dir).context("failed to create instance")?;
    let instance = registry.get_mut(id).expect("just created");
    instance.load(&text).context("failed to load source into instance")?;

    let root_count = instance.ctx.root.is_some() as usize;
    info!(instance = ?id, root_components = root_count, "instance loaded");
    Ok(())
}

fn cmd_watch(source: &Path) -> Result<()> {
    let text = std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source.display()))?;
    let base_dir = base_dir_of(source);
    let config = KryoConfig::load_from_dir(&base_dir).unwrap_or_else(|_| KryoConfig {
        project: config::ProjectMetadata { name: "kryo_app".to_string(), authors: Vec::new() },
        build: config::BuildConfig::default(),
    });

    let mut registry = kryo_runtime::InstanceRegistry::new();
    let id = registry.create(config.project.name.clone(), &base_dir).context("failed to create instance")?;
    let instance = registry.get_mut(id).expect("just created");
    instance.load(&text).context("failed to load source into instance")?;
    instance.watch(source.to_path_buf()).context("failed to start file watcher")?;

    info!(instance = ?id, path = %source.display(), "watching for changes (Ctrl-C to stop)");
    loop {
        match instance.poll_reload() {
            Ok(true) => info!(version = instance.version, "reloaded"),
            Ok(false) => {}
            Err(err) => warn!(err = %err, "reload failed, instance state unchanged"),
        }
        std::thread::sleep(Duration::from_millis(100));
    }
}
