//! Template Linker - command line host
//!
//! Compiles raw template files with a JavaScript template compiler and
//! writes linkable render modules next to them.

mod config;

use anyhow::Context;
use config::CliConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use template_linker_compiler::{
    CollectingSink, DiagnosticSink, QuickJsTemplateCompiler, TemplateAdapter, TracingSink,
};
use template_linker_core::{ErrorReport, ResolvedOptions, SfcBlock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: template-linker [--functional] <file>...";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,template_linker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let functional = args.iter().any(|arg| arg == "--functional");
    let files: Vec<PathBuf> = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .collect();
    if files.is_empty() {
        anyhow::bail!(USAGE);
    }

    let config = CliConfig::from_env()?;
    tracing::info!(
        "Compiling {} templates under {} ({} mode)",
        files.len(),
        config.options.root.display(),
        if config.options.is_live_server() { "live server" } else { "static link" }
    );

    let compiler = QuickJsTemplateCompiler::from_path(&config.compiler_bundle).with_context(|| {
        format!(
            "Failed to load template compiler from {}",
            config.compiler_bundle.display()
        )
    })?;
    let adapter = Arc::new(TemplateAdapter::new(compiler));
    let options = Arc::new(config.options);
    let block = SfcBlock::new(functional);

    // Each file is independent; compile them on the blocking pool
    let mut handles = Vec::with_capacity(files.len());
    for file in files {
        let adapter = adapter.clone();
        let options = options.clone();
        let block = block.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            let outcome = compile_file(&adapter, &file, &block, &options);
            (file, outcome)
        }));
    }

    let total = handles.len();
    let mut failed = 0;
    for handle in handles {
        let (file, outcome) = handle.await.context("Compilation task panicked")?;
        match outcome {
            Ok(FileOutcome::Written(output)) => {
                tracing::info!("Wrote {}", output.display());
            }
            Ok(FileOutcome::Rejected(reports)) => {
                for report in reports {
                    TracingSink.report_error(report);
                }
                failed += 1;
            }
            Err(e) => {
                tracing::error!("{}: {:#}", file.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} templates failed to compile", failed, total);
    }
    Ok(())
}

/// Result of compiling one file
#[derive(Debug)]
enum FileOutcome {
    /// Output module written to this path
    Written(PathBuf),
    /// The compiler reported diagnostics; nothing was written
    Rejected(Vec<ErrorReport>),
}

fn compile_file(
    adapter: &TemplateAdapter<QuickJsTemplateCompiler>,
    file: &Path,
    block: &SfcBlock,
    options: &ResolvedOptions,
) -> anyhow::Result<FileOutcome> {
    let file = file
        .canonicalize()
        .with_context(|| format!("Template {} does not exist", file.display()))?;
    let source = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let sink = CollectingSink::new();
    let code = adapter.compile(&source, block, &file, options, &sink)?;

    let reports = sink.into_reports();
    if !reports.is_empty() {
        return Ok(FileOutcome::Rejected(reports));
    }

    let output = output_path(&file);
    std::fs::write(&output, code)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(FileOutcome::Written(output))
}

/// `App.vue` -> `App.vue.js`
fn output_path(file: &Path) -> PathBuf {
    let mut name = file.as_os_str().to_owned();
    name.push(".js");
    PathBuf::from(name)
}
