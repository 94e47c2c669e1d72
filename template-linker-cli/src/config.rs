//! Environment-driven configuration

use anyhow::Context;
use std::path::PathBuf;
use template_linker_core::{ResolvedOptions, TemplateOverrides};

/// Everything the CLI needs before compiling any file
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub options: ResolvedOptions,
    /// JavaScript bundle defining the template compiler entry point
    pub compiler_bundle: PathBuf,
}

impl CliConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build the configuration from a variable lookup
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match var("TEMPLATE_LINKER_ROOT") {
            Some(root) => PathBuf::from(root),
            None => std::env::current_dir().context("Failed to read current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("Project root {} does not exist", root.display()))?;

        let is_production = flag(var("TEMPLATE_LINKER_PRODUCTION"))
            || var("NODE_ENV").as_deref() == Some("production");

        let overrides = match var("TEMPLATE_LINKER_OPTIONS") {
            Some(json) => TemplateOverrides::from_json(&json)
                .context("TEMPLATE_LINKER_OPTIONS must be a JSON object of compiler options")?,
            None => TemplateOverrides::default(),
        };

        let mut options = ResolvedOptions::new(root)
            .production(is_production)
            .with_overrides(overrides);
        if let Some(base) = var("TEMPLATE_LINKER_LIVE_BASE") {
            options = options.with_live_server(base);
        }
        options.validate()?;

        let compiler_bundle = var("TEMPLATE_LINKER_COMPILER")
            .map(PathBuf::from)
            .context("TEMPLATE_LINKER_COMPILER must point at the template compiler bundle")?;

        Ok(Self {
            options,
            compiler_bundle,
        })
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("1" | "true" | "yes"))
}
