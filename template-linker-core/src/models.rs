//! Core domain models

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::CoreError;

/// Descriptor of a template block extracted from a component file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SfcBlock {
    /// Whether the block carries the `functional` attribute
    #[serde(default)]
    pub functional: bool,
}

impl SfcBlock {
    pub fn new(functional: bool) -> Self {
        Self { functional }
    }
}

/// Options controlling how asset URLs in the template are rewritten
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUrlOptions {
    /// Base path prepended to relative asset URLs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

impl AssetUrlOptions {
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

/// A single attribute name or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// `transformAssetUrls`: either a switch, or a map from tag name to the
/// attributes holding asset URLs, e.g. `{ "video": ["src", "poster"] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetUrlTransform {
    Enabled(bool),
    Tags(BTreeMap<String, OneOrMany>),
}

impl Default for AssetUrlTransform {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

/// Options forwarded verbatim to the template compiler's parser/codegen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    /// Emit errors with source ranges (required for code frames)
    #[serde(default)]
    pub output_source_range: bool,
    /// Whitespace handling mode (`preserve` or `condense`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_whitespace: Option<bool>,
    /// Interpolation delimiters, e.g. `("${", "}")`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<bool>,
    /// Any other compiler option, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Caller-supplied overrides for the template compiler options.
///
/// Every field left as `None` falls back to the computed default; a
/// `Some` value always wins over the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateOverrides {
    pub transform_asset_urls: Option<AssetUrlTransform>,
    pub transform_asset_urls_options: Option<AssetUrlOptions>,
    pub is_production: Option<bool>,
    pub is_functional: Option<bool>,
    #[serde(rename = "optimizeSSR")]
    pub optimize_ssr: Option<bool>,
    pub prettify: Option<bool>,
    pub compiler_options: Option<CompilerOptions>,
    /// Options without a dedicated field (`transpileOptions`, `modules`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TemplateOverrides {
    /// Parse overrides from a camelCase JSON object
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Build configuration resolved by the host before any file is compiled
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    /// Project root; asset base paths are computed relative to it
    pub root: PathBuf,
    pub is_production: bool,
    pub template_overrides: TemplateOverrides,
    /// Base path of the live development server. `Some` selects live-server
    /// mode, `None` selects static linking.
    pub live_server_base: Option<String>,
}

impl ResolvedOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn production(mut self, is_production: bool) -> Self {
        self.is_production = is_production;
        self
    }

    pub fn with_overrides(mut self, overrides: TemplateOverrides) -> Self {
        self.template_overrides = overrides;
        self
    }

    pub fn with_live_server(mut self, base: impl Into<String>) -> Self {
        self.live_server_base = Some(base.into());
        self
    }

    pub fn is_live_server(&self) -> bool {
        self.live_server_base.is_some()
    }

    /// Reject configurations the compiler cannot work with
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.root.as_os_str().is_empty() {
            return Err(CoreError::InvalidOptions(
                "Project root cannot be empty".to_string(),
            ));
        }

        let delimiters = self
            .template_overrides
            .compiler_options
            .as_ref()
            .and_then(|c| c.delimiters.as_ref());
        if let Some((open, close)) = delimiters {
            if open.is_empty() || close.is_empty() {
                return Err(CoreError::InvalidOptions(format!(
                    "Delimiters cannot be empty: ({:?}, {:?})",
                    open, close
                )));
            }
        }

        Ok(())
    }
}

/// Fully merged option set handed to the external template compiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileTemplateOptions {
    pub source: String,
    pub filename: String,
    pub transform_asset_urls: AssetUrlTransform,
    pub transform_asset_urls_options: AssetUrlOptions,
    pub is_production: bool,
    pub is_functional: bool,
    #[serde(rename = "optimizeSSR")]
    pub optimize_ssr: bool,
    pub prettify: bool,
    pub compiler_options: CompilerOptions,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompileTemplateOptions {
    /// Computed defaults before any caller override is applied
    pub fn defaults(
        source: impl Into<String>,
        filename: impl Into<String>,
        asset_urls: AssetUrlOptions,
        is_production: bool,
        is_functional: bool,
    ) -> Self {
        Self {
            source: source.into(),
            filename: filename.into(),
            transform_asset_urls: AssetUrlTransform::default(),
            transform_asset_urls_options: asset_urls,
            is_production,
            is_functional,
            optimize_ssr: false,
            prettify: false,
            compiler_options: CompilerOptions::default(),
            extra: Map::new(),
        }
    }

    /// Apply caller overrides field by field; a present override wins
    pub fn apply_overrides(self, overrides: &TemplateOverrides) -> Self {
        Self {
            source: self.source,
            filename: self.filename,
            transform_asset_urls: overrides
                .transform_asset_urls
                .clone()
                .unwrap_or(self.transform_asset_urls),
            transform_asset_urls_options: overrides
                .transform_asset_urls_options
                .clone()
                .unwrap_or(self.transform_asset_urls_options),
            is_production: overrides.is_production.unwrap_or(self.is_production),
            is_functional: overrides.is_functional.unwrap_or(self.is_functional),
            optimize_ssr: overrides.optimize_ssr.unwrap_or(self.optimize_ssr),
            prettify: overrides.prettify.unwrap_or(self.prettify),
            compiler_options: overrides
                .compiler_options
                .clone()
                .unwrap_or(self.compiler_options),
            extra: overrides.extra.clone(),
        }
    }
}

/// A tip or error produced by the template compiler
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawDiagnostic")]
pub enum Diagnostic {
    /// Message without location information
    Plain(String),
    /// Message with a character range into the template source
    Ranged {
        message: String,
        start: usize,
        end: usize,
    },
}

impl Diagnostic {
    pub fn plain(message: impl Into<String>) -> Self {
        Self::Plain(message.into())
    }

    pub fn ranged(message: impl Into<String>, start: usize, end: usize) -> Self {
        Self::Ranged {
            message: message.into(),
            start,
            end,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Plain(message) | Self::Ranged { message, .. } => message,
        }
    }
}

/// Diagnostic as emitted on the wire by the compiler, whose shape depends
/// on the compiler version
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawDiagnostic {
    Text(String),
    Object {
        #[serde(default)]
        msg: Option<String>,
        #[serde(default)]
        start: Option<usize>,
        #[serde(default)]
        end: Option<usize>,
    },
    Other(serde_json::Value),
}

impl From<RawDiagnostic> for Diagnostic {
    fn from(raw: RawDiagnostic) -> Self {
        match raw {
            RawDiagnostic::Text(message) => Diagnostic::Plain(message),
            RawDiagnostic::Object {
                msg,
                start: Some(start),
                end: Some(end),
            } => Diagnostic::Ranged {
                message: msg.unwrap_or_default(),
                start,
                end,
            },
            RawDiagnostic::Object { msg, .. } => Diagnostic::Plain(msg.unwrap_or_default()),
            RawDiagnostic::Other(value) => Diagnostic::Plain(value.to_string()),
        }
    }
}

/// Result of one external compiler invocation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplateOutput {
    /// Generated render code (defines `render` and `staticRenderFns`)
    pub code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tips: Vec<Diagnostic>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<Diagnostic>,
}

impl TemplateOutput {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Diagnostic>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Diagnostic>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Report handed to the host's diagnostic sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Identifier of the file the diagnostic belongs to
    pub id: String,
    pub message: String,
    /// Rendered code frame, when the diagnostic carried a source range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<String>,
}

impl ErrorReport {
    pub fn plain(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            frame: None,
        }
    }

    pub fn with_frame(
        id: impl Into<String>,
        message: impl Into<String>,
        frame: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            frame: Some(frame.into()),
        }
    }
}
