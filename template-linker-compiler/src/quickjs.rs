//! Template compiler hosted in an embedded QuickJS runtime
//!
//! The compiler itself is a JavaScript bundle supplied by the user (for
//! example `vue-template-compiler` plus `@vue/component-compiler-utils`
//! bundled into a single script). The bundle must define a global
//! entry point:
//!
//! ```js
//! function __compileTemplate(source, optionsJson) {
//!     // ... returns JSON.stringify({ code, tips, errors })
//! }
//! ```

use std::path::Path;

use rquickjs::{Context, Runtime};
use template_linker_core::{CompileTemplateOptions, Diagnostic, TemplateOutput};

use crate::adapter::TemplateCompiler;
use crate::CompilerError;

/// Global function the bundle must define
pub const ENTRY_POINT: &str = "__compileTemplate";

/// [`TemplateCompiler`] that evaluates a JavaScript compiler bundle.
///
/// A fresh runtime is created per call, so one instance can serve many
/// threads at once.
pub struct QuickJsTemplateCompiler {
    bundle: String,
}

impl QuickJsTemplateCompiler {
    pub fn new(bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
        }
    }

    /// Load the compiler bundle from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CompilerError> {
        let path = path.as_ref();
        let bundle = std::fs::read_to_string(path)?;
        tracing::info!(
            "Loaded template compiler bundle from {} ({} bytes)",
            path.display(),
            bundle.len()
        );
        Ok(Self::new(bundle))
    }
}

impl TemplateCompiler for QuickJsTemplateCompiler {
    fn compile(&self, options: &CompileTemplateOptions) -> Result<TemplateOutput, CompilerError> {
        let options_json = serde_json::to_string(options)?;

        let runtime = Runtime::new().map_err(|e| CompilerError::RuntimeError(e.to_string()))?;
        let context =
            Context::full(&runtime).map_err(|e| CompilerError::RuntimeError(e.to_string()))?;

        let result: Result<String, CompilerError> = context.with(|ctx| {
            ctx.eval::<(), _>(self.bundle.as_bytes().to_vec())
                .map_err(|e| CompilerError::RuntimeError(e.to_string()))?;

            let defined: bool = ctx
                .eval(format!("typeof {} === 'function'", ENTRY_POINT).into_bytes())
                .map_err(|e| CompilerError::RuntimeError(e.to_string()))?;
            if !defined {
                return Err(CompilerError::CompilationFailed(format!(
                    "Compiler bundle does not define {}",
                    ENTRY_POINT
                )));
            }

            // Inputs go through globals rather than being spliced into the
            // call script, so no escaping is needed
            let globals = ctx.globals();
            globals
                .set("__templateSource", options.source.clone())
                .map_err(|e| CompilerError::RuntimeError(e.to_string()))?;
            globals
                .set("__templateOptions", options_json)
                .map_err(|e| CompilerError::RuntimeError(e.to_string()))?;

            let output: String = ctx
                .eval(format!("{}(__templateSource, __templateOptions)", ENTRY_POINT).into_bytes())
                .map_err(|e| CompilerError::RuntimeError(e.to_string()))?;

            Ok(output)
        });

        let output_json = result?;
        let mut output = TemplateOutput::from_json(&output_json)?;
        to_char_offsets(&options.source, &mut output.tips);
        to_char_offsets(&options.source, &mut output.errors);
        Ok(output)
    }
}

/// JavaScript ranges count UTF-16 code units; rebase them onto `char`s
fn to_char_offsets(source: &str, diagnostics: &mut [Diagnostic]) {
    for diagnostic in diagnostics {
        if let Diagnostic::Ranged { start, end, .. } = diagnostic {
            *start = char_offset(source, *start);
            *end = char_offset(source, *end);
        }
    }
}

fn char_offset(source: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in source.chars().enumerate() {
        if units >= utf16_offset {
            return index;
        }
        units += ch.len_utf16();
    }
    // Past the end: keep the overshoot so the frame stays empty
    source.chars().count() + utf16_offset.saturating_sub(units)
}
