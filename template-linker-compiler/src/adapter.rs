//! Template compilation adapter
//!
//! Runs the external template compiler with the merged option set, reports
//! its diagnostics, and turns the generated render code into a module the
//! host can link.

use std::path::Path;

use template_linker_core::{
    AssetUrlOptions, CompileTemplateOptions, Diagnostic, ErrorReport, ResolvedOptions, SfcBlock,
    TemplateOutput,
};
use template_linker_rewriter::Rewriter;

use crate::code_frame::generate_code_frame;
use crate::paths::asset_base;
use crate::sink::DiagnosticSink;
use crate::CompilerError;

/// Export statement appended to every compiled template
pub const EXPORT_TRAILER: &str = "export { render, staticRenderFns }";

/// The external template compiler
pub trait TemplateCompiler: Send + Sync {
    /// Compile a template. Template problems come back as diagnostics in
    /// the output; `Err` means the compiler itself could not run.
    fn compile(&self, options: &CompileTemplateOptions) -> Result<TemplateOutput, CompilerError>;

    /// Whether ranged errors can be rendered as code frames. Ranges in
    /// the returned output are `char` offsets into the source.
    fn supports_code_frames(&self) -> bool {
        true
    }

    fn code_frame(&self, source: &str, start: usize, end: usize) -> String {
        generate_code_frame(source, start, end)
    }
}

/// Compiles template blocks into linkable render modules
pub struct TemplateAdapter<C> {
    compiler: C,
    rewriter: Rewriter,
}

impl<C: TemplateCompiler> TemplateAdapter<C> {
    pub fn new(compiler: C) -> Self {
        Self {
            compiler,
            rewriter: Rewriter::new(),
        }
    }

    /// Use a rewriter recognizing a different dynamic reference call
    pub fn with_rewriter(mut self, rewriter: Rewriter) -> Self {
        self.rewriter = rewriter;
        self
    }

    /// Compile `source`, the template block of `filename`.
    ///
    /// Every tip and error is forwarded to `sink` before this returns. In
    /// static-link mode dynamic references are hoisted into imports; in
    /// live-server mode the code is left as generated. Both modes end with
    /// [`EXPORT_TRAILER`].
    pub fn compile(
        &self,
        source: &str,
        block: &SfcBlock,
        filename: &Path,
        options: &ResolvedOptions,
        sink: &dyn DiagnosticSink,
    ) -> Result<String, CompilerError> {
        let id = filename.to_string_lossy().into_owned();
        let compile_options = self.compile_options(source, block, filename, options);

        let output = self.compiler.compile(&compile_options)?;

        tracing::debug!(
            "Compiled template {} ({} tips, {} errors)",
            id,
            output.tips.len(),
            output.errors.len()
        );

        for tip in &output.tips {
            sink.report_error(ErrorReport::plain(id.as_str(), tip.message()));
        }

        let frames = self.compiler.supports_code_frames()
            && compile_options.compiler_options.output_source_range;
        for error in &output.errors {
            sink.report_error(self.error_report(&id, source, error, frames));
        }

        let code = if options.is_live_server() {
            output.code
        } else {
            self.rewriter.rewrite(&output.code)
        };

        Ok(format!("{}\n{}", code, EXPORT_TRAILER))
    }

    /// The option set handed to the compiler: computed defaults with the
    /// caller's overrides applied on top
    pub fn compile_options(
        &self,
        source: &str,
        block: &SfcBlock,
        filename: &Path,
        options: &ResolvedOptions,
    ) -> CompileTemplateOptions {
        let asset_urls = match &options.live_server_base {
            Some(base) => AssetUrlOptions::with_base(asset_base(base, &options.root, filename)),
            None => AssetUrlOptions::default(),
        };

        CompileTemplateOptions::defaults(
            source,
            filename.to_string_lossy(),
            asset_urls,
            options.is_production,
            block.functional,
        )
        .apply_overrides(&options.template_overrides)
    }

    fn error_report(
        &self,
        id: &str,
        source: &str,
        error: &Diagnostic,
        frames: bool,
    ) -> ErrorReport {
        match error {
            Diagnostic::Ranged {
                message,
                start,
                end,
            } if frames => ErrorReport::with_frame(
                id,
                message.as_str(),
                self.compiler.code_frame(source, *start, *end),
            ),
            _ => ErrorReport::plain(id, error.message()),
        }
    }
}
