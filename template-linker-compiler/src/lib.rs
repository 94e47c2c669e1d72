//! Compilation adapter for component templates
//!
//! This crate drives an external template compiler, forwards its tips and
//! errors to the host's diagnostic sink, and post-processes the generated
//! render code so it can be statically linked.

pub mod adapter;
pub mod code_frame;
pub mod error;
pub mod paths;
pub mod quickjs;
pub mod sink;

pub use adapter::{TemplateAdapter, TemplateCompiler, EXPORT_TRAILER};
pub use code_frame::generate_code_frame;
pub use error::CompilerError;
pub use quickjs::QuickJsTemplateCompiler;
pub use sink::{CollectingSink, DiagnosticSink, TracingSink};
