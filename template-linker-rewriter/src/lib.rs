//! Rewriter for dynamic module references in generated template code
//!
//! Template compilers inline asset references as `require("./logo.png")`
//! calls. This crate hoists every such call into a static
//! `import __$_require_logo_png__ from "./logo.png"` declaration so the
//! generated module can be linked into an ES module graph.

pub mod ident;
pub mod rewriter;
pub mod scanner;

pub use rewriter::{rewrite, Binding, Rewrite, Rewriter, DEFAULT_CALLEE};
pub use scanner::{CallScanner, CallSite};
