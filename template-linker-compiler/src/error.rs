//! Compiler error types

use template_linker_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    #[error("Compilation failed: {0}")]
    CompilationFailed(String),

    #[error("Invalid compiler output: {0}")]
    InvalidOutput(#[from] CoreError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
