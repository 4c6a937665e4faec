//! AutoWeb CLI library
//!
//! Exposes modules for integration testing

pub mod compile;
pub mod config;

pub use compile::{
    compile_document, compile_expr, compile_merged_document, compile_selector, decode_document,
    CompileError, CompiledQuery,
};
pub use config::{CompileTarget, Config, OutputFormat};
