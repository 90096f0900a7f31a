//! RTS Script - compiler for radius trigger script source
//!
//! Turns RTS text into [`rts_core::ScriptDef`]s:
//! - Line splicing and tokenizing with `#DEFINE` substitution
//! - A primitive dispatch table checked for block level and parameter count
//! - Jump labels resolved when each trigger block ends
//! - A loader for `.rts` files and directories

mod actions;
mod args;
pub mod compiler;
mod define;
mod error;
mod loader;
mod primitive;
pub mod tokenizer;

pub use compiler::{
    compile, BlockLevel, CompileOptions, CompileReport, Compiler, DEFAULT_TIP_TIME,
    LANGUAGE_VERSION,
};
pub use define::DefineTable;
pub use error::{Error, Result};
pub use loader::{Loader, SCRIPT_EXTENSION};
pub use primitive::keywords;
pub use tokenizer::{splice_lines, tokenize, LogicalLine, TokenizeError};
