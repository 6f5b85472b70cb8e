pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod validation;

pub use error::{CompileError, CompileResult};

use codegen::EmitOptions;

use std::path::Path;

/// Tokenize, validate, generate and emit, stopping at the first stage
/// that fails.
pub fn compile<P: AsRef<Path>>(files: &[P], options: &EmitOptions) -> CompileResult<()> {
    let mut functions = lexer::tokenize(files)?;
    validation::validate(&mut functions)?;
    let instructions = ir::generate(&functions)?;
    codegen::emit(&instructions, options)
}
