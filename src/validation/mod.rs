use crate::ast::Function;
use crate::error::{CompileError, CompileResult};
use crate::parser::parse_function;

use log::{debug, error};

pub mod grammar;
pub mod registry;


pub use registry::FunctionRegistry;

/// Checks the whole program. Missing or repeated main lines abort right
/// away; everything else is collected on the offending [`Function`],
/// logged with its `file:line`, and reported as one count at the end.
pub fn validate(functions: &mut [Function]) -> CompileResult<FunctionRegistry> {
    let (registry, mains) = registry::register_functions(functions);

    match mains.len() {
        0 => return Err(CompileError::NoMain),
        1 => {}
        _ => return Err(CompileError::MultipleMains(mains)),
    }

    for function in functions.iter_mut() {
        grammar::check_function(function, &registry);
    }

    for function in functions.iter_mut().filter(|f| !f.has_errors()) {
        if let Err(errors) = parse_function(function) {
            function.errors.extend(errors);
        }
    }

    let mut count = 0;
    for function in functions.iter() {
        for err in &function.errors {
            error!("{}: {}", function.location(), err);
            count += 1;
        }
    }

    if count > 0 {
        return Err(CompileError::Validation { count });
    }

    debug!(
        "validated {} function(s), {} named",
        functions.len(),
        registry.len()
    );
    Ok(registry)
}
