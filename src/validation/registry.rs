use crate::ast::{Function, LineErrorKind};

use std::collections::HashMap;

/// Every named function of the program and where it is defined.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FunctionRegistry {
    functions: HashMap<String, String>,
}

impl FunctionRegistry {
    pub fn insert(&mut self, name: String, location: String) {
        self.functions.insert(name, location);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn location(&self, name: &str) -> Option<&str> {
        self.functions.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// Registers declarations in program order and returns the registry along
/// with the `file:line` of every main line. A repeated name is marked on
/// the later function; the first definition keeps the name.
pub fn register_functions(functions: &mut [Function]) -> (FunctionRegistry, Vec<String>) {
    let mut registry = FunctionRegistry::default();
    let mut mains = vec![];

    for function in functions.iter_mut() {
        if function.is_main {
            mains.push(function.location());
            continue;
        }
        // no leading variable, the parser reports the missing name
        if function.name.is_empty() {
            continue;
        }

        if registry.contains(&function.name) {
            let span = function
                .tokens
                .first()
                .map(|token| token.span.clone())
                .unwrap_or(0..0);
            let name = function.name.clone();
            function.push_error(LineErrorKind::AlreadyDefined(name), span);
            continue;
        }

        registry.insert(function.name.clone(), function.location());
    }

    (registry, mains)
}
