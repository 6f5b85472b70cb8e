use crate::ast::{Function, LineError, LineErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::validation::FunctionRegistry;

use std::collections::HashSet;

/// Single left-to-right pass over a line, judging each token by the one
/// before it. Errors are appended to the function; the scan never stops
/// early once it has started.
pub fn check_function(function: &mut Function, registry: &FunctionRegistry) {
    let Some(first) = function.tokens.first() else {
        return;
    };
    let first_span = first.span.clone();
    let first_is_value = first.kind.is_value();

    if !function.is_main {
        let equals: Vec<&Token> = function
            .tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Equals)
            .collect();

        if equals.is_empty() {
            let span = 0..function.source.len();
            let name = function.name.clone();
            function.push_error(LineErrorKind::MissingEquals(name), span);
            return;
        }
        if equals.len() > 1 {
            let span = equals[1].span.clone();
            let name = function.name.clone();
            function.push_error(LineErrorKind::MultipleEquals(name), span);
            return;
        }
    } else if !first_is_value {
        function.push_error(LineErrorKind::InvalidMainStart, first_span);
        return;
    }

    let mut scope: HashSet<&str> = HashSet::new();
    let mut header_ended = false;
    let mut errors = vec![];

    for pair in function.tokens.windows(2) {
        let (prev, token) = (&pair[0], &pair[1]);

        if token.kind == TokenKind::Equals {
            header_ended = true;
            continue;
        }
        if token.kind == TokenKind::Variable && (function.is_main || !header_ended) {
            scope.insert(token.text.as_str());
        }

        if let Some(kind) = check_token(prev, token, &scope, registry) {
            errors.push(LineError {
                kind,
                span: token.span.clone(),
            });
        }
    }

    function.errors.extend(errors);
}

fn check_token(
    prev: &Token,
    token: &Token,
    scope: &HashSet<&str>,
    registry: &FunctionRegistry,
) -> Option<LineErrorKind> {
    match token.kind {
        TokenKind::LeftParen if prev.kind != TokenKind::Variable => Some(unexpected(prev, token)),
        TokenKind::RightParen | TokenKind::Comma if !prev.kind.is_value() => {
            Some(unexpected(prev, token))
        }
        TokenKind::Variable
            if !scope.contains(token.text.as_str()) && !registry.contains(&token.text) =>
        {
            Some(LineErrorKind::UndefinedVariable(token.text.clone()))
        }
        kind if kind.is_operator()
            && !(prev.kind.is_value() || prev.kind == TokenKind::RightParen) =>
        {
            Some(unexpected(prev, token))
        }
        TokenKind::Constant | TokenKind::Variable if !follows_separator(prev.kind) => {
            Some(unexpected(prev, token))
        }
        _ => None,
    }
}

/// Values may only start after one of these.
fn follows_separator(kind: TokenKind) -> bool {
    kind == TokenKind::Comma
        || kind.is_operator()
        || kind == TokenKind::LeftParen
        || kind == TokenKind::Equals
}

fn unexpected(prev: &Token, token: &Token) -> LineErrorKind {
    LineErrorKind::Unexpected {
        found: token.kind.to_string(),
        after: prev.text.clone(),
    }
}
