pub mod expression;
pub mod function;


use crate::ast::{Definition, Function, LineError, LineErrorKind};
use crate::lexer::{Token, TokenKind};

use std::iter::Peekable;
use std::ops::Range;
use std::slice::Iter;

type TokenIter<'a> = Peekable<Iter<'a, Token>>;

/// Recursive-descent parser over the tokens of a single line.
pub struct Parser<'a> {
    tokens: TokenIter<'a>,
    end: usize,
    errors: Vec<LineError>,
}

impl<'a> Parser<'a> {
    pub fn new(function: &'a Function) -> Self {
        Parser {
            tokens: function.tokens.iter().peekable(),
            end: function.source.len(),
            errors: vec![],
        }
    }

    fn peek_kind(&mut self) -> Option<TokenKind> {
        self.tokens.peek().map(|token| token.kind)
    }

    fn error(&mut self, message: impl Into<String>, span: Range<usize>) {
        self.errors.push(LineError {
            kind: LineErrorKind::Syntax(message.into()),
            span,
        });
    }

    fn end_of_line(&self) -> Range<usize> {
        self.end..self.end
    }

    /// Everything after a complete expression is a leftover, usually a
    /// stray `)`.
    fn expect_end(&mut self) {
        if let Some(token) = self.tokens.next() {
            let span = token.span.start..self.end;
            self.error(
                format!("unexpected {} '{}' after end of expression", token.kind, token.text),
                span,
            );
        }
    }
}

/// Parses a tokenized line into its tree. Any syntax problem is returned
/// instead of a partial tree.
pub fn parse_function(function: &Function) -> Result<Definition, Vec<LineError>> {
    let mut parser = Parser::new(function);
    let definition = parser.parse_definition(function.is_main);

    if parser.errors.is_empty() {
        Ok(definition)
    } else {
        Err(parser.errors)
    }
}
