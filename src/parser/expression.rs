use crate::ast::{BinaryOperator, Expr, LineError, LineErrorKind};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

use std::ops::Range;

impl<'a> Parser<'a> {
    /// `term (('+' | '-') term)*`
    pub fn parse_expression(&mut self) -> (Expr, Range<usize>) {
        let mut l_expr = self.parse_term();

        loop {
            let Some(operator) = self.peek_kind().and_then(BinaryOperator::from_token) else {
                return l_expr;
            };
            if operator.binds_tight() {
                return l_expr;
            }
            self.tokens.next();

            let r_expr = self.parse_term();
            let span = l_expr.1.start..r_expr.1.end;
            l_expr = (
                Expr::BinaryOp {
                    operator,
                    l_value: Box::new(l_expr),
                    r_value: Box::new(r_expr),
                },
                span,
            );
        }
    }

    /// `atom (('*' | '/' | '%') atom)*`
    fn parse_term(&mut self) -> (Expr, Range<usize>) {
        let mut l_expr = self.parse_atom();

        loop {
            let Some(operator) = self.peek_kind().and_then(BinaryOperator::from_token) else {
                return l_expr;
            };
            if !operator.binds_tight() {
                return l_expr;
            }
            self.tokens.next();

            let r_expr = self.parse_atom();
            let span = l_expr.1.start..r_expr.1.end;
            l_expr = (
                Expr::BinaryOp {
                    operator,
                    l_value: Box::new(l_expr),
                    r_value: Box::new(r_expr),
                },
                span,
            );
        }
    }

    fn parse_atom(&mut self) -> (Expr, Range<usize>) {
        let Some(token) = self.tokens.next() else {
            let span = self.end_of_line();
            self.error(
                "expected a variable or constant but reached end of line",
                span.clone(),
            );
            return (Expr::Error, span);
        };

        match token.kind {
            TokenKind::Constant => match token.text.parse::<i64>() {
                Ok(value) => (Expr::Constant(value), token.span.clone()),
                Err(_) => {
                    self.errors.push(LineError {
                        kind: LineErrorKind::ConstantOutOfRange(token.text.clone()),
                        span: token.span.clone(),
                    });
                    (Expr::Error, token.span.clone())
                }
            },
            TokenKind::Variable => {
                if self.peek_kind() == Some(TokenKind::LeftParen) {
                    return self.parse_call(token);
                }
                (Expr::Variable(token.text.clone()), token.span.clone())
            }
            other => {
                self.error(
                    format!("expected a variable or constant, found {}", other),
                    token.span.clone(),
                );
                (Expr::Error, token.span.clone())
            }
        }
    }

    fn parse_call(&mut self, callee: &'a Token) -> (Expr, Range<usize>) {
        // '(' was peeked by the caller
        self.tokens.next();

        let mut args = vec![];
        loop {
            args.push(self.parse_expression());

            let Some(token) = self.tokens.next() else {
                let span = callee.span.start..self.end;
                self.error(
                    format!(
                        "unclosed call to {}, expected ')' but reached end of line",
                        callee.text
                    ),
                    span.clone(),
                );
                return (Expr::Error, span);
            };

            match token.kind {
                TokenKind::Comma => continue,
                TokenKind::RightParen => {
                    return (
                        Expr::Call {
                            name: callee.text.clone(),
                            args,
                        },
                        callee.span.start..token.span.end,
                    );
                }
                other => {
                    self.error(
                        format!(
                            "expected ',' or ')' in call to {}, found {}",
                            callee.text, other
                        ),
                        token.span.clone(),
                    );
                    return (Expr::Error, token.span.clone());
                }
            }
        }
    }
}
