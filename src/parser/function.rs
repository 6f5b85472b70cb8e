use crate::ast::{Definition, Expr};
use crate::lexer::TokenKind;
use crate::parser::Parser;

use std::ops::Range;

impl Parser<'_> {
    /// A declaration is `name [ '(' var (',' var)* ')' ] '=' expression`,
    /// the main line is just the expression.
    pub fn parse_definition(&mut self, is_main: bool) -> Definition {
        if is_main {
            let body = self.parse_expression();
            if self.errors.is_empty() {
                self.expect_end();
            }
            return Definition {
                name: String::new(),
                params: vec![],
                body,
                is_main,
            };
        }

        let name = match self.tokens.next() {
            Some(token) if token.kind == TokenKind::Variable => token.text.clone(),
            Some(token) => {
                self.error(
                    format!("expected a function name, found {}", token.kind),
                    token.span.clone(),
                );
                return abandoned(String::new(), vec![]);
            }
            None => {
                let span = self.end_of_line();
                self.error("expected a function name but reached end of line", span);
                return abandoned(String::new(), vec![]);
            }
        };

        let mut params: Vec<(String, Range<usize>)> = vec![];
        if self.peek_kind() == Some(TokenKind::LeftParen) {
            self.tokens.next();
            loop {
                match self.tokens.next() {
                    Some(token) if token.kind == TokenKind::Variable => {
                        if params.iter().any(|(param, _)| *param == token.text) {
                            self.error(
                                format!("parameter {} declared twice in {}", token.text, name),
                                token.span.clone(),
                            );
                        }
                        params.push((token.text.clone(), token.span.clone()));
                    }
                    Some(token) => {
                        self.error(
                            format!("expected a parameter name, found {}", token.kind),
                            token.span.clone(),
                        );
                        return abandoned(name, params);
                    }
                    None => {
                        let span = self.end_of_line();
                        self.error("expected a parameter name but reached end of line", span);
                        return abandoned(name, params);
                    }
                }

                match self.tokens.next() {
                    Some(token) if token.kind == TokenKind::Comma => continue,
                    Some(token) if token.kind == TokenKind::RightParen => break,
                    Some(token) => {
                        self.error(
                            format!("expected ',' or ')' after a parameter, found {}", token.kind),
                            token.span.clone(),
                        );
                        return abandoned(name, params);
                    }
                    None => {
                        let span = self.end_of_line();
                        self.error(
                            format!("unclosed parameter list of {}", name),
                            span,
                        );
                        return abandoned(name, params);
                    }
                }
            }
        }

        match self.tokens.next() {
            Some(token) if token.kind == TokenKind::Equals => {}
            Some(token) => {
                self.error(
                    format!("expected '=' after the header of {}, found {}", name, token.kind),
                    token.span.clone(),
                );
                return abandoned(name, params);
            }
            None => {
                let span = self.end_of_line();
                self.error(format!("expected '=' after the header of {}", name), span);
                return abandoned(name, params);
            }
        }

        let body = self.parse_expression();
        if self.errors.is_empty() {
            self.expect_end();
        }

        Definition {
            name,
            params,
            body,
            is_main,
        }
    }
}

fn abandoned(name: String, params: Vec<(String, Range<usize>)>) -> Definition {
    Definition {
        name,
        params,
        body: (Expr::Error, 0..0),
        is_main: false,
    }
}
