use crate::ast::{Function, LineErrorKind};
use crate::error::{CompileError, CompileResult};

use log::debug;
use logos::Logos;

use std::fmt::{self, Display, Formatter};
use std::fs;
use std::ops::Range;
use std::path::Path;

#[cfg(test)]
pub mod test;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f]+")] // blanks between tokens carry no meaning
pub enum TokenKind {
    // identifiers are a single letter, `ab` is two variables
    #[regex(r"[a-z]")]
    Variable,

    #[regex(r"[0-9]+")]
    Constant,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    #[token(",")]
    Comma,

    #[token("+")]
    Add,

    #[token("-")]
    Subtract,

    #[token("*")]
    Multiply,

    #[token("/")]
    Divide,

    #[token("%")]
    Modulo,

    #[token("=")]
    Equals,
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Add
                | TokenKind::Subtract
                | TokenKind::Multiply
                | TokenKind::Divide
                | TokenKind::Modulo
        )
    }

    pub fn is_value(&self) -> bool {
        matches!(self, TokenKind::Variable | TokenKind::Constant)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Variable => "variable",
            TokenKind::Constant => "constant",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::Equals => "'='",
            _ => "operator",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Reads every file in order and turns each non-blank line into a
/// [`Function`]. A file that cannot be read or decoded stops everything;
/// bad characters only mark the line they appear on.
pub fn tokenize<P: AsRef<Path>>(files: &[P]) -> CompileResult<Vec<Function>> {
    let mut functions = vec![];

    for file in files {
        let path = file.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CompileError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let before = functions.len();
        functions.extend(tokenize_source(path, &contents));
        debug!(
            "tokenized {} function(s) from {}",
            functions.len() - before,
            path.display()
        );
    }

    Ok(functions)
}

pub fn tokenize_source(path: &Path, contents: &str) -> Vec<Function> {
    let mut functions = vec![];
    let mut offset = 0;

    for (index, raw) in contents.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw.len();

        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let leading = raw.len() - raw.trim_start().len();

        functions.push(tokenize_line(
            path,
            index + 1,
            line_start + leading,
            line,
        ));
    }

    functions
}

pub fn tokenize_line(path: &Path, line: usize, offset: usize, source: &str) -> Function {
    let mut function = Function::new(path.to_path_buf(), line, offset, source.to_string());

    for (token, span) in TokenKind::lexer(source).spanned() {
        let text = match source.get(span.clone()) {
            Some(text) => text.to_string(),
            None => String::from_utf8_lossy(&source.as_bytes()[span.clone()]).into_owned(),
        };

        match token {
            Ok(kind) => function.tokens.push(Token::new(kind, text, span)),
            Err(()) => function.push_error(LineErrorKind::UnrecognizedCharacter(text), span),
        }
    }

    function.is_main = function.count(TokenKind::Equals) == 0;
    if !function.is_main {
        if let Some(first) = function.tokens.first() {
            if first.kind == TokenKind::Variable {
                function.name = first.text.clone();
            }
        }
    }

    function
}
