use crate::lexer::{Token, TokenKind};

use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::path::PathBuf;

/// One non-blank source line: either a declaration `name(params)=expr`
/// or the main expression line (the one without `=`).
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub file: PathBuf,
    pub line: usize,
    /// Byte offset of `source` inside `file`.
    pub offset: usize,
    pub source: String,
    pub tokens: Vec<Token>,
    pub is_main: bool,
    pub errors: Vec<LineError>,
}

impl Function {
    pub fn new(file: PathBuf, line: usize, offset: usize, source: String) -> Self {
        Function {
            name: String::new(),
            file,
            line,
            offset,
            source,
            tokens: vec![],
            is_main: true,
            errors: vec![],
        }
    }

    /// `file:line`, the prefix every message about this line carries.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }

    pub fn push_error(&mut self, kind: LineErrorKind, span: Range<usize>) {
        self.errors.push(LineError { kind, span });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        self.tokens.iter().filter(|t| t.kind == kind).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineError {
    pub kind: LineErrorKind,
    /// Byte range inside the function's source line.
    pub span: Range<usize>,
}

impl Display for LineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineErrorKind {
    #[error("unrecognized character '{0}'")]
    UnrecognizedCharacter(String),

    #[error("function {0} already defined")]
    AlreadyDefined(String),

    #[error("function {0} has no '='")]
    MissingEquals(String),

    #[error("function {0} has multiple '='")]
    MultipleEquals(String),

    #[error("main function must start with a variable or constant")]
    InvalidMainStart,

    #[error("undefined variable {0}")]
    UndefinedVariable(String),

    #[error("unexpected {found} after {after}")]
    Unexpected { found: String, after: String },

    #[error("constant {0} does not fit in 64 bits")]
    ConstantOutOfRange(String),

    #[error("{0}")]
    Syntax(String),
}

impl LineErrorKind {
    /// Short code shown in rendered diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            LineErrorKind::UnrecognizedCharacter(_) => "Lexical Error",
            LineErrorKind::AlreadyDefined(_) => "Duplicate Function",
            LineErrorKind::UndefinedVariable(_) => "Scope Error",
            _ => "Syntax Error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Add => Some(BinaryOperator::Add),
            TokenKind::Subtract => Some(BinaryOperator::Subtract),
            TokenKind::Multiply => Some(BinaryOperator::Multiply),
            TokenKind::Divide => Some(BinaryOperator::Divide),
            TokenKind::Modulo => Some(BinaryOperator::Modulo),
            _ => None,
        }
    }

    pub fn binds_tight(&self) -> bool {
        matches!(
            self,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Constant(i64),
    Variable(String),
    BinaryOp {
        operator: BinaryOperator,
        l_value: Box<(Expr, Range<usize>)>,
        r_value: Box<(Expr, Range<usize>)>,
    },
    Call {
        name: String,
        args: Vec<(Expr, Range<usize>)>,
    },

    Error, // dummy node for error recovery
}

/// The parsed form of a [`Function`].
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub params: Vec<(String, Range<usize>)>,
    pub body: (Expr, Range<usize>),
    pub is_main: bool,
}
