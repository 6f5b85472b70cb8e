use super::*;
use crate::ast::LineErrorKind;

use std::path::PathBuf;

fn kinds(function: &Function) -> Vec<(TokenKind, &str)> {
    function
        .tokens
        .iter()
        .map(|t| (t.kind, t.text.as_str()))
        .collect()
}

fn line(source: &str) -> Function {
    tokenize_line(Path::new("test.lwl"), 1, 0, source)
}

#[test]
fn test_function_declaration() {
    let function = line("f(x,y)=x+y");

    assert_eq!(
        kinds(&function),
        vec![
            (TokenKind::Variable, "f"),
            (TokenKind::LeftParen, "("),
            (TokenKind::Variable, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Variable, "y"),
            (TokenKind::RightParen, ")"),
            (TokenKind::Equals, "="),
            (TokenKind::Variable, "x"),
            (TokenKind::Add, "+"),
            (TokenKind::Variable, "y"),
        ]
    );
    assert_eq!(function.name, "f");
    assert!(!function.is_main);
    assert!(function.errors.is_empty());
}

#[test]
fn test_main_addition() {
    let function = line("1+3+1");

    assert_eq!(
        kinds(&function),
        vec![
            (TokenKind::Constant, "1"),
            (TokenKind::Add, "+"),
            (TokenKind::Constant, "3"),
            (TokenKind::Add, "+"),
            (TokenKind::Constant, "1"),
        ]
    );
    assert!(function.is_main);
    assert_eq!(function.name, "");
}

#[test]
fn test_multi_digit_constants() {
    let function = line("12*345-6");

    assert_eq!(
        kinds(&function),
        vec![
            (TokenKind::Constant, "12"),
            (TokenKind::Multiply, "*"),
            (TokenKind::Constant, "345"),
            (TokenKind::Subtract, "-"),
            (TokenKind::Constant, "6"),
        ]
    );
    assert_eq!(function.tokens[2].span, 3..6);
}

#[test]
fn test_single_letter_identifiers() {
    let function = line("ab");

    assert_eq!(
        kinds(&function),
        vec![(TokenKind::Variable, "a"), (TokenKind::Variable, "b")]
    );
}

#[test]
fn test_blanks_are_skipped() {
    let function = line("f ( x ) = x % 2");

    assert_eq!(function.tokens.len(), 8);
    assert_eq!(function.tokens[7].kind, TokenKind::Constant);
    assert!(function.errors.is_empty());
}

#[test]
fn test_unrecognized_character_recovery() {
    let function = line("1+@2/X");

    assert_eq!(
        kinds(&function),
        vec![
            (TokenKind::Constant, "1"),
            (TokenKind::Add, "+"),
            (TokenKind::Constant, "2"),
            (TokenKind::Divide, "/"),
        ]
    );
    assert_eq!(function.errors.len(), 2);
    assert_eq!(
        function.errors[0].kind,
        LineErrorKind::UnrecognizedCharacter("@".to_string())
    );
    assert_eq!(function.errors[0].span, 2..3);
    assert_eq!(
        function.errors[1].kind,
        LineErrorKind::UnrecognizedCharacter("X".to_string())
    );
}

#[test]
fn test_name_requires_leading_variable() {
    let function = line("1(x)=x");

    assert!(!function.is_main);
    assert_eq!(function.name, "");
}

#[test]
fn test_tokenize_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("a.lwl");
    let second = dir.path().join("b.lwl");
    fs::write(&first, "f(x)=x\n\n   g(y)=y+1\n").unwrap();
    fs::write(&second, "f(1)\r\n").unwrap();

    let functions = tokenize(&[&first, &second]).unwrap();

    assert_eq!(functions.len(), 3);
    assert_eq!(functions[0].name, "f");
    assert_eq!(functions[0].line, 1);
    assert_eq!(functions[0].file, first);

    assert_eq!(functions[1].name, "g");
    assert_eq!(functions[1].line, 3);
    assert_eq!(functions[1].source, "g(y)=y+1");
    assert_eq!(functions[1].offset, 11);

    assert!(functions[2].is_main);
    assert_eq!(functions[2].file, second);
    assert_eq!(functions[2].source, "f(1)");
    assert!(functions[2].errors.is_empty());
}

#[test]
fn test_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.lwl");
    fs::write(&path, "").unwrap();

    let functions = tokenize(&[path]).unwrap();
    assert!(functions.is_empty());
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let present = dir.path().join("present.lwl");
    fs::write(&present, "1+1\n").unwrap();
    let missing = dir.path().join("missing.lwl");

    let result = tokenize(&[present, missing.clone()]);

    match result {
        Err(CompileError::Read { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected a read error, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.lwl");
    fs::write(&path, [0x31, 0xff, 0xfe, 0x0a]).unwrap();

    assert!(matches!(
        tokenize(&[PathBuf::from(&path)]),
        Err(CompileError::Read { .. })
    ));
}
