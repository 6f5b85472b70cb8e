use crate::ast::{Function, LineError, LineErrorKind};

use ariadne::{Color, ColorGenerator, Config, Fmt, IndexType, Label, Report, ReportKind, Source};

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::PathBuf;


pub fn function_syntax() -> String {
    format!(
        "\
        a declaration is {}({}, {}, ...)={}
        the one line without '=' is the main expression",
        Fmt::fg("f", Color::Yellow),
        Fmt::fg("a", Color::Rgb(150, 200, 100)),
        Fmt::fg("b", Color::Rgb(150, 200, 100)),
        Fmt::fg("expression", Color::Rgb(205, 150, 100)),
    )
}

/// One report for one error, with spans shifted from the line to the file.
/// Spans are byte offsets, as logos produces them.
pub fn build_report(
    function: &Function,
    err: &LineError,
    color: bool,
) -> Report<'static, (String, Range<usize>)> {
    let file = function.file.display().to_string();
    let span = function.offset + err.span.start..function.offset + err.span.end;

    let mut report = Report::build(ReportKind::Error, (file.clone(), span.clone()))
        .with_config(
            Config::default()
                .with_color(color)
                .with_index_type(IndexType::Byte),
        )
        .with_code(err.kind.code())
        .with_message(format!("{}: {}", function.location(), err))
        .with_label(
            Label::new((file, span))
                .with_message(label_message(&err.kind))
                .with_color(ColorGenerator::new().next()),
        );

    if matches!(
        err.kind,
        LineErrorKind::Unexpected { .. } | LineErrorKind::Syntax(_)
    ) {
        report = report.with_note(function_syntax());
    }

    report.finish()
}

fn label_message(kind: &LineErrorKind) -> String {
    match kind {
        LineErrorKind::UnrecognizedCharacter(_) => {
            "only a-z, 0-9 and ( ) , + - * / % = are allowed".to_string()
        }
        LineErrorKind::AlreadyDefined(name) => format!("{} was declared before", name),
        LineErrorKind::UndefinedVariable(name) => {
            format!("{} is neither a parameter nor a function", name)
        }
        other => other.to_string(),
    }
}

/// Prints every collected error to stderr. Source files are read again so
/// the reports can show the surrounding line.
pub fn report_errors(functions: &[Function]) -> io::Result<bool> {
    let mut sources: HashMap<PathBuf, Source<String>> = HashMap::new();
    let mut failed = false;

    for function in functions.iter().filter(|f| f.has_errors()) {
        let source = match sources.entry(function.file.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                entry.insert(Source::from(fs::read_to_string(&function.file)?))
            }
        };

        for err in &function.errors {
            failed = true;
            build_report(function, err, true)
                .eprint((function.file.display().to_string(), source.clone()))?;
        }
    }

    Ok(failed)
}
