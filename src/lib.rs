#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Ast,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::{type_check, CheckOptions},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A byte offset into a named source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn null() -> Self {
        Span {
            start: Position::null(),
            end: Position::null(),
        }
    }

    /// The span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// Runs the whole front end over `source`: tokenize, parse, check.
pub fn compile_source(source: &str, file: &str, options: CheckOptions) -> Result<Ast, Error> {
    let tokens = tokenize(source, Some(String::from(file)))?;
    let ast = parse(tokens, Rc::new(String::from(file)))?;
    type_check(ast, options)
}

/// Finds the line containing the byte offset `position`.
///
/// Returns the 1-based line number, the line text (without its newline) and
/// the column of `position` inside that line. Offsets at or past the end of
/// the source resolve to the last line.
pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut last = None;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.trim_end_matches(['\n', '\r']).to_string(), pos - start));
        }

        last = Some((index + 1, line.trim_end_matches(['\n', '\r']).to_string()));
        start = end;
    }

    last.map(|(line_number, text)| {
        let column = text.len();
        (line_number, text, column)
    })
}


/// Renders an error against the source it was produced from.
///
/// ```text
/// Error: TypeMismatch (Expected type `int`, received `float`)
/// -> final.pl0
///    |
/// 20 | d := a + b
///    | -----^
/// ```
pub fn render_error(error: &Error, source: &str) -> String {
    let position = error.get_position();
    let mut report = String::new();

    if let ErrorTip::None = error.get_tip() {
        report.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        report.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    report.push_str(&format!("-> {}\n", position.1));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.0) else {
        return report;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    report.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    report.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    report.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    report
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
