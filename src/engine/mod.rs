/// Execution engine - folds parsed commands over a document
///
/// Every command maps one `Document` to the next. Nothing here can fail:
/// errors were all raised while parsing, and index problems are clamped.

mod structural;
mod substitute;

use log::debug;

use crate::command::{Command, Operation, Scope};
use crate::config::MatchOptions;
use crate::document_model::Document;

/// Apply `commands` in order, each to the previous command's output.
pub fn run(document: Document, commands: &[Command], options: &MatchOptions) -> Document {
    commands
        .iter()
        .fold(document, |document, command| apply(document, command, options))
}

/// Apply a single command.
pub fn apply(document: Document, command: &Command, options: &MatchOptions) -> Document {
    debug!(
        "applying '{}' ({:?} scope) to {} line(s)",
        command.opcode,
        command.scope,
        document.line_count()
    );

    match (&command.operation, command.scope) {
        (Operation::Substitute { pattern, replacement }, Scope::Line) => {
            substitute::rewrite_lines(document, options, |line, limit| {
                pattern.substitute(line, replacement, limit)
            })
        }
        (Operation::Substitute { pattern, replacement }, Scope::File) => {
            substitute::rewrite_buffer(document, options, |text, limit| {
                pattern.substitute(text, replacement, limit)
            })
        }
        (Operation::ChangeCase { pattern, transform }, Scope::Line) => {
            substitute::rewrite_lines(document, options, |line, limit| {
                pattern.map_matches(line, limit, |m| transform.apply(m))
            })
        }
        (Operation::ChangeCase { pattern, transform }, Scope::File) => {
            substitute::rewrite_buffer(document, options, |text, limit| {
                pattern.map_matches(text, limit, |m| transform.apply(m))
            })
        }
        (
            Operation::Filter {
                pattern,
                keep_matching,
                whole_line,
            },
            _,
        ) => substitute::filter_lines(document, pattern, *keep_matching, *whole_line),
        (Operation::Extract { pattern }, Scope::Line) => {
            substitute::extract_lines(document, pattern)
        }
        (Operation::Extract { pattern }, Scope::File) => {
            substitute::extract_buffer(document, pattern)
        }
        (Operation::Append { text }, scope) => structural::append(document, scope, text),
        (Operation::Prepend { text }, scope) => structural::prepend(document, scope, text),
        (Operation::Insert { index, text }, scope) => {
            structural::insert(document, scope, *index, text)
        }
        (Operation::Replace { index, count, text }, scope) => {
            structural::replace(document, scope, *index, *count, text)
        }
        (Operation::Delete { index, count }, scope) => {
            structural::delete(document, scope, *index, *count)
        }
    }
}
