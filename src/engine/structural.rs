use std::ops::Range;

use crate::command::Scope;
use crate::document_model::Document;
use crate::index::{resolve_insert, resolve_span};

// Line scope works in whole lines, file scope in characters of the buffer.

pub(super) fn append(document: Document, scope: Scope, text: &str) -> Document {
    match scope {
        Scope::Line => {
            let mut lines = document.lines().to_vec();
            lines.push(text.to_string());
            document.with_lines(lines)
        }
        Scope::File => {
            let mut buffer = document.to_text();
            buffer.push_str(text);
            document.with_text(&buffer)
        }
    }
}

pub(super) fn prepend(document: Document, scope: Scope, text: &str) -> Document {
    match scope {
        Scope::Line => {
            let mut lines = Vec::with_capacity(document.line_count() + 1);
            lines.push(text.to_string());
            lines.extend_from_slice(document.lines());
            document.with_lines(lines)
        }
        Scope::File => {
            let mut buffer = text.to_string();
            buffer.push_str(&document.to_text());
            document.with_text(&buffer)
        }
    }
}

pub(super) fn insert(document: Document, scope: Scope, index: i64, text: &str) -> Document {
    match scope {
        Scope::Line => {
            let at = resolve_insert(document.line_count(), index);
            splice_lines(document, at..at, Some(text))
        }
        Scope::File => {
            let buffer = document.to_text();
            let at = resolve_insert(buffer.chars().count(), index);
            splice_chars(&document, &buffer, at..at, text)
        }
    }
}

pub(super) fn replace(
    document: Document,
    scope: Scope,
    index: i64,
    count: i64,
    text: &str,
) -> Document {
    match scope {
        Scope::Line => {
            let span = resolve_span(document.line_count(), index, count);
            splice_lines(document, span, Some(text))
        }
        Scope::File => {
            let buffer = document.to_text();
            let span = resolve_span(buffer.chars().count(), index, count);
            splice_chars(&document, &buffer, span, text)
        }
    }
}

pub(super) fn delete(document: Document, scope: Scope, index: i64, count: i64) -> Document {
    match scope {
        Scope::Line => {
            let span = resolve_span(document.line_count(), index, count);
            splice_lines(document, span, None)
        }
        Scope::File => {
            let buffer = document.to_text();
            let span = resolve_span(buffer.chars().count(), index, count);
            splice_chars(&document, &buffer, span, "")
        }
    }
}

fn splice_lines(document: Document, span: Range<usize>, text: Option<&str>) -> Document {
    let mut lines = document.lines().to_vec();
    lines.splice(span, text.map(str::to_string));
    document.with_lines(lines)
}

/// Replace the characters in `span` of `buffer` with `text`.
fn splice_chars(document: &Document, buffer: &str, span: Range<usize>, text: &str) -> Document {
    let start = byte_offset(buffer, span.start);
    let end = byte_offset(buffer, span.end);

    let mut spliced = String::with_capacity(buffer.len() - (end - start) + text.len());
    spliced.push_str(&buffer[..start]);
    spliced.push_str(text);
    spliced.push_str(&buffer[end..]);
    document.with_text(&spliced)
}

/// Byte offset of the `chars`-th character, or the end of `text`.
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices().nth(chars).map_or(text.len(), |(offset, _)| offset)
}
