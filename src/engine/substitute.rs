use log::trace;

use crate::config::MatchOptions;
use crate::document_model::Document;
use crate::pattern::{Limit, Pattern};

/// Run `rewrite` over each line. Each line gets at most the per-line cap,
/// and all lines together share the command's total budget.
pub(super) fn rewrite_lines<F>(
    document: Document,
    options: &MatchOptions,
    mut rewrite: F,
) -> Document
where
    F: FnMut(&str, Limit) -> (String, usize),
{
    let per_line = Limit::from_option(options.max_substitutions_per_line);
    let mut budget = Limit::from_option(options.max_substitutions);
    let mut total = 0;

    let lines: Vec<String> = document
        .lines()
        .iter()
        .map(|line| {
            let limit = per_line.min(budget);
            if limit.is_exhausted() {
                return line.clone();
            }
            let (rewritten, count) = rewrite(line, limit);
            budget.spend(count);
            total += count;
            rewritten
        })
        .collect();

    trace!("{total} rewrite(s) across {} line(s)", lines.len());
    document.with_lines(lines)
}

/// Run `rewrite` once over the whole buffer under the total budget.
pub(super) fn rewrite_buffer<F>(
    document: Document,
    options: &MatchOptions,
    mut rewrite: F,
) -> Document
where
    F: FnMut(&str, Limit) -> (String, usize),
{
    let budget = Limit::from_option(options.max_substitutions);
    if budget.is_exhausted() {
        return document;
    }

    let (rewritten, count) = rewrite(&document.to_text(), budget);
    trace!("{count} rewrite(s) in buffer");
    if count == 0 {
        return document;
    }
    document.with_text(&rewritten)
}

pub(super) fn filter_lines(
    document: Document,
    pattern: &Pattern,
    keep_matching: bool,
    whole_line: bool,
) -> Document {
    let matches = |line: &str| {
        if whole_line {
            pattern.is_full_match(line)
        } else {
            pattern.is_match(line)
        }
    };

    let kept: Vec<String> = document
        .lines()
        .iter()
        .filter(|line| matches(line) == keep_matching)
        .cloned()
        .collect();

    trace!("kept {} of {} line(s)", kept.len(), document.line_count());
    document.with_lines(kept)
}

/// Replace each line with its matched text, dropping lines without a match.
pub(super) fn extract_lines(document: Document, pattern: &Pattern) -> Document {
    let extracted: Vec<String> = document
        .lines()
        .iter()
        .filter_map(|line| pattern.extract(line))
        .collect();
    document.with_lines(extracted)
}

/// Reduce the buffer to its matched text.
pub(super) fn extract_buffer(document: Document, pattern: &Pattern) -> Document {
    let extracted = pattern.extract(&document.to_text()).unwrap_or_default();
    document.with_text(&extracted)
}
