use std::borrow::Cow;
use std::fmt;

use log::trace;
use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

use crate::config::MatchOptions;

/// A compiled command pattern.
///
/// Holds the substring matcher used by most opcodes together with an
/// anchored twin used where the whole line has to match (`G`/`X`).
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
    full: Regex,
    literal_replacement: bool,
}

#[derive(Debug, Clone, Error)]
pub enum PatternError {
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// How many rewrites a single replacement pass may still perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unbounded,
    AtMost(usize),
}

impl Limit {
    pub fn from_option(limit: Option<usize>) -> Self {
        limit.map_or(Limit::Unbounded, Limit::AtMost)
    }

    /// The tighter of two limits.
    pub fn min(self, other: Limit) -> Limit {
        match (self, other) {
            (Limit::Unbounded, other) => other,
            (this, Limit::Unbounded) => this,
            (Limit::AtMost(a), Limit::AtMost(b)) => Limit::AtMost(a.min(b)),
        }
    }

    pub fn is_exhausted(self) -> bool {
        self == Limit::AtMost(0)
    }

    /// Consume `used` rewrites from the budget.
    pub fn spend(&mut self, used: usize) {
        if let Limit::AtMost(left) = self {
            *left = left.saturating_sub(used);
        }
    }

    fn allows(self, done: usize) -> bool {
        match self {
            Limit::Unbounded => true,
            Limit::AtMost(n) => done < n,
        }
    }
}

/// Compile `text` under the run's matching options.
pub fn compile_pattern(text: &str, options: &MatchOptions) -> Result<Pattern, PatternError> {
    compile_with(text, options, options.fixed_string)
}

/// Compile `text` as literal text whatever the options say. Used by the
/// explicit literal-substitute opcode.
pub fn compile_literal(text: &str, options: &MatchOptions) -> Result<Pattern, PatternError> {
    compile_with(text, options, true)
}

fn compile_with(text: &str, options: &MatchOptions, literal: bool) -> Result<Pattern, PatternError> {
    let body: Cow<'_, str> = if literal {
        Cow::Owned(regex::escape(text))
    } else if options.ascii_classes {
        Cow::Owned(ascii_classes(text))
    } else {
        Cow::Borrowed(text)
    };

    let regex = build(&body, options).map_err(|e| invalid(text, e))?;
    let full = build(&format!(r"\A(?:{body})\z"), options).map_err(|e| invalid(text, e))?;
    trace!("compiled pattern {text:?} as {body:?}");

    Ok(Pattern {
        source: text.to_string(),
        regex,
        full,
        literal_replacement: literal,
    })
}

fn build(body: &str, options: &MatchOptions) -> Result<Regex, regex::Error> {
    RegexBuilder::new(body)
        .case_insensitive(options.ignore_case)
        .dot_matches_new_line(options.dot_matches_newline)
        .multi_line(options.line_anchored_multiline)
        .build()
}

fn invalid(pattern: &str, error: regex::Error) -> PatternError {
    PatternError::InvalidPattern {
        pattern: pattern.to_string(),
        message: error.to_string(),
    }
}

/// Rewrite the Perl character classes of `pattern` to their ASCII-only
/// forms. The POSIX bracket forms are valid both inside and outside a
/// bracket expression, so no class tracking is needed.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('w') => out.push_str("[[:word:]]"),
            Some('W') => out.push_str("[^[:word:]]"),
            Some('s') => out.push_str("[[:space:]]"),
            Some('S') => out.push_str("[^[:space:]]"),
            Some('d') => out.push_str("[[:digit:]]"),
            Some('D') => out.push_str("[^[:digit:]]"),
            Some('b') => out.push_str(r"(?-u:\b)"),
            Some('B') => out.push_str(r"(?-u:\B)"),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the pattern matches anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// True if the pattern matches all of `text`.
    pub fn is_full_match(&self, text: &str) -> bool {
        self.full.is_match(text)
    }

    /// Concatenation of every match in `text`, or `None` when nothing matches.
    pub fn extract(&self, text: &str) -> Option<String> {
        let mut found = None::<String>;
        for m in self.regex.find_iter(text) {
            found.get_or_insert_with(String::new).push_str(m.as_str());
        }
        found
    }

    /// Replace matches in `text` with `replacement`, expanding capture
    /// group references unless the pattern is literal. Returns the new text
    /// and the number of rewrites made.
    pub fn substitute(&self, text: &str, replacement: &str, limit: Limit) -> (String, usize) {
        if self.literal_replacement {
            self.rewrite(text, limit, |_, out| out.push_str(replacement))
        } else {
            self.rewrite(text, limit, |caps, out| caps.expand(replacement, out))
        }
    }

    /// Replace matches in `text` with `transform` applied to the matched text.
    pub fn map_matches<F>(&self, text: &str, limit: Limit, transform: F) -> (String, usize)
    where
        F: Fn(&str) -> String,
    {
        self.rewrite(text, limit, |caps, out| out.push_str(&transform(&caps[0])))
    }

    fn rewrite<F>(&self, text: &str, limit: Limit, mut emit: F) -> (String, usize)
    where
        F: FnMut(&Captures<'_>, &mut String),
    {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        let mut count = 0;

        for caps in self.regex.captures_iter(text) {
            if !limit.allows(count) {
                break;
            }
            let Some(m) = caps.get(0) else { continue };
            out.push_str(&text[last..m.start()]);
            emit(&caps, &mut out);
            last = m.end();
            count += 1;
        }

        if count == 0 {
            return (text.to_string(), 0);
        }
        out.push_str(&text[last..]);
        (out, count)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
