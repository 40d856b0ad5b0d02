use log::debug;

use crate::case::CaseTransform;
use crate::config::MatchOptions;
use crate::error::PedError;
use crate::pattern::{Pattern, PatternError, compile_literal, compile_pattern};

/// Whether a command works on each line on its own or on the whole text as
/// one buffer. For the structural opcodes the same split selects between
/// line and character units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Line,
    File,
}

/// One parsed script command. Patterns are already compiled.
#[derive(Debug, Clone)]
pub struct Command {
    pub opcode: char,
    pub scope: Scope,
    pub operation: Operation,
}

#[derive(Debug, Clone)]
pub enum Operation {
    // s S f r R
    Substitute {
        pattern: Pattern,
        replacement: String,
    },
    // g x G X
    Filter {
        pattern: Pattern,
        keep_matching: bool,
        whole_line: bool,
    },
    // o O
    Extract {
        pattern: Pattern,
    },
    // u U l L t T c C
    ChangeCase {
        pattern: Pattern,
        transform: CaseTransform,
    },
    // a A
    Append {
        text: String,
    },
    // p P
    Prepend {
        text: String,
    },
    // i I
    Insert {
        index: i64,
        text: String,
    },
    // y Y
    Replace {
        index: i64,
        count: i64,
        text: String,
    },
    // d D
    Delete {
        index: i64,
        count: i64,
    },
}

/// Parse every command of a script. Nothing is returned unless all of them
/// parse and compile.
pub fn parse_script<S>(raw: &[S], options: &MatchOptions) -> Result<Vec<Command>, PedError>
where
    S: AsRef<str>,
{
    raw.iter()
        .map(|command| parse_command(command.as_ref(), options))
        .collect()
}

/// Parse `<opcode><delim><field><delim><field>...[<delim>]`.
///
/// The character after the opcode is the field delimiter for this command
/// only. Fields past the ones an opcode needs are ignored, which is what
/// makes a trailing delimiter optional.
pub fn parse_command(raw: &str, options: &MatchOptions) -> Result<Command, PedError> {
    let mut chars = raw.chars();
    let opcode = chars.next().ok_or(PedError::EmptyCommand)?;
    let fields = Fields::split(raw, chars.as_str());

    let scope = if opcode.is_ascii_uppercase() {
        Scope::File
    } else {
        Scope::Line
    };

    let operation = match opcode {
        's' | 'S' => Operation::Substitute {
            pattern: fields.pattern(0, options)?,
            replacement: fields.text(1, "replacement")?,
        },
        'f' => Operation::Substitute {
            pattern: fields.literal(0, options)?,
            replacement: fields.text(1, "replacement")?,
        },
        'r' | 'R' => Operation::Substitute {
            pattern: fields.pattern(0, options)?,
            replacement: String::new(),
        },
        'g' | 'x' | 'G' | 'X' => Operation::Filter {
            pattern: fields.pattern(0, options)?,
            keep_matching: matches!(opcode, 'g' | 'G'),
            whole_line: opcode.is_ascii_uppercase(),
        },
        'o' | 'O' => Operation::Extract {
            pattern: fields.pattern(0, options)?,
        },
        'u' | 'U' | 'l' | 'L' | 't' | 'T' | 'c' | 'C' => Operation::ChangeCase {
            pattern: fields.pattern(0, options)?,
            transform: match opcode.to_ascii_lowercase() {
                'u' => CaseTransform::Upper,
                'l' => CaseTransform::Lower,
                't' => CaseTransform::Title,
                _ => CaseTransform::Capitalize,
            },
        },
        'a' | 'A' => Operation::Append {
            text: fields.text(0, "text")?,
        },
        'p' | 'P' => Operation::Prepend {
            text: fields.text(0, "text")?,
        },
        'i' | 'I' => Operation::Insert {
            index: fields.number(0, "index")?,
            text: fields.text(1, "text")?,
        },
        'y' | 'Y' => Operation::Replace {
            index: fields.number(0, "index")?,
            count: fields.number(1, "count")?,
            text: fields.text(2, "text")?,
        },
        'd' | 'D' => Operation::Delete {
            index: fields.number(0, "index")?,
            count: fields.number(1, "count")?,
        },
        _ => {
            return Err(PedError::UnknownOpcode {
                command: raw.to_string(),
                opcode,
            });
        }
    };

    // The filter family uses case for match style, not scope.
    let scope = match operation {
        Operation::Filter { .. } => Scope::Line,
        _ => scope,
    };

    debug!("parsed {raw:?} as opcode '{opcode}' ({scope:?} scope)");
    Ok(Command {
        opcode,
        scope,
        operation,
    })
}

/// The delimited fields of one command, kept alongside the raw command for
/// error reporting.
struct Fields<'a> {
    raw: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(raw: &'a str, rest: &'a str) -> Self {
        let mut chars = rest.chars();
        let fields = match chars.next() {
            Some(delimiter) => chars.as_str().split(delimiter).collect(),
            None => Vec::new(),
        };
        Self { raw, fields }
    }

    fn get(&self, index: usize, name: &'static str) -> Result<&'a str, PedError> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| PedError::MissingField {
                command: self.raw.to_string(),
                field: name,
            })
    }

    fn text(&self, index: usize, name: &'static str) -> Result<String, PedError> {
        self.get(index, name).map(str::to_string)
    }

    fn number(&self, index: usize, name: &'static str) -> Result<i64, PedError> {
        let value = self.get(index, name)?;
        value
            .trim()
            .parse::<i64>()
            .map_err(|_| PedError::InvalidNumber {
                command: self.raw.to_string(),
                field: name,
                value: value.to_string(),
            })
    }

    fn pattern(&self, index: usize, options: &MatchOptions) -> Result<Pattern, PedError> {
        let text = self.get(index, "pattern")?;
        compile_pattern(text, options).map_err(|source| self.pattern_error(source))
    }

    fn literal(&self, index: usize, options: &MatchOptions) -> Result<Pattern, PedError> {
        let text = self.get(index, "pattern")?;
        compile_literal(text, options).map_err(|source| self.pattern_error(source))
    }

    fn pattern_error(&self, source: PatternError) -> PedError {
        PedError::Pattern {
            command: self.raw.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(raw: &str) -> Result<Command, PedError> {
        parse_command(raw, &MatchOptions::default())
    }

    #[test]
    fn test_substitute_fields() {
        let command = parse("s/c/C/").unwrap();
        assert_eq!(command.opcode, 's');
        assert_eq!(command.scope, Scope::Line);
        match command.operation {
            Operation::Substitute { pattern, replacement } => {
                assert_eq!(pattern.as_str(), "c");
                assert_eq!(replacement, "C");
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_trailing_delimiter_is_optional() {
        for raw in ["S/this/that", "S/this/that/"] {
            let command = parse(raw).unwrap();
            assert_eq!(command.scope, Scope::File);
            match command.operation {
                Operation::Substitute { replacement, .. } => assert_eq!(replacement, "that"),
                other => panic!("unexpected operation {other:?}"),
            }
        }
    }

    #[test]
    fn test_empty_replacement() {
        match parse("s/a/").unwrap().operation {
            Operation::Substitute { replacement, .. } => assert_eq!(replacement, ""),
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_any_delimiter() {
        match parse("S:this:------").unwrap().operation {
            Operation::Substitute { pattern, replacement } => {
                assert_eq!(pattern.as_str(), "this");
                assert_eq!(replacement, "------");
            }
            other => panic!("unexpected operation {other:?}"),
        }

        // The delimiter may be a regular field character elsewhere.
        match parse("i,1,a/b").unwrap().operation {
            Operation::Insert { index, text } => {
                assert_eq!(index, 1);
                assert_eq!(text, "a/b");
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_remove_is_substitute_with_empty_replacement() {
        let command = parse("R/x+").unwrap();
        assert_eq!(command.scope, Scope::File);
        match command.operation {
            Operation::Substitute { replacement, .. } => assert!(replacement.is_empty()),
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_filter_case_selects_match_style() {
        let cases = [
            ("g/a", true, false),
            ("x/a", false, false),
            ("G/a", true, true),
            ("X/a", false, true),
        ];
        for (raw, keep, whole) in cases {
            let command = parse(raw).unwrap();
            assert_eq!(command.scope, Scope::Line, "{raw}");
            match command.operation {
                Operation::Filter {
                    keep_matching,
                    whole_line,
                    ..
                } => {
                    assert_eq!(keep_matching, keep, "{raw}");
                    assert_eq!(whole_line, whole, "{raw}");
                }
                other => panic!("unexpected operation {other:?}"),
            }
        }
    }

    #[test]
    fn test_case_opcodes() {
        let cases = [
            ('u', CaseTransform::Upper),
            ('L', CaseTransform::Lower),
            ('t', CaseTransform::Title),
            ('C', CaseTransform::Capitalize),
        ];
        for (opcode, expected) in cases {
            let command = parse(&format!("{opcode}/x")).unwrap();
            match command.operation {
                Operation::ChangeCase { transform, .. } => assert_eq!(transform, expected),
                other => panic!("unexpected operation {other:?}"),
            }
        }
    }

    #[test]
    fn test_structural_fields() {
        match parse("y/-11/2/123456").unwrap().operation {
            Operation::Replace { index, count, text } => {
                assert_eq!((index, count), (-11, 2));
                assert_eq!(text, "123456");
            }
            other => panic!("unexpected operation {other:?}"),
        }

        // Extra fields are ignored.
        match parse("d/0/2/123456").unwrap().operation {
            Operation::Delete { index, count } => assert_eq!((index, count), (0, 2)),
            other => panic!("unexpected operation {other:?}"),
        }

        let command = parse("A/oh yea?\nyea!").unwrap();
        assert_eq!(command.scope, Scope::File);
        match command.operation {
            Operation::Append { text } => assert_eq!(text, "oh yea?\nyea!"),
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_fixed_opcode_ignores_metacharacters() {
        match parse("f/./!/").unwrap().operation {
            Operation::Substitute { pattern, .. } => {
                assert!(pattern.is_match("special."));
                assert!(!pattern.is_match("special"));
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(""), Err(PedError::EmptyCommand)));

        let err = parse("q/x").unwrap_err();
        assert!(matches!(err, PedError::UnknownOpcode { opcode: 'q', .. }));
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = parse("s/only-pattern").unwrap_err();
        assert!(matches!(err, PedError::MissingField { field: "replacement", .. }));

        let err = parse("g").unwrap_err();
        assert!(matches!(err, PedError::MissingField { field: "pattern", .. }));

        // Lower-case f is the only literal substitute.
        assert!(matches!(parse("F/x/y"), Err(PedError::UnknownOpcode { .. })));
    }

    #[test]
    fn test_argument_errors() {
        let err = parse("i/one/text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Argument);
        assert!(matches!(
            err,
            PedError::InvalidNumber { field: "index", ref value, .. } if value == "one"
        ));

        let err = parse("D/2/").unwrap_err();
        assert!(matches!(err, PedError::InvalidNumber { field: "count", .. }));
    }

    #[test]
    fn test_pattern_errors_surface_at_parse_time() {
        let err = parse("s/a(b/x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Pattern);
        assert_eq!(err.command(), Some("s/a(b/x"));
    }

    #[test]
    fn test_parse_script_is_all_or_nothing() {
        let options = MatchOptions::default();
        let commands = parse_script(&["s/a/b", "g/b", "d/0/1"], &options).unwrap();
        assert_eq!(commands.len(), 3);

        let err = parse_script(&["s/a/b", "z/oops", "d/0/1"], &options).unwrap_err();
        assert!(matches!(err, PedError::UnknownOpcode { opcode: 'z', .. }));
    }
}
