//! `ped` applies a script of compact, delimiter-separated edit commands to a
//! text, in order, and produces the transformed text.
//!
//! ```text
//! s/c/C/      substitute in every line        S/c/C/      ... in the whole buffer
//! g/re        keep lines matching re           x/re        drop them
//! i/-1/text   insert a line before the last    D/0/4       delete the first 4 chars
//! ```
//!
//! Every command is parsed, and its pattern compiled, before the first one
//! runs; a bad script produces an error and no output at all.

pub mod case;
pub mod command;
pub mod config;
pub mod document_model;
pub mod engine;
pub mod error;
pub mod index;
pub mod pattern;

pub use command::{Command, Operation, Scope, parse_command, parse_script};
pub use config::{MatchOptions, OutputOptions};
pub use document_model::Document;
pub use error::{ErrorKind, PedError};
pub use pattern::{Pattern, PatternError, compile_pattern};

/// Run the whole pipeline: load `text`, parse `script`, apply every command
/// and serialize the result.
pub fn process<S>(
    text: &str,
    script: &[S],
    options: &MatchOptions,
    output: &OutputOptions,
) -> Result<String, PedError>
where
    S: AsRef<str>,
{
    let commands = parse_script(script, options)?;
    let document = Document::load(text, output);
    let document = engine::run(document, &commands, options);
    Ok(document.serialize(output))
}
