use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;

use ped::config::{LineEnding, RcConfig, RcLoader};
use ped::{MatchOptions, OutputOptions};

/// Apply delimiter-separated edit commands to a text, in order.
#[derive(Debug, Parser)]
#[command(name = "ped", version)]
struct Cli {
    /// Read input from PATH instead of stdin
    #[arg(short = 'f', long = "filepath", value_name = "PATH")]
    filepath: Option<PathBuf>,

    /// Write the result back to --filepath instead of stdout
    #[arg(short = 'e', long = "in-place", requires = "filepath")]
    in_place: bool,

    /// Make sure the input ends with a line terminator
    #[arg(short = 'n', long)]
    normalize: bool,

    /// Strip the final line terminator from the output (overrides -n)
    #[arg(short = 'Z', long = "no-eof")]
    no_eof: bool,

    /// Line terminator: unix, dos, mac, or a literal string
    #[arg(long = "line-ending", value_name = "STR")]
    line_ending: Option<String>,

    #[arg(short = 'i', long = "ignore-case")]
    ignore_case: bool,

    /// Let `.` match line terminators
    #[arg(short = 'd', long)]
    dotall: bool,

    /// Let `^` and `$` match at every line inside a buffer
    #[arg(short = 'm', long)]
    multiline: bool,

    /// Treat patterns as literal text
    #[arg(short = 'F', long)]
    fixed: bool,

    /// Restrict \w, \s, \d and \b to ASCII
    #[arg(short = 'a', long)]
    ascii: bool,

    /// Maximum substitutions within one line
    #[arg(short = 'L', long = "line-max-sub", value_name = "N")]
    line_max_sub: Option<usize>,

    /// Maximum substitutions made by one command
    #[arg(short = 'M', long = "max-sub", value_name = "N")]
    max_sub: Option<usize>,

    /// Ignore any .pedrc file
    #[arg(long = "no-rc")]
    no_rc: bool,

    /// Commands, applied in order
    commands: Vec<String>,
}

impl Cli {
    fn options(&self, rc: &RcConfig) -> (MatchOptions, OutputOptions) {
        let mut options = MatchOptions {
            ignore_case: self.ignore_case,
            dot_matches_newline: self.dotall,
            line_anchored_multiline: self.multiline,
            fixed_string: self.fixed,
            ascii_classes: self.ascii,
            max_substitutions_per_line: self.line_max_sub,
            max_substitutions: self.max_sub,
        };

        let line_terminator = match &self.line_ending {
            Some(ending) => LineEnding::from_name(ending)
                .map_or_else(|| ending.clone(), |named| named.as_str().to_string()),
            None => rc
                .line_ending
                .clone()
                .unwrap_or_else(|| LineEnding::Unix.as_str().to_string()),
        };
        let mut output = OutputOptions {
            line_terminator,
            normalize_trailing_terminator: self.normalize,
            force_no_trailing_terminator: self.no_eof,
        };

        rc.apply_defaults(&mut options, &mut output);
        (options, output)
    }

    fn read_input(&self) -> Result<String> {
        match &self.filepath {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display())),
            None => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("could not read stdin")?;
                Ok(text)
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rc = if cli.no_rc {
        RcConfig::default()
    } else {
        RcLoader::load_config()
    };
    let (options, output) = cli.options(&rc);
    debug!("match options: {options:?}");
    debug!("output options: {output:?}");

    let text = cli.read_input()?;
    let result = ped::process(&text, &cli.commands, &options, &output)?;

    match (&cli.filepath, cli.in_place) {
        (Some(path), true) => {
            fs::write(path, result).with_context(|| format!("could not write {}", path.display()))?;
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(result.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
