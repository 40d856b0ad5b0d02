use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::{LineEnding, MatchOptions, OutputOptions};

/// Defaults read from a `.pedrc` file. Every field is a default only:
/// flags given on the command line take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RcConfig {
    pub ignore_case: bool,
    pub dotall: bool,
    pub multiline: bool,
    pub fixed: bool,
    pub ascii: bool,
    pub normalize: bool,
    pub no_eof: bool,
    pub line_ending: Option<String>,
    pub line_max_sub: Option<usize>,
    pub max_sub: Option<usize>,
}

impl RcConfig {
    /// Fold these defaults into options built from the command line.
    /// Boolean flags can only be switched on; values already set win.
    pub fn apply_defaults(&self, options: &mut MatchOptions, output: &mut OutputOptions) {
        options.ignore_case |= self.ignore_case;
        options.dot_matches_newline |= self.dotall;
        options.line_anchored_multiline |= self.multiline;
        options.fixed_string |= self.fixed;
        options.ascii_classes |= self.ascii;
        options.max_substitutions_per_line =
            options.max_substitutions_per_line.or(self.line_max_sub);
        options.max_substitutions = options.max_substitutions.or(self.max_sub);

        output.normalize_trailing_terminator |= self.normalize;
        output.force_no_trailing_terminator |= self.no_eof;
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .pedrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.pedrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(".pedrc");
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(".pedrc");
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file, falling back to defaults when none exists.
    pub fn load_config() -> RcConfig {
        match Self::get_rc_path() {
            Some(path) => Self::load_from(&path),
            None => RcConfig::default(),
        }
    }

    pub fn load_from(path: &Path) -> RcConfig {
        let mut config = RcConfig::default();
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("loading rc file {}", path.display());
                Self::parse_config_content(&content, &mut config);
            }
            Err(e) => warn!("could not read {}: {e}", path.display()),
        }
        config
    }

    pub fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = match line.find(" #") {
            Some(pos) => &line[..pos],
            None => line,
        }
        .trim();

        let setting = line.strip_prefix("set ").unwrap_or(line).trim();

        match setting.split_once('=') {
            Some((key, value)) => Self::parse_value(key.trim(), value.trim(), config),
            None => Self::parse_switch(setting, config),
        }
    }

    fn parse_switch(setting: &str, config: &mut RcConfig) {
        if Self::set_switch(setting, true, config) {
            return;
        }
        if let Some(name) = setting.strip_prefix("no") {
            if Self::set_switch(name, false, config) {
                return;
            }
        }
        warn!("ignoring unknown rc setting '{setting}'");
    }

    fn set_switch(name: &str, on: bool, config: &mut RcConfig) -> bool {
        match name {
            "ignorecase" | "ic" => config.ignore_case = on,
            "dotall" => config.dotall = on,
            "multiline" => config.multiline = on,
            "fixed" => config.fixed = on,
            "ascii" => config.ascii = on,
            "normalize" => config.normalize = on,
            "noeof" => config.no_eof = on,
            _ => return false,
        }
        true
    }

    fn parse_value(key: &str, value: &str, config: &mut RcConfig) {
        match key {
            "fileformat" | "ff" | "line_ending" | "lineending" => {
                match LineEnding::from_name(value) {
                    Some(ending) => config.line_ending = Some(ending.as_str().to_string()),
                    None => warn!("ignoring unknown line ending '{value}'"),
                }
            }
            "linemaxsub" | "line_max_sub" => match value.parse::<usize>() {
                Ok(n) => config.line_max_sub = Some(n),
                Err(_) => warn!("ignoring non-numeric {key}={value}"),
            },
            "maxsub" | "max_sub" => match value.parse::<usize>() {
                Ok(n) => config.max_sub = Some(n),
                Err(_) => warn!("ignoring non-numeric {key}={value}"),
            },
            _ => {
                let on = value == "true" || value == "1" || value == "yes";
                let name = if on { key.to_string() } else { format!("no{key}") };
                Self::parse_switch(&name, config);
            }
        }
    }

    /// Generate a sample RC file content
    pub fn generate_sample_rc() -> String {
        r#"# ped configuration file (.pedrc)
# Lines starting with # or " are comments

# Matching
set ignorecase          # Fold case (or set noignorecase)
set multiline           # ^ and $ match at every line inside a buffer
# set dotall            # . also matches line terminators
# set fixed             # Patterns are literal text
# set ascii             # \w \s \d \b use ASCII only

# Substitution bounds
# set linemaxsub=1
# set maxsub=100

# Output
set fileformat=unix     # Line terminator: unix, dos, or mac
# set normalize         # Make sure the input ends with a terminator
# set noeof             # Strip the final terminator from the output
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vim_style_config() {
        let mut config = RcConfig::default();
        let content = r#"
            set ignorecase
            set multiline
            set linemaxsub=3
            set fileformat=dos
            set noeof
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(config.ignore_case);
        assert!(config.multiline);
        assert!(config.no_eof);
        assert_eq!(config.line_max_sub, Some(3));
        assert_eq!(config.line_ending.as_deref(), Some("\r\n"));
    }

    #[test]
    fn test_parse_key_value_config() {
        let mut config = RcConfig::default();
        let content = r#"
            dotall=true
            fixed=yes
            ascii=false
            max_sub=8
            line_ending=mac
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(config.dotall);
        assert!(config.fixed);
        assert!(!config.ascii);
        assert_eq!(config.max_sub, Some(8));
        assert_eq!(config.line_ending.as_deref(), Some("\r"));
    }

    #[test]
    fn test_parse_mixed_config_with_comments() {
        let mut config = RcConfig::default();
        let content = r#"
            # This is a comment
            set ic                 # Ignore case
            " This is also a comment

            # set dotall
            set nomultiline
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert!(config.ignore_case);
        assert!(!config.dotall);
        assert!(!config.multiline);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let mut config = RcConfig::default();
        let content = r#"
            set maxsub=lots
            linemaxsub=-1
            line_ending=vms
            unknown_setting=value
            set sparkle
        "#;

        RcLoader::parse_config_content(content, &mut config);

        assert_eq!(config, RcConfig::default());
    }

    #[test]
    fn test_command_line_wins_over_rc() {
        let config = RcConfig {
            ignore_case: true,
            line_max_sub: Some(2),
            max_sub: Some(10),
            ..RcConfig::default()
        };
        let mut options = MatchOptions {
            max_substitutions: Some(3),
            ..MatchOptions::default()
        };
        let mut output = OutputOptions::default();

        config.apply_defaults(&mut options, &mut output);

        assert!(options.ignore_case);
        assert_eq!(options.max_substitutions_per_line, Some(2));
        assert_eq!(options.max_substitutions, Some(3));
    }

    #[test]
    fn test_sample_rc_parses_cleanly() {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content(&RcLoader::generate_sample_rc(), &mut config);
        assert!(config.ignore_case);
        assert!(config.multiline);
        assert_eq!(config.line_ending.as_deref(), Some("\n"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pedrc");
        fs::write(&path, "set fixed\nset maxsub=4\n").unwrap();

        let config = RcLoader::load_from(&path);
        assert!(config.fixed);
        assert_eq!(config.max_sub, Some(4));
    }
}
