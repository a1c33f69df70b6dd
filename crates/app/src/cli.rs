//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use trak_domain::Config;

/// Track time against a TRAK backend
#[derive(Debug, Default, Parser)]
#[command(name = "trak", version, about)]
pub struct Cli {
    /// Config file (TOML or JSON); defaults to ./trak.toml when present
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Log filter, e.g. `debug` or `trak_core=trace`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Run one shell command and exit, e.g. `trak start Write report`
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_url {
            config.api.base_url.clone_from(url);
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
        if self.log_json {
            config.logging.json = true;
        }
    }

    /// The one-shot command line, if any
    pub fn one_shot(&self) -> Option<String> {
        (!self.command.is_empty()).then(|| self.command.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["trak", "--api-url", "http://trak:9000", "--log-level", "debug"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.api.base_url, "http://trak:9000");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.json);
        assert!(cli.one_shot().is_none());
    }

    #[test]
    fn trailing_words_form_a_one_shot_command() {
        let cli = Cli::parse_from(["trak", "-c", "trak.toml", "start", "Write", "report"]);
        assert_eq!(cli.config, Some(PathBuf::from("trak.toml")));
        assert_eq!(cli.one_shot().as_deref(), Some("start Write report"));
    }
}
