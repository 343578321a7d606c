//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Build a policy and its chain of models in an interactive wizard
///
/// The finished policy is printed to stdout as JSON.
#[derive(Debug, Parser)]
#[command(name = "policy-tui", version, about)]
pub struct Cli {
    /// Config file (default: ~/.policy-tui/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pre-fill the policy name
    #[arg(long)]
    pub name: Option<String>,

    /// Log file (default: ~/.policy-tui/policy-tui.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["policy-tui"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.name.is_none());
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "policy-tui",
            "--config",
            "/tmp/c.json",
            "--name",
            "twitter",
            "--log-file",
            "/tmp/p.log",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.json")));
        assert_eq!(cli.name.as_deref(), Some("twitter"));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/p.log")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["policy-tui", "--bogus"]).is_err());
    }
}
