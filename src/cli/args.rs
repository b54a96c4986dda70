//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::OutputFormat;

/// Step-by-step decision tree visualizer for student performance and cardiac triage
#[derive(Parser, Debug)]
#[command(name = "dtviz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Output format (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Classify out-of-range attributes instead of refusing them
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Directory searched for a local .dtviz.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the node table of a scenario
    Nodes {
        /// student | cardiology (default from config)
        domain: Option<String>,
    },

    /// Draw the tree structure
    Tree {
        domain: Option<String>,
    },

    /// Classify attributes and print the animation steps
    Run {
        domain: Option<String>,

        /// Start from a preset (name or index, default: first)
        #[arg(short, long)]
        preset: Option<String>,

        /// Override an attribute, e.g. --set quizScore=72
        #[arg(
            short = 's',
            long = "set",
            value_name = "NAME=VALUE",
            value_parser = parse_key_val,
            conflicts_with = "input"
        )]
        overrides: Vec<(String, String)>,

        /// Read attributes from a JSON file instead of a preset
        #[arg(short, long, value_hint = ValueHint::FilePath, conflicts_with = "preset")]
        input: Option<PathBuf>,

        /// Replay the steps with a delay instead of printing them at once
        #[arg(long, overrides_with = "no_play")]
        play: bool,

        /// Print all steps at once even if autoplay is configured
        #[arg(long)]
        no_play: bool,

        /// Delay between steps in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        interval: Option<u64>,
    },

    /// Print the single step that reveals the whole tree
    Snapshot {
        domain: Option<String>,
    },

    /// List the example profiles of a scenario
    Presets {
        domain: Option<String>,
    },

    /// Walk the tree by choosing branches; interactive without choices
    Walk {
        domain: Option<String>,

        /// Branch indices to take in order, e.g. 1 0 1
        #[arg(short, long, num_args = 1.., value_delimiter = ',')]
        choices: Vec<usize>,
    },

    /// Describe a scenario, or all of them
    Info {
        domain: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Show config file locations
    Path,
    /// Write a commented template config
    Init {
        /// Write the global config instead of ./.dtviz.toml
        #[arg(short, long)]
        global: bool,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing attribute name in '{s}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case("quizScore=72", Some(("quizScore", "72")))]
    #[case(" ecg = Abnormal ", Some(("ecg", "Abnormal")))]
    #[case("quizScore", None)]
    #[case("=72", None)]
    fn given_pair_when_parsing_then_splits_on_first_equals(
        #[case] input: &str,
        #[case] expected: Option<(&str, &str)>,
    ) {
        let parsed = parse_key_val(input).ok();
        let expected = expected.map(|(k, v)| (k.to_string(), v.to_string()));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn given_run_args_when_parsing_then_collects_overrides() {
        let cli = Cli::try_parse_from([
            "dtviz",
            "-dd",
            "run",
            "cardiology",
            "--preset",
            "Low Risk",
            "--set",
            "bloodPressure=150",
            "-s",
            "ecg=abnormal",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            Commands::Run {
                domain,
                preset,
                overrides,
                ..
            } => {
                assert_eq!(domain.as_deref(), Some("cardiology"));
                assert_eq!(preset.as_deref(), Some("Low Risk"));
                assert_eq!(overrides.len(), 2);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn given_comma_choices_when_parsing_walk_then_splits() {
        let cli = Cli::try_parse_from(["dtviz", "walk", "student", "-c", "0,1,0"]).unwrap();
        match cli.command {
            Commands::Walk { choices, .. } => assert_eq!(choices, vec![0, 1, 0]),
            other => panic!("expected walk, got {other:?}"),
        }
    }
}
