use std::path::PathBuf;

use clap::{Parser, Subcommand};
use extforge::domain::value_objects::BuildMode;

/// extforge - build orchestrator for browser extension bundles
#[derive(Parser, Debug)]
#[command(name = "extforge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// NDJSON events on stdout (for CI)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v shows per-file events)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (holds extforge.toml and the sources)
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Build mode, overrides NODE_ENV
    #[arg(long, global = true, value_enum)]
    pub mode: Option<BuildMode>,

    /// Output directory, overrides config and EXTFORGE_OUT_DIR.
    /// Relative paths resolve against the project root.
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean, bundle every target, copy assets, write manifest and pages
    Build,

    /// Rebuild whenever sources change
    Watch,

    /// Remove the files written by the previous build
    Clean {
        /// Show what would be removed without deleting
        #[arg(long)]
        dry_run: bool,
    },

    /// List build targets with their contexts and reload policy
    Targets,

    /// Show the transform each path is assigned
    Classify {
        /// Paths to classify, relative to the project root
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::try_parse_from(["extforge", "build"]).unwrap();
        assert!(matches!(cli.command, Commands::Build));
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.project, PathBuf::from("."));
        assert_eq!(cli.mode, None);
        assert_eq!(cli.out_dir, None);
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "extforge",
            "build",
            "--json",
            "-v",
            "--mode",
            "production",
            "--out-dir",
            "dist",
            "--project",
            "ext",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.mode, Some(BuildMode::Production));
        assert_eq!(cli.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(cli.project, PathBuf::from("ext"));
    }

    #[test]
    fn test_cli_parse_clean_dry_run() {
        let cli = Cli::try_parse_from(["extforge", "clean", "--dry-run"]).unwrap();
        if let Commands::Clean { dry_run } = cli.command {
            assert!(dry_run);
        } else {
            panic!("Expected Clean command");
        }
    }

    #[test]
    fn test_cli_parse_classify_requires_paths() {
        assert!(Cli::try_parse_from(["extforge", "classify"]).is_err());

        let cli = Cli::try_parse_from(["extforge", "classify", "a.css", "b.png"]).unwrap();
        if let Commands::Classify { paths } = cli.command {
            assert_eq!(paths, vec![PathBuf::from("a.css"), PathBuf::from("b.png")]);
        } else {
            panic!("Expected Classify command");
        }
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["extforge", "build", "--mode", "staging"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["extforge"]).is_err());
    }
}
