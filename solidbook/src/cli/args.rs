//! CLI argument definitions
//!
//! All Clap derive structs for `solidbook` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use solidbook_core::page::PageKey;

// ============================================================================
// Root CLI
// ============================================================================

/// Static site generator and preview server for the SOLID principles book.
#[derive(Parser, Debug)]
#[command(name = "solidbook", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "SOLIDBOOK_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(long, default_value = "human", global = true, env = "SOLIDBOOK_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to the site configuration file (default: ./solidbook.yaml if present).
    #[arg(short, long, global = true, env = "SOLIDBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of `<key>.md` files overriding the built-in documents.
    #[arg(long, global = true, env = "SOLIDBOOK_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every route to a static site directory.
    Build(BuildArgs),

    /// Serve the rendered site over HTTP for previewing.
    Serve(ServeArgs),

    /// Print the route table.
    Routes(RoutesArgs),

    /// Render a single page to stdout.
    Render(RenderArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

// ============================================================================
// Build / Serve
// ============================================================================

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Output directory (overrides `out_dir` from the configuration).
    #[arg(short, long, env = "SOLIDBOOK_OUT_DIR")]
    pub out: Option<PathBuf>,

    /// Fail on document lint errors and unknown override files.
    #[arg(long)]
    pub strict: bool,

    /// Only render these pages (repeatable). Default: all.
    #[arg(long, value_name = "KEY")]
    pub only: Vec<PageKey>,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides `server.bind`).
    #[arg(short, long, env = "SOLIDBOOK_BIND")]
    pub bind: Option<String>,

    /// Expose Prometheus metrics on `127.0.0.1:<PORT>`.
    #[arg(long, env = "SOLIDBOOK_METRICS_PORT")]
    pub metrics_port: Option<u16>,
}

// ============================================================================
// Routes / Render
// ============================================================================

/// Arguments for `routes`.
#[derive(Args, Debug)]
pub struct RoutesArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Route path (`/solid/srp`) or page key (`srp`).
    pub target: String,

    /// Output format.
    #[arg(short, long, default_value = "html")]
    pub format: RenderFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: clap_complete::Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with optional ANSI colors.
    #[default]
    Human,
    /// Newline-delimited JSON for machine consumption.
    Json,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Output format for `render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// The complete HTML page.
    #[default]
    Html,
    /// The page's viewer configurations as a JSON array.
    Json,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults() {
        let cli = Cli::try_parse_from(["solidbook", "build"]).unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert!(args.out.is_none());
        assert!(!args.strict);
        assert!(args.only.is_empty());
    }

    #[test]
    fn test_build_with_options() {
        let cli = Cli::try_parse_from([
            "solidbook", "build", "--out", "site", "--strict", "--only", "srp", "--only", "dip",
        ])
        .unwrap();
        let Commands::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.out, Some(PathBuf::from("site")));
        assert!(args.strict);
        assert_eq!(args.only, vec![PageKey::Srp, PageKey::Dip]);
    }

    #[test]
    fn test_build_rejects_unknown_page() {
        let result = Cli::try_parse_from(["solidbook", "build", "--only", "kiss"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_options() {
        let cli = Cli::try_parse_from([
            "solidbook",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--metrics-port",
            "9100",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:8080"));
        assert_eq!(args.metrics_port, Some(9100));
    }

    #[test]
    fn test_render_requires_target() {
        assert!(Cli::try_parse_from(["solidbook", "render"]).is_err());
        let cli = Cli::try_parse_from(["solidbook", "render", "/solid/srp", "-f", "json"]).unwrap();
        let Commands::Render(args) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(args.target, "/solid/srp");
        assert_eq!(args.format, RenderFormat::Json);
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["solidbook", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["solidbook", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "solidbook",
            "routes",
            "-vv",
            "--color",
            "never",
            "--config",
            "site.yaml",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("site.yaml")));
    }

    #[test]
    fn test_color_choices_parse() {
        for variant in ["auto", "always", "never"] {
            let cli = Cli::try_parse_from(["solidbook", "--color", variant, "routes"]);
            assert!(cli.is_ok(), "Failed to parse color={variant}");
        }
    }

    #[test]
    fn test_completions_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            let cli = Cli::try_parse_from(["solidbook", "completions", shell]);
            assert!(cli.is_ok(), "Failed to parse shell={shell}");
        }
    }

    #[test]
    fn test_quiet_flag() {
        let cli = Cli::try_parse_from(["solidbook", "--quiet", "build"]).unwrap();
        assert!(cli.quiet);
    }
}
