//! CLI argument definitions for the sidebar harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sidebar_text::Formatting;

#[derive(Parser)]
#[command(
    name = "sidebar",
    version,
    about = "Render legacy sidebar scoreboards into protocol frames",
    long_about = "Render legacy sidebar scoreboards into protocol frames.\n\n\
                  Layouts are TOML files with a title and up to 15 lines.\n\
                  Frames are printed as a table, as JSON or as raw hex."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a layout through the redraw driver and print every frame sent.
    Render(RenderArgs),

    /// Show how a line is split across a team's prefix and suffix.
    Segment(SegmentArgs),

    /// Print the frames of a highlight animation.
    Animate(AnimateArgs),
}

#[derive(Parser)]
pub struct RenderArgs {
    /// Layout file (TOML).
    #[arg(value_name = "LAYOUT")]
    pub layout: PathBuf,

    /// Number of redraw ticks to run.
    #[arg(long = "ticks", default_value_t = 1)]
    pub ticks: usize,

    /// Destroy the board after the last tick.
    #[arg(long = "detach")]
    pub detach: bool,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: FrameFormatArg,
}

#[derive(Parser)]
pub struct SegmentArgs {
    /// Line text; `--marker` codes are translated first.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Characters kept in the head.
    #[arg(long = "budget", default_value_t = 16)]
    pub budget: usize,

    /// Alternate escape marker.
    #[arg(long = "marker", default_value_t = '&')]
    pub marker: char,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Parser)]
pub struct AnimateArgs {
    /// Text to animate. Escape codes are removed first.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Alternate escape marker.
    #[arg(long = "marker", default_value_t = '&')]
    pub marker: char,

    /// Number of frames to print.
    #[arg(long = "frames", default_value_t = 20)]
    pub frames: usize,

    /// Base formatting, by name or code (e.g. `gold` or `6`).
    #[arg(long = "primary", default_value = "gold")]
    pub primary: Formatting,

    /// Highlight formatting.
    #[arg(long = "secondary", default_value = "white")]
    pub secondary: Formatting,

    /// Frames to hold before the first sweep.
    #[arg(long = "cooldown", default_value_t = sidebar_text::DEFAULT_COOLDOWN)]
    pub cooldown: u32,

    /// Frames to hold after each sweep.
    #[arg(long = "wrap-cooldown", default_value_t = sidebar_text::WRAP_COOLDOWN)]
    pub wrap_cooldown: u32,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FrameFormatArg {
    Table,
    Json,
    Hex,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_animate_marker() {
        let cli = Cli::try_parse_from(["sidebar", "animate", "%6Hi", "--marker", "%"]).unwrap();
        let Command::Animate(args) = cli.command else {
            panic!("expected animate");
        };
        assert_eq!(args.marker, '%');
        assert_eq!(args.primary, Formatting::Gold);

        let cli = Cli::try_parse_from(["sidebar", "animate", "Hi"]).unwrap();
        let Command::Animate(args) = cli.command else {
            panic!("expected animate");
        };
        assert_eq!(args.marker, '&');
    }
}
