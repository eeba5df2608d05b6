use std::path::PathBuf;

use canvas::progress::Level;
use canvas::theme::Theme;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "diamond-art", about = "Diamond Art canvas sessions from the command line")]
pub struct Cli {
    /// Session file shared by every command.
    #[arg(long, env = "DIAMOND_ART_STORE", default_value = ".diamond-art.json")]
    pub store: PathBuf,

    #[arg(long, env = "DIAMOND_ART_API_URL", default_value = "http://127.0.0.1:5000/api")]
    pub api_url: String,

    #[arg(long, env = "DIAMOND_ART_TOKEN")]
    pub token: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Turn an image into a painting on the activity's palette.
    Import(ImportArgs),
    /// Export the stored painting as PNG.
    Render(RenderArgs),
    /// Show progress for an activity.
    Status(StatusArgs),
    /// List the built-in palettes.
    Palettes,
    /// Delete an activity's stored session.
    Reset(ResetArgs),
    /// Report a completed activity to the backend.
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    #[arg(long)]
    pub activity: String,

    #[arg(long, default_value = "beginner")]
    pub level: Level,

    /// Score the direct painted percentage instead of the level-adjusted one.
    #[arg(long, default_value_t = false)]
    pub unadjusted: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    pub image: PathBuf,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Grid edge: 10, 15, 20, 25, 30 or 40.
    #[arg(long)]
    pub size: Option<usize>,

    /// Activity id or mood whose palette to use.
    #[arg(long)]
    pub palette: Option<String>,

    /// Replace an existing painting.
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long)]
    pub theme: Option<Theme>,

    /// Container width to fit, as the page would; omit for the full 600px canvas.
    #[arg(long)]
    pub container: Option<f64>,

    #[arg(long, default_value_t = 1024.0)]
    pub viewport: f64,

    #[arg(long, default_value_t = 1.0)]
    pub dpr: f64,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ResetArgs {
    #[arg(long)]
    pub activity: String,

    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    #[arg(long)]
    pub mood_before: u8,

    #[arg(long)]
    pub mood_after: u8,

    #[arg(long)]
    pub notes: Option<String>,
}
