use clap::{Args, Parser, Subcommand};

use crate::config::RenderConfig;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(after_help = r#"Render Options:
    --input, -i <INPUT>    Path to pose-sequence JSON artifact
    --frame, -f <FRAME>    Frame number to render (0-based) [default: 0]
    --person <PERSON>      Render only this person (0-based)
    --output, -o <OUTPUT>  Save the figure to this image path
    --size <SIZE>          Output image edge length in pixels [default: 960]
    --conf <CONF>          Visibility threshold for joints [default: 0.3]
    --show                 Display the figure in a window
    --quiet                Suppress progress output

Examples:
    pose-viz render --input vis_results/results_0.json --frame 5 --output frame5.png
    pose-viz render -i results.json -f 100 --person 1 --show
    pose-viz render -i results.json --conf 0.5 -o strict.png"#)]
pub struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    pub command: Commands,
}

/// Commands for the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a frame of a pose-sequence artifact as a 3D skeleton figure
    Render(RenderArgs),
}

/// Arguments for the render command.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to pose-sequence JSON artifact
    #[arg(short, long)]
    pub input: String,

    /// Frame number to render (0-based)
    #[arg(short, long, default_value_t = 0)]
    pub frame: usize,

    /// Render only this person (0-based); switches to the single-person view
    #[arg(long)]
    pub person: Option<usize>,

    /// Save the figure to this image path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output image edge length in pixels
    #[arg(long, default_value_t = 960)]
    pub size: u32,

    /// Visibility threshold for joints
    #[arg(long, default_value_t = RenderConfig::DEFAULT_VISIBILITY_THRESHOLD)]
    pub conf: f32,

    /// Display the figure in a window
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Suppress progress output
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
