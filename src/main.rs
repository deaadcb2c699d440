use clap::Parser;

use pose_viz::cli::args::{Cli, Commands};
use pose_viz::cli::render::run_render;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => run_render(&args),
    }
}
