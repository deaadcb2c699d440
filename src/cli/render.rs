use std::process;

use crate::cli::args::RenderArgs;
use crate::{PoseSequence, RenderConfig, error, render_frame, render_person, success, verbose};

/// Run the render command: load an artifact, render the requested frame (or
/// person), then save and/or display the figure.
pub fn run_render(args: &RenderArgs) {
    crate::cli::logging::set_verbose(!args.quiet);

    let sequence = match PoseSequence::load(&args.input) {
        Ok(seq) => seq,
        Err(e) => {
            error!("Failed to load {}: {e}", args.input);
            process::exit(1);
        }
    };
    verbose!(
        "Loaded {} frames, {} joints, {} links from {}",
        sequence.len(),
        sequence.joint_count().unwrap_or(0),
        sequence.meta.links.len(),
        args.input
    );

    let config = match args.person {
        Some(_) => RenderConfig::single_person(),
        None => RenderConfig::full_frame(),
    }
    .with_visibility_threshold(args.conf);

    let figure = match args.person {
        Some(person) => render_person(&sequence, args.frame, person, &config),
        None => render_frame(&sequence, args.frame, &config),
    };
    let figure = match figure {
        Ok(f) => f,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };
    verbose!(
        "{}: {} joints, {} links above threshold {}",
        figure.title,
        figure.markers().count(),
        figure.segments().count(),
        config.visibility_threshold
    );

    if let Some(ref output) = args.output {
        if let Err(e) = figure.save(output, args.size) {
            error!("Failed to save {output}: {e}");
            process::exit(1);
        }
        success!("Saved figure to {output}");
    }

    if args.show {
        #[cfg(feature = "visualize")]
        {
            let image = figure.rasterize(args.size);
            let result = crate::visualizer::Viewer::new(
                &figure.title,
                image.width() as usize,
                image.height() as usize,
            )
            .and_then(|mut viewer| viewer.show_until_closed(&image));
            if let Err(e) = result {
                error!("{e}");
                process::exit(1);
            }
        }

        #[cfg(not(feature = "visualize"))]
        {
            crate::warn!(
                "--show requires the 'visualize' feature. Compile with --features visualize to enable display."
            );
        }
    }
}
