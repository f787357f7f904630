use clap::{Parser, Subcommand};
use std::io::Write;
use std::os::unix::net::UnixStream;
use turntable::CarouselConfig;
use turntable::control::{self, ControlCommand};
use turntable::geometry::Geometry;
use turntable::ring::ring_radius;
use turntable::selector::SlideSelector;

#[derive(Parser, Debug)]
#[command(name = "turntable", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Rotate the running carousel to a slide.
    Select {
        /// Zero-based slide number
        index: usize,
    },
    /// Show the next slide
    Next,
    /// Show the previous slide
    Prev,
    /// Print the ring layout the default tuning produces
    Inspect {
        /// Number of cards on the ring
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Select { index }) => send_command(ControlCommand::Select(index)),
        Some(Commands::Next) => send_command(ControlCommand::Next),
        Some(Commands::Prev) => send_command(ControlCommand::Prev),
        Some(Commands::Inspect { count }) => inspect(count),
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn inspect(count: usize) -> anyhow::Result<()> {
    if count == 0 {
        anyhow::bail!("A ring needs at least one card.");
    }
    let config = CarouselConfig::default();
    config.validate()?;

    let g = &config.geometry;
    let geometry = Geometry::from_config(g);
    println!(
        "card {}x{}x{} r={} ({} vertices, {} triangles)",
        g.width,
        g.height,
        g.depth,
        g.corner_radius,
        geometry.vertex_count(),
        geometry.triangle_count()
    );
    println!("ring radius {:.2}", ring_radius(count, g.width, g.spacing));

    let selector = SlideSelector::new(count, &config);
    for button in 0..count {
        println!(
            "slide {button}: target {:>8.2}, brings panel {} forward",
            selector.target_angle(button),
            selector.panel_for_button(button)
        );
    }
    Ok(())
}

fn send_command(cmd: ControlCommand) -> anyhow::Result<()> {
    let path = control::socket_path();
    let mut stream = UnixStream::connect(&path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to carousel at {}: {}. Is it running?",
            path.display(),
            e
        )
    })?;

    writeln!(stream, "{}", cmd)?;
    log::debug!("Sent '{}' to {}", cmd, path.display());
    Ok(())
}
