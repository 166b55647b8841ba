use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use pubfig::config::{schema_json_pretty, LayoutPreset, RenderConfig, POINTS_PER_INCH};
use pubfig::demo::Demo;
use pubfig::presenter::present;

#[derive(Parser)]
#[command(name = "pubfig")]
#[command(
    about = "Publication-ready figures",
    long_about = "Renders figures at the physical size of a journal or thesis layout, with publication typography and tick labels, to SVG or PNG."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long, global = true)]
    append_log: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DemoArg {
    Line,
    Sine,
    Empty,
    Colorbar,
}

impl From<DemoArg> for Demo {
    fn from(arg: DemoArg) -> Self {
        match arg {
            DemoArg::Line => Demo::Line,
            DemoArg::Sine => Demo::Sine,
            DemoArg::Empty => Demo::Empty,
            DemoArg::Colorbar => Demo::Colorbar,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render a demo figure
    Render {
        /// Which demo figure to draw
        #[arg(long, value_enum)]
        demo: DemoArg,
        /// Render configuration JSON file (see `pubfig schema`)
        #[arg(long)]
        config: Option<String>,
        /// Layout preset, overrides the config file
        #[arg(long)]
        preset: Option<String>,
        /// Output file (.svg or .png). Without it the SVG is written to stdout.
        #[arg(long)]
        save: Option<String>,
        /// Dots per inch, overrides the config file
        #[arg(long)]
        dpi: Option<u32>,
        /// Log the effective configuration
        #[arg(short, long)]
        verbose: bool,
    },
    /// List the layout presets and their sizes
    Presets,
    /// Print the JSON schema of the render configuration
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        }
        .with_context(|| format!("Could not open log file '{}'", path))?;
        log_builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    log_builder.init();

    match cli.command {
        Commands::Render {
            demo,
            config,
            preset,
            save,
            dpi,
            verbose,
        } => {
            let mut render_config = match config {
                Some(ref path) => RenderConfig::load(path)
                    .with_context(|| format!("Error loading render config {}", path))?,
                None => RenderConfig::default(),
            };
            if let Some(preset) = preset {
                render_config.layout_preset = preset;
            }
            if let Some(save) = save {
                render_config.save_path = Some(save);
            }
            if let Some(dpi) = dpi {
                render_config.dpi = dpi;
            }
            render_config.verbose |= verbose;

            let demo = Demo::from(demo);
            info!("Rendering '{}' demo as {}", demo, render_config.preset());
            present(|fig, config| demo.draw(fig, config), &render_config)
                .with_context(|| format!("Failed to render the '{}' demo", demo))?;
        }
        Commands::Presets => {
            println!("name\twidth_in\twidth_pt\theight_in\taliases");
            for preset in LayoutPreset::ALL {
                let (width, height) = preset.size();
                println!(
                    "{}\t{:.4}\t{:.2}\t{:.4}\t{}",
                    preset,
                    width,
                    width * POINTS_PER_INCH,
                    height,
                    preset.aliases().join(",")
                );
            }
        }
        Commands::Schema => {
            println!("{}", schema_json_pretty().context("Failed to serialize schema")?);
        }
    }
    Ok(())
}
