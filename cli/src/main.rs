mod commands;

use clap::{Parser, Subcommand};
use gpstrace::config::{self, RunType, Settings};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the GPS trace of every video in a folder into JSON files
    Extract {
        path: Option<PathBuf>,
        #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
        #[arg(long, default_value = config::DEFAULT_EXTENSION)]
        ext: String,
        #[arg(long, default_value = config::DEFAULT_EXIFTOOL)]
        exiftool: String,
        #[arg(short, long)]
        recursive: bool,
        /// Without this nothing is written
        #[arg(short, long)]
        exec: bool,
    },
    /// Print the GPS trace of one video, or of a saved exiftool text dump
    Parse {
        path: PathBuf,
        /// Treat the path as `exiftool -ee -gps*` output instead of a video
        #[arg(long)]
        text: bool,
        #[arg(long, default_value = config::DEFAULT_EXIFTOOL)]
        exiftool: String,
    },
    /// Serve the JSON traces to the map viewer
    Serve {
        #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
        dir: PathBuf,
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
        /// Folder with the viewer's index.html and scripts
        #[arg(long)]
        public: Option<PathBuf>,
    },
}

fn init_logging(default: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Extract {
            path,
            out,
            ext,
            exiftool,
            recursive,
            exec,
        }) => {
            init_logging("warn");
            let settings = Settings {
                exiftool,
                output_dir: out,
                extension: ext,
                recursive,
                mode: if exec { RunType::Exec } else { RunType::Dry },
            };
            let path_buf = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            let report = commands::extract::exec(&path_buf, &settings)?;
            if report.halted() {
                std::process::exit(2);
            }
        }
        Some(Commands::Parse {
            path,
            text,
            exiftool,
        }) => {
            init_logging("warn");
            commands::parse::exec(&path, text, &exiftool)?;
        }
        Some(Commands::Serve { dir, port, public }) => {
            init_logging("info,tower_http=debug");
            commands::serve::exec(dir, port, public)?;
        }
        None => {
            println!("Incorrect usage");
        }
    }

    Ok(())
}
