use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "raybounce")]
#[command(about = "Dot products, projections and a laser bouncing off a scene")]
pub struct Args {
    /// Scene description (JSON); the built-in demo scene when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Drive the frame loop with a simulated pointer
    Run {
        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Hold the pointer at a fixed pixel instead of sweeping it
        #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
        pointer: Option<Vec<f32>>,

        /// Print every frame report as a JSON line
        #[arg(long)]
        json: bool,
    },

    /// Walk through dot product, normalization and projection of two vectors
    Dot {
        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, default_values_t = [2.0, 3.0, 1.0])]
        a: Vec<f32>,

        #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true, default_values_t = [3.0, 1.0, 4.0])]
        b: Vec<f32>,

        #[arg(long)]
        json: bool,
    },
}
