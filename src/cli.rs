use crate::utils::{Color, Delimiter, Result};
use chrono::Datelike;
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color as LogColor;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="ideogram",
          author="Antony Holmes",
          version=&**FULL_VERSION,
          about="Copy-number gain/loss track layout for multi-chromosome ideograms",
          long_about = None,
          disable_help_subcommand = true,
          after_help = format!("Copyright (C) 2016-{}     Antony Holmes", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{author}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(global = true)]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Assign gain/loss tracks and lay out the ideogram")]
    Tracks(TracksArgs),
    #[clap(about = "List available reference genomes")]
    Genomes(GenomesArgs),
}

#[derive(Parser, Debug)]
#[command(arg_required_else_help(true))]
pub struct TracksArgs {
    #[clap(required = true)]
    #[clap(short = 'i')]
    #[clap(long = "segments")]
    #[clap(help = "Table of copy-number segments (optionally gzipped)")]
    #[clap(value_name = "SEGMENTS")]
    #[arg(value_parser = check_file_exists)]
    pub segments_path: PathBuf,

    #[clap(required = true)]
    #[clap(short = 'o')]
    #[clap(long = "output-prefix")]
    #[clap(help = "Prefix for output files")]
    #[clap(value_name = "OUTPUT_PREFIX")]
    #[arg(value_parser = check_prefix_path)]
    pub output_prefix: String,

    #[clap(short = 'g')]
    #[clap(long = "genome")]
    #[clap(help = "Reference genome [default: first available]")]
    #[clap(value_name = "GENOME")]
    pub genome: Option<String>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "gain-color")]
    #[clap(value_name = "COLOR")]
    #[clap(help = "Color of gains (#RRGGBB or name) [default: last used]")]
    #[arg(value_parser = color_from_string)]
    pub gain_color: Option<Color>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "loss-color")]
    #[clap(value_name = "COLOR")]
    #[clap(help = "Color of losses (#RRGGBB or name) [default: last used]")]
    #[arg(value_parser = color_from_string)]
    pub loss_color: Option<Color>,

    #[clap(help_heading("Plotting"))]
    #[clap(long = "settings")]
    #[clap(value_name = "SETTINGS")]
    #[clap(help = "JSON file with persisted plot settings")]
    #[clap(default_value = "ideogram.settings.json")]
    #[arg(value_parser = check_settings_path)]
    pub settings_path: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "delimiter")]
    #[clap(value_name = "DELIMITER")]
    #[clap(help = "Column delimiter of the segment table (tab or comma)")]
    #[clap(default_value = "tab")]
    pub delimiter: Delimiter,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "id-column")]
    #[clap(value_name = "NAME")]
    #[clap(help = "Name of the sample identifier column")]
    #[clap(default_value = "id")]
    #[arg(value_parser = check_column_name_nonempty)]
    pub id_column: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "chr-column")]
    #[clap(value_name = "NAME")]
    #[clap(help = "Name of the chromosome column")]
    #[clap(default_value = "chr")]
    #[arg(value_parser = check_column_name_nonempty)]
    pub chr_column: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "start-column")]
    #[clap(value_name = "NAME")]
    #[clap(help = "Name of the segment start column")]
    #[clap(default_value = "start")]
    #[arg(value_parser = check_column_name_nonempty)]
    pub start_column: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "end-column")]
    #[clap(value_name = "NAME")]
    #[clap(help = "Name of the segment end column")]
    #[clap(default_value = "end")]
    #[arg(value_parser = check_column_name_nonempty)]
    pub end_column: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "value-column")]
    #[clap(value_name = "NAME")]
    #[clap(help = "Name of the signed copy-number column")]
    #[clap(default_value = "mean")]
    #[arg(value_parser = check_column_name_nonempty)]
    pub value_column: String,
}

#[derive(Parser, Debug)]
pub struct GenomesArgs {}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(LogColor::Red),
                Level::Warn => style.set_color(LogColor::Yellow),
                Level::Info => style.set_color(LogColor::Green),
                Level::Debug => style.set_color(LogColor::Blue),
                Level::Trace => style.set_color(LogColor::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}

fn check_settings_path(s: &str) -> Result<PathBuf> {
    check_prefix_path(s).map(PathBuf::from)
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_column_name_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Column name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}

fn color_from_string(s: &str) -> Result<Color> {
    s.parse::<Color>()
}
