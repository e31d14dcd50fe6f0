mod color;
mod genome;
mod io_utils;
mod readers;
mod settings;
mod table;
mod util;

pub use color::Color;
pub use genome::{BuiltinGenomes, Chromosome, ChromosomeRegistry};
pub use io_utils::{create_writer, open_tsv_writer};
pub use readers::open_table_reader;
pub use settings::{
    JsonSettings, SettingsStore, GAIN_COLOR_KEY, LOSS_COLOR_KEY, PLOT_WIDTH_KEY, ROW_HEIGHT_KEY,
};
pub use table::{find_columns, Dataset, Delimiter, TextTable};
pub use util::{handle_error_and_exit, Result};
