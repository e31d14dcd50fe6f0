use crate::cli::TracksArgs;
use crate::ideogram::render::TsvRenderer;
use crate::ideogram::segment::ColumnNames;
use crate::ideogram::workflow::{run_ideogram, CliPrompt, Outcome};
use crate::utils::{open_table_reader, BuiltinGenomes, JsonSettings, Result, TextTable};

pub fn tracks(args: TracksArgs) -> Result<()> {
    let reader = open_table_reader(&args.segments_path)?;
    let table = TextTable::from_reader(reader, args.delimiter)
        .map_err(|e| format!("{}: {}", args.segments_path.display(), e))?;
    let mut settings = JsonSettings::load(&args.settings_path)?;

    let names = ColumnNames {
        id: args.id_column,
        chr: args.chr_column,
        start: args.start_column,
        end: args.end_column,
        magnitude: args.value_column,
    };
    let mut prompt = CliPrompt {
        genome: args.genome,
        gain_color: args.gain_color,
        loss_color: args.loss_color,
    };
    let mut renderer = TsvRenderer::new(&args.output_prefix);

    match run_ideogram(
        &table,
        &names,
        &mut prompt,
        &mut settings,
        &BuiltinGenomes,
        &mut renderer,
    )? {
        Outcome::Cancelled => log::info!("No output written"),
        Outcome::Rendered {
            segments,
            rectangles,
        } => log::info!(
            "Assigned tracks to {} of {} segments",
            rectangles,
            segments
        ),
    }
    Ok(())
}
