use super::layout::{layout_figure, IdeogramFigure, LayoutParams};
use super::segment::{parse_segments, ColumnNames, SegmentColumns};
use super::tracks::assign_tracks;
use crate::utils::{
    ChromosomeRegistry, Color, Dataset, Result, SettingsStore, GAIN_COLOR_KEY, LOSS_COLOR_KEY,
};

#[derive(Debug, Clone, PartialEq)]
pub struct IdeogramOptions {
    pub genome: String,
    pub gain_color: Color,
    pub loss_color: Color,
}

/// Collects the genome and colors for a run. The stored colors in `settings`
/// are the defaults on offer. Returning `None` cancels the run before any
/// track is assigned.
pub trait OptionsPrompt {
    fn prompt(
        &mut self,
        genomes: &[String],
        settings: &dyn SettingsStore,
    ) -> Result<Option<IdeogramOptions>>;
}

pub trait Renderer {
    fn render(&mut self, figure: &IdeogramFigure) -> Result<()>;
}

/// Options taken from the command line, falling back to the first available
/// genome and the stored colors. A stored color is only read when its
/// command-line override is absent.
#[derive(Debug, Default, Clone)]
pub struct CliPrompt {
    pub genome: Option<String>,
    pub gain_color: Option<Color>,
    pub loss_color: Option<Color>,
}

impl OptionsPrompt for CliPrompt {
    fn prompt(
        &mut self,
        genomes: &[String],
        settings: &dyn SettingsStore,
    ) -> Result<Option<IdeogramOptions>> {
        let genome = match &self.genome {
            Some(genome) if genomes.contains(genome) => genome.clone(),
            Some(genome) => {
                return Err(format!(
                    "Unknown genome: {}. Available genomes: {}",
                    genome,
                    genomes.join(", ")
                ))
            }
            None => genomes
                .first()
                .cloned()
                .ok_or_else(|| "No genomes available".to_string())?,
        };

        Ok(Some(IdeogramOptions {
            genome,
            gain_color: match self.gain_color {
                Some(color) => color,
                None => settings.gain_color()?,
            },
            loss_color: match self.loss_color {
                Some(color) => color,
                None => settings.loss_color()?,
            },
        }))
    }
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Cancelled,
    Rendered { segments: usize, rectangles: usize },
}

pub fn run_ideogram<D, P, S, R, W>(
    dataset: &D,
    names: &ColumnNames,
    prompt: &mut P,
    settings: &mut S,
    registry: &R,
    renderer: &mut W,
) -> Result<Outcome>
where
    D: Dataset + ?Sized,
    P: OptionsPrompt + ?Sized,
    S: SettingsStore,
    R: ChromosomeRegistry + ?Sized,
    W: Renderer + ?Sized,
{
    let columns = SegmentColumns::resolve(dataset, names)?;

    let options = match prompt.prompt(&registry.genomes(), &*settings)? {
        Some(options) => options,
        None => {
            log::info!("Ideogram cancelled");
            return Ok(Outcome::Cancelled);
        }
    };

    settings.set(GAIN_COLOR_KEY, options.gain_color.to_string());
    settings.set(LOSS_COLOR_KEY, options.loss_color.to_string());
    settings.save()?;

    let segments = parse_segments(dataset, &columns, registry, &options.genome)?;
    log::info!(
        "Loaded {} segments for genome {}",
        segments.len(),
        options.genome
    );

    let tracks = assign_tracks(&segments);
    let params = LayoutParams {
        plot_width: settings.plot_width()?,
        row_height: settings.row_height()?,
    };
    let figure = layout_figure(
        tracks,
        registry,
        &options.genome,
        params,
        (options.gain_color, options.loss_color),
    )?;

    renderer.render(&figure)?;

    Ok(Outcome::Rendered {
        segments: segments.len(),
        rectangles: figure.tracks.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ideogram::layout::PanelKind;
    use crate::ideogram::segment::SegmentClass;
    use crate::utils::{BuiltinGenomes, Chromosome, Delimiter, TextTable, ROW_HEIGHT_KEY};
    use std::collections::HashMap;
    use std::io::Cursor;

    const SEGMENTS: &str = "\
id\tchr\tstart\tend\tmean\n\
A\tchr1\t100\t199\t1.5\n\
B\tchr1\t300\t309\t2.0\n\
A\tchr1\t500\t599\t1.0\n\
S1\t2\t1\t50\t-1.0\n";

    #[derive(Default)]
    struct MemorySettings {
        values: HashMap<String, String>,
    }

    impl SettingsStore for MemorySettings {
        fn get(&self, key: &str) -> Option<&str> {
            self.values.get(key).map(String::as_str)
        }

        fn set(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn save(&self) -> Result<()> {
            Ok(())
        }
    }

    struct CancelPrompt;

    impl OptionsPrompt for CancelPrompt {
        fn prompt(
            &mut self,
            _: &[String],
            _: &dyn SettingsStore,
        ) -> Result<Option<IdeogramOptions>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: usize,
        gains_chr1: Vec<(i64, i32, i64, i32)>,
        panels: usize,
        gain_color: Option<Color>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, figure: &IdeogramFigure) -> Result<()> {
            self.calls += 1;
            self.panels = figure.panels.len();
            self.gain_color = Some(figure.color(SegmentClass::Gain));
            let chr1 = Chromosome::new("chr1")?;
            let panel = figure
                .panels
                .iter()
                .find(|p| p.chr == chr1 && p.kind == PanelKind::Gains)
                .ok_or("missing panel")?;
            self.gains_chr1 = figure
                .rects(panel)
                .iter()
                .map(|r| (r.x1, r.y1, r.x2, r.y2))
                .collect();
            Ok(())
        }
    }

    fn table(data: &str) -> TextTable {
        TextTable::from_reader(Cursor::new(data), Delimiter::Tab).unwrap()
    }

    #[test]
    fn run_assigns_lays_out_and_renders() {
        let mut settings = MemorySettings::default();
        let mut renderer = RecordingRenderer::default();
        let mut prompt = CliPrompt {
            genome: Some("hg38".to_string()),
            gain_color: Some(Color::rgb(0, 128, 0)),
            loss_color: None,
        };

        let outcome = run_ideogram(
            &table(SEGMENTS),
            &ColumnNames::default(),
            &mut prompt,
            &mut settings,
            &BuiltinGenomes,
            &mut renderer,
        )
        .unwrap();

        assert_eq!(
            outcome,
            Outcome::Rendered {
                segments: 4,
                rectangles: 4
            }
        );
        assert_eq!(renderer.calls, 1);
        assert_eq!(renderer.panels, 72);
        assert_eq!(renderer.gain_color, Some(Color::rgb(0, 128, 0)));
        assert_eq!(
            renderer.gains_chr1,
            vec![(100, 1, 199, 1), (300, 2, 309, 2), (500, 1, 599, 1)]
        );
        assert_eq!(settings.get(GAIN_COLOR_KEY), Some("#008000"));
        assert_eq!(settings.get(LOSS_COLOR_KEY), Some("#0000FF"));
    }

    #[test]
    fn cancel_skips_assignment_and_settings() {
        let mut settings = MemorySettings::default();
        settings.set(GAIN_COLOR_KEY, "#123456".to_string());
        let mut renderer = RecordingRenderer::default();

        let outcome = run_ideogram(
            &table(SEGMENTS),
            &ColumnNames::default(),
            &mut CancelPrompt,
            &mut settings,
            &BuiltinGenomes,
            &mut renderer,
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(renderer.calls, 0);
        assert_eq!(settings.get(GAIN_COLOR_KEY), Some("#123456"));
        assert_eq!(settings.get(LOSS_COLOR_KEY), None);
    }

    #[test]
    fn missing_columns_abort_before_prompting() {
        let mut settings = MemorySettings::default();
        let mut renderer = RecordingRenderer::default();
        let result = run_ideogram(
            &table("id\tchr\tstart\tend\n"),
            &ColumnNames::default(),
            &mut CliPrompt::default(),
            &mut settings,
            &BuiltinGenomes,
            &mut renderer,
        );

        assert_eq!(result, Err("Missing required column(s): mean".to_string()));
        assert_eq!(renderer.calls, 0);
        assert!(settings.values.is_empty());
    }

    #[test]
    fn cli_prompt_defaults_to_first_genome_and_stored_colors() {
        let genomes = vec!["hg19".to_string(), "hg38".to_string()];
        let mut settings = MemorySettings::default();
        settings.set(GAIN_COLOR_KEY, "#010203".to_string());
        settings.set(LOSS_COLOR_KEY, "#040506".to_string());
        let options = CliPrompt::default().prompt(&genomes, &settings).unwrap();
        assert_eq!(
            options,
            Some(IdeogramOptions {
                genome: "hg19".to_string(),
                gain_color: Color::rgb(1, 2, 3),
                loss_color: Color::rgb(4, 5, 6),
            })
        );
    }

    #[test]
    fn cli_prompt_rejects_unknown_genome() {
        let mut prompt = CliPrompt {
            genome: Some("mm10".to_string()),
            ..Default::default()
        };
        let settings = MemorySettings::default();
        assert_eq!(
            prompt.prompt(&["hg19".to_string()], &settings),
            Err("Unknown genome: mm10. Available genomes: hg19".to_string())
        );
        assert_eq!(
            CliPrompt::default().prompt(&[], &settings),
            Err("No genomes available".to_string())
        );
    }

    #[test]
    fn corrupt_stored_color_is_ignored_when_overridden() {
        let mut settings = MemorySettings::default();
        settings.set(GAIN_COLOR_KEY, "not-a-color".to_string());
        let mut renderer = RecordingRenderer::default();
        let mut prompt = CliPrompt {
            genome: Some("hg38".to_string()),
            gain_color: Some(Color::rgb(0, 128, 0)),
            loss_color: None,
        };

        let outcome = run_ideogram(
            &table(SEGMENTS),
            &ColumnNames::default(),
            &mut prompt,
            &mut settings,
            &BuiltinGenomes,
            &mut renderer,
        )
        .unwrap();

        assert!(matches!(outcome, Outcome::Rendered { .. }));
        assert_eq!(settings.get(GAIN_COLOR_KEY), Some("#008000"));

        settings.set(GAIN_COLOR_KEY, "not-a-color".to_string());
        let err = CliPrompt::default()
            .prompt(&["hg38".to_string()], &settings)
            .unwrap_err();
        assert!(err.starts_with("Invalid value for setting ideogram.gains.color"));
    }

    #[test]
    fn oversized_coordinates_and_row_height_are_errors() {
        let mut renderer = RecordingRenderer::default();
        let mut settings = MemorySettings::default();
        let result = run_ideogram(
            &table("id\tchr\tstart\tend\tmean\nA\tchr1\t0\t9223372036854775807\t1.0\nB\tchr1\t1\t5\t1.0\n"),
            &ColumnNames::default(),
            &mut CliPrompt::default(),
            &mut settings,
            &BuiltinGenomes,
            &mut renderer,
        );
        assert_eq!(
            result,
            Err("Row 1: coordinate '9223372036854775807' out of range in column end".to_string())
        );

        let mut settings = MemorySettings::default();
        settings.set(ROW_HEIGHT_KEY, "4294967295".to_string());
        let result = run_ideogram(
            &table(SEGMENTS),
            &ColumnNames::default(),
            &mut CliPrompt::default(),
            &mut settings,
            &BuiltinGenomes,
            &mut renderer,
        );
        assert_eq!(
            result,
            Err("Invalid value for setting ideogram.separation: 4294967295 is outside 1..=10000".to_string())
        );
        assert_eq!(renderer.calls, 0);
    }
}
