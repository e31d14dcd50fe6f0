use super::layout::IdeogramFigure;
use super::workflow::Renderer;
use crate::utils::{create_writer, open_tsv_writer, Result};
use itertools::Itertools;
use std::io::Write;

/// Writes the figure as two tables: `<prefix>.segments.tsv` with every
/// track-assigned segment and `<prefix>.panels.tsv` with the grid geometry.
pub struct TsvRenderer {
    output_prefix: String,
}

impl TsvRenderer {
    pub fn new(output_prefix: &str) -> Self {
        Self {
            output_prefix: output_prefix.to_string(),
        }
    }

    fn write_segments<W: Write>(figure: &IdeogramFigure, writer: &mut W) -> Result<()> {
        writeln!(writer, "chrom\tclass\tcolor\tx1\ty1\tx2\ty2").map_err(|e| e.to_string())?;
        for ((chr, class), rects) in figure.tracks.iter() {
            let color = figure.color(*class);
            for rect in rects {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    chr, class, color, rect.x1, rect.y1, rect.x2, rect.y2
                )
                .map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }

    fn write_panels<W: Write>(figure: &IdeogramFigure, writer: &mut W) -> Result<()> {
        writeln!(
            writer,
            "row\tcol\tchrom\tkind\twidth\theight\tx_max\ty_min\ty_max\talign\tmargins"
        )
        .map_err(|e| e.to_string())?;
        for panel in &figure.panels {
            let (y_min, y_max) = match panel.y_limits {
                Some((min, max)) => (min.to_string(), max.to_string()),
                None => (".".to_string(), ".".to_string()),
            };
            let margins = [
                panel.margins.top,
                panel.margins.left,
                panel.margins.bottom,
                panel.margins.right,
            ]
            .iter()
            .join(",");
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                panel.row,
                panel.col,
                panel.chr,
                panel.kind,
                panel.width,
                panel.height,
                panel.x_limits.1,
                y_min,
                y_max,
                panel.align,
                margins
            )
            .map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

impl Renderer for TsvRenderer {
    fn render(&mut self, figure: &IdeogramFigure) -> Result<()> {
        let mut segments_writer = create_writer(&self.output_prefix, "segments.tsv", open_tsv_writer)?;
        Self::write_segments(figure, &mut segments_writer)?;
        segments_writer.flush().map_err(|e| e.to_string())?;

        let mut panels_writer = create_writer(&self.output_prefix, "panels.tsv", open_tsv_writer)?;
        Self::write_panels(figure, &mut panels_writer)?;
        panels_writer.flush().map_err(|e| e.to_string())?;

        log::info!(
            "Wrote {} segments and {} panels with prefix {}",
            figure.tracks.len(),
            figure.panels.len(),
            self.output_prefix
        );
        Ok(())
    }
}
