use super::segment::SegmentClass;
use super::tracks::{SegmentRect, TrackLayout};
use crate::utils::{Chromosome, ChromosomeRegistry, Color, Result, ROW_HEIGHT_KEY};
use std::fmt;

const CYTOBAND_HEIGHT: u32 = 24;
const LEFT_MARGIN: u32 = 100;
const OFFSET: u32 = 10;
const GRID_COLUMNS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Gains,
    Cytobands,
    Losses,
}

impl PanelKind {
    pub fn class(self) -> Option<SegmentClass> {
        match self {
            PanelKind::Gains => Some(SegmentClass::Gain),
            PanelKind::Losses => Some(SegmentClass::Loss),
            PanelKind::Cytobands => None,
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PanelKind::Gains => write!(formatter, "gains"),
            PanelKind::Cytobands => write!(formatter, "cytobands"),
            PanelKind::Losses => write!(formatter, "losses"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertAlign {
    Top,
    Center,
    Bottom,
}

impl fmt::Display for VertAlign {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VertAlign::Top => write!(formatter, "top"),
            VertAlign::Center => write!(formatter, "center"),
            VertAlign::Bottom => write!(formatter, "bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    pub chr: Chromosome,
    pub kind: PanelKind,
    pub width: u32,
    pub height: u32,
    pub x_limits: (u64, u64),
    pub y_limits: Option<(i32, i32)>,
    pub align: VertAlign,
    pub margins: Margins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    pub plot_width: u32,
    pub row_height: u32,
}

/// Everything a renderer needs to draw the ideogram grid.
#[derive(Debug)]
pub struct IdeogramFigure {
    pub genome: String,
    pub gain_color: Color,
    pub loss_color: Color,
    pub panels: Vec<Panel>,
    pub tracks: TrackLayout,
}

impl IdeogramFigure {
    pub fn color(&self, class: SegmentClass) -> Color {
        match class {
            SegmentClass::Gain => self.gain_color,
            SegmentClass::Loss => self.loss_color,
        }
    }

    /// Segments drawn in a panel; cytoband strips carry none.
    pub fn rects(&self, panel: &Panel) -> &[SegmentRect] {
        match panel.kind.class() {
            Some(class) => self.tracks.rects(&panel.chr, class),
            None => &[],
        }
    }

    pub fn num_rows(&self) -> usize {
        self.panels.iter().map(|p| p.row + 1).max().unwrap_or(0)
    }
}

/// Lays out gains, cytobands and losses of every primary chromosome in a
/// two-column grid. Panel widths are proportional to chromosome length,
/// relative to the first (longest) chromosome of the genome.
pub fn layout_figure<R: ChromosomeRegistry + ?Sized>(
    tracks: TrackLayout,
    registry: &R,
    genome: &str,
    params: LayoutParams,
    colors: (Color, Color),
) -> Result<IdeogramFigure> {
    let chromosomes = registry.chromosomes(genome)?;
    let sizes = chromosomes
        .iter()
        .map(|chr| {
            registry
                .size(genome, chr)
                .ok_or_else(|| format!("No size for {} in genome {}", chr, genome))
        })
        .collect::<Result<Vec<u64>>>()?;

    let max_length = match sizes.first() {
        Some(&size) if size > 0 => size,
        _ => return Err(format!("Genome {} has no chromosomes", genome)),
    };

    let skipped: usize = tracks
        .iter()
        .filter(|((chr, _), _)| !chromosomes.contains(chr))
        .map(|(_, rects)| rects.len())
        .sum();
    if skipped > 0 {
        log::warn!(
            "{} segments lie outside the primary chromosomes of {} and are not laid out",
            skipped,
            genome
        );
    }

    let half = chromosomes.len().div_ceil(GRID_COLUMNS);
    let mut panels = Vec::with_capacity(chromosomes.len() * 3);
    for i in 0..half {
        for (offset, kind) in [PanelKind::Gains, PanelKind::Cytobands, PanelKind::Losses]
            .into_iter()
            .enumerate()
        {
            for col in 0..GRID_COLUMNS {
                let index = i + col * half;
                if index >= chromosomes.len() {
                    continue;
                }
                let chr = &chromosomes[index];
                let size = sizes[index];
                let width = (params.plot_width as f64 * size as f64 / max_length as f64) as u32;
                panels.push(create_panel(
                    &tracks,
                    chr,
                    kind,
                    (3 * i + offset, col),
                    (width, size),
                    params.row_height,
                )?);
            }
        }
    }

    log::debug!("Laid out {} panels for {}", panels.len(), genome);

    Ok(IdeogramFigure {
        genome: genome.to_string(),
        gain_color: colors.0,
        loss_color: colors.1,
        panels,
        tracks,
    })
}

fn create_panel(
    tracks: &TrackLayout,
    chr: &Chromosome,
    kind: PanelKind,
    (row, col): (usize, usize),
    (width, size): (u32, u64),
    row_height: u32,
) -> Result<Panel> {
    let mut margins = Margins {
        top: 0,
        left: LEFT_MARGIN,
        bottom: 0,
        right: OFFSET,
    };

    let (height, y_limits, align) = match kind.class() {
        Some(class) => {
            let num_tracks = tracks.track_count(chr, class).max(1);
            let height = u32::try_from(num_tracks)
                .ok()
                .and_then(|n| row_height.checked_mul(n))
                .ok_or_else(|| {
                    format!(
                        "Panel height of {} {} overflows: {} tracks of height {} (setting {})",
                        chr, class, num_tracks, row_height, ROW_HEIGHT_KEY
                    )
                })?;
            let align = match class {
                SegmentClass::Gain => VertAlign::Bottom,
                SegmentClass::Loss => {
                    margins.bottom = OFFSET;
                    VertAlign::Top
                }
            };
            (height, tracks.y_limits(chr, class), align)
        }
        None => (CYTOBAND_HEIGHT, Some((0, 1)), VertAlign::Center),
    };

    Ok(Panel {
        row,
        col,
        chr: chr.clone(),
        kind,
        width,
        height,
        x_limits: (0, size),
        y_limits,
        align,
        margins,
    })
}
