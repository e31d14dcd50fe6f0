use crate::utils::{find_columns, Chromosome, ChromosomeRegistry, Dataset, Result};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    pub chr: Chromosome,
    pub start: i64,
    pub end: i64,
    pub magnitude: f64,
}

impl Segment {
    /// Inclusive length; not validated, so inverted coordinates give `<= 0`.
    pub fn length(&self) -> i64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn class(&self) -> SegmentClass {
        if self.magnitude >= 0.0 {
            SegmentClass::Gain
        } else {
            SegmentClass::Loss
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentClass {
    Gain,
    Loss,
}

impl fmt::Display for SegmentClass {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SegmentClass::Gain => write!(formatter, "gain"),
            SegmentClass::Loss => write!(formatter, "loss"),
        }
    }
}

/// Header names of the five columns a segment table must provide.
#[derive(Debug, Clone)]
pub struct ColumnNames {
    pub id: String,
    pub chr: String,
    pub start: String,
    pub end: String,
    pub magnitude: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            chr: "chr".to_string(),
            start: "start".to_string(),
            end: "end".to_string(),
            magnitude: "mean".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentColumns {
    pub id: usize,
    pub chr: usize,
    pub start: usize,
    pub end: usize,
    pub magnitude: usize,
}

impl SegmentColumns {
    pub fn resolve<D: Dataset + ?Sized>(dataset: &D, names: &ColumnNames) -> Result<Self> {
        let indices = find_columns(
            dataset,
            &[
                names.id.as_str(),
                names.chr.as_str(),
                names.start.as_str(),
                names.end.as_str(),
                names.magnitude.as_str(),
            ],
        )?;
        Ok(Self {
            id: indices[0],
            chr: indices[1],
            start: indices[2],
            end: indices[3],
            magnitude: indices[4],
        })
    }
}

pub fn parse_segments<D, R>(
    dataset: &D,
    columns: &SegmentColumns,
    registry: &R,
    genome: &str,
) -> Result<Vec<Segment>>
where
    D: Dataset + ?Sized,
    R: ChromosomeRegistry + ?Sized,
{
    let mut segments = Vec::with_capacity(dataset.num_rows());
    for row in 0..dataset.num_rows() {
        let chr = registry
            .chromosome(genome, dataset.text(row, columns.chr))
            .map_err(|e| format!("Row {}: {}", row + 1, e))?;
        segments.push(Segment {
            id: dataset.text(row, columns.id).to_string(),
            chr,
            start: parse_position(dataset, row, columns.start)?,
            end: parse_position(dataset, row, columns.end)?,
            magnitude: parse_value(dataset, row, columns.magnitude)?,
        });
    }
    Ok(segments)
}

fn parse_value<D: Dataset + ?Sized>(dataset: &D, row: usize, col: usize) -> Result<f64> {
    let text = dataset.text(row, col);
    text.parse::<f64>().map_err(|_| {
        format!(
            "Row {}: invalid number '{}' in column {}",
            row + 1,
            text,
            dataset.header()[col]
        )
    })
}

// Real-valued coordinates are truncated toward zero. Coordinates must fit in
// 32 bits, the range the track plots are drawn in.
fn parse_position<D: Dataset + ?Sized>(dataset: &D, row: usize, col: usize) -> Result<i64> {
    let text = dataset.text(row, col);
    let position = match text.parse::<i64>() {
        Ok(position) => Some(position),
        Err(_) => {
            let value = parse_value(dataset, row, col)?;
            value.is_finite().then(|| value.trunc() as i64)
        }
    };

    match position {
        Some(position) if i32::try_from(position).is_ok() => Ok(position),
        _ => Err(format!(
            "Row {}: coordinate '{}' out of range in column {}",
            row + 1,
            text,
            dataset.header()[col]
        )),
    }
}
