use super::segment::{Segment, SegmentClass};
use crate::utils::Chromosome;
use itertools::Itertools;
use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashMap},
};

/// Horizontal line from `(x1, y1)` to `(x2, y2)`; `y1 == y2` is the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRect {
    pub x1: i64,
    pub y1: i32,
    pub x2: i64,
    pub y2: i32,
}

pub type BucketKey = (Chromosome, SegmentClass);

#[derive(Debug, Default)]
struct Bucket {
    rects: Vec<SegmentRect>,
    num_tracks: usize,
}

/// Track-assigned segments grouped by chromosome and class.
#[derive(Debug, Default)]
pub struct TrackLayout {
    buckets: BTreeMap<BucketKey, Bucket>,
}

impl TrackLayout {
    /// Rectangles of a bucket in input order; empty if the bucket has no segments.
    pub fn rects(&self, chr: &Chromosome, class: SegmentClass) -> &[SegmentRect] {
        self.buckets
            .get(&(chr.clone(), class))
            .map(|bucket| bucket.rects.as_slice())
            .unwrap_or(&[])
    }

    pub fn track_count(&self, chr: &Chromosome, class: SegmentClass) -> usize {
        self.buckets
            .get(&(chr.clone(), class))
            .map_or(0, |bucket| bucket.num_tracks)
    }

    /// Vertical axis limits enclosing every track of a bucket with one track
    /// of headroom: `(0, k + 1)` for gains and `(-k - 1, 0)` for losses.
    pub fn y_limits(&self, chr: &Chromosome, class: SegmentClass) -> Option<(i32, i32)> {
        let k = self.track_count(chr, class) as i32;
        if k == 0 {
            return None;
        }
        match class {
            SegmentClass::Gain => Some((0, k + 1)),
            SegmentClass::Loss => Some((-k - 1, 0)),
        }
    }

    /// Buckets in chromosome order, gains before losses.
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &[SegmentRect])> {
        self.buckets
            .iter()
            .map(|(key, bucket)| (key, bucket.rects.as_slice()))
    }

    pub fn chromosomes(&self) -> impl Iterator<Item = &Chromosome> {
        self.buckets.keys().map(|(chr, _)| chr).dedup()
    }

    /// Total number of rectangles over all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(|bucket| bucket.rects.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

pub fn assign_tracks(segments: &[Segment]) -> TrackLayout {
    let mut members: BTreeMap<BucketKey, Vec<usize>> = BTreeMap::new();
    for (index, segment) in segments.iter().enumerate() {
        members
            .entry((segment.chr.clone(), segment.class()))
            .or_default()
            .push(index);
    }

    let buckets = members
        .into_iter()
        .map(|(key, indices)| {
            let bucket = assign_bucket(segments, &indices, key.1);
            log::debug!(
                "{} {}: {} segments on {} tracks",
                key.0,
                key.1,
                bucket.rects.len(),
                bucket.num_tracks
            );
            (key, bucket)
        })
        .collect();

    TrackLayout { buckets }
}

// Longest segments claim tracks first. The sort is stable, so equal lengths
// keep input order. Output rectangles stay in input order.
fn assign_bucket(segments: &[Segment], indices: &[usize], class: SegmentClass) -> Bucket {
    let mut order: Vec<usize> = (0..indices.len()).collect();
    order.sort_by_key(|&pos| Reverse(segments[indices[pos]].length()));

    let mut table: HashMap<&str, i32> = HashMap::new();
    let mut tracks = vec![0; indices.len()];
    for pos in order {
        let next_track = table.len() as i32 + 1;
        tracks[pos] = *table
            .entry(segments[indices[pos]].id.as_str())
            .or_insert(next_track);
    }

    let sign = match class {
        SegmentClass::Gain => 1,
        SegmentClass::Loss => -1,
    };
    let rects = indices
        .iter()
        .zip(tracks)
        .map(|(&index, track)| {
            let segment = &segments[index];
            SegmentRect {
                x1: segment.start,
                y1: sign * track,
                x2: segment.end,
                y2: sign * track,
            }
        })
        .collect();

    Bucket {
        rects,
        num_tracks: table.len(),
    }
}
