//! Label level assignment and overlap detection.
//!
//! Events never move in time. Instead, [`LevelAssigner`] stacks their
//! labels onto integer levels so that labels sharing a level do not
//! overlap horizontally.

use log::{debug, warn};

use almanac_core::geometry::Rect;

/// Result of a level assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelAssignment {
    levels: Vec<usize>,
    overflowed: Vec<usize>,
}

impl LevelAssignment {
    /// Level per event, indexed like the input positions
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Indices of events that did not fit on any level and were forced
    /// onto level 0
    pub fn overflowed(&self) -> &[usize] {
        &self.overflowed
    }

    /// Number of distinct levels in use
    pub fn level_count(&self) -> usize {
        self.levels.iter().max().map_or(0, |max| max + 1)
    }
}

/// Greedy interval-scheduling level assigner.
///
/// Each label occupies `center ± label_width / 2`, padded by `min_gap` when
/// testing against a level. Candidates are processed left to right, so
/// every level only needs to remember its rightmost occupied edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelAssigner {
    label_width: f32,
    min_gap: f32,
    max_levels: usize,
}

impl LevelAssigner {
    /// Creates an assigner. `max_levels` below 1 is treated as 1.
    pub fn new(label_width: f32, min_gap: f32, max_levels: usize) -> Self {
        Self {
            label_width,
            min_gap,
            max_levels: max_levels.max(1),
        }
    }

    pub fn max_levels(&self) -> usize {
        self.max_levels
    }

    /// Assigns a level to each label center.
    ///
    /// When a label fits on no level it wraps to `max_levels % max_levels`,
    /// which is level 0, and its index is reported as overflowed.
    pub fn assign(&self, centers: &[f32]) -> LevelAssignment {
        let mut order: Vec<usize> = (0..centers.len()).collect();
        order.sort_by(|&a, &b| centers[a].total_cmp(&centers[b]).then(a.cmp(&b)));

        let half = self.label_width / 2.0;
        let mut right_edges: Vec<Option<f32>> = vec![None; self.max_levels];
        let mut levels = vec![0; centers.len()];
        let mut overflowed = Vec::new();

        for index in order {
            let center = centers[index];
            let padded_start = center - half - self.min_gap;

            let fits = |edge: &Option<f32>| edge.is_none_or(|right| right <= padded_start);
            let level = match right_edges.iter().position(fits) {
                Some(level) => level,
                None => {
                    overflowed.push(index);
                    self.max_levels % self.max_levels
                }
            };

            let right = center + half;
            let edge = &mut right_edges[level];
            *edge = Some(edge.map_or(right, |current| current.max(right)));
            levels[index] = level;
        }

        if !overflowed.is_empty() {
            warn!(
                overflowed = overflowed.len(),
                max_levels = self.max_levels;
                "Labels exceed the available levels, stacking them on level 0"
            );
        }
        debug!(events = centers.len(), overflowed = overflowed.len(); "Levels assigned");

        LevelAssignment { levels, overflowed }
    }
}

/// Estimates how crowded a set of positions is, from 0 (sparse) to 1.
///
/// The score compares the mean gap between sorted positions to
/// `min_acceptable_gap`. Fewer than two positions score 0.
pub fn density(positions: &[f32], min_acceptable_gap: f32) -> f32 {
    if positions.len() < 2 || min_acceptable_gap <= 0.0 {
        return 0.0;
    }

    let mut sorted = positions.to_vec();
    sorted.sort_by(f32::total_cmp);
    let gaps: f32 = sorted.windows(2).map(|w| w[1] - w[0]).sum();
    let average_gap = gaps / (sorted.len() - 1) as f32;

    (1.0 - average_gap / min_acceptable_gap).clamp(0.0, 1.0)
}

/// Returns every pair `(i, j)` with `i < j` whose rectangles are closer
/// than `padding` on both axes.
pub fn detect_collisions(rects: &[Rect], padding: f32) -> Vec<(usize, usize)> {
    rects
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            rects[i + 1..]
                .iter()
                .enumerate()
                .filter(move |(_, b)| a.intersects(b, padding))
                .map(move |(offset, _)| (i, i + 1 + offset))
        })
        .collect()
}
