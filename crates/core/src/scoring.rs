//! Scoring module - line-clear points and level progression
//!
//! Only line clears score. Points are `LINE_SCORES[rows] * level`, with level starting at 1.
//! Drops earn nothing.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Base points for clearing `rows` rows with a single lock.
///
/// More than four rows can only come from a prepared board; those score as four.
pub fn base_points(rows: usize) -> u32 {
    LINE_SCORES[rows.min(LINE_SCORES.len() - 1)]
}

/// Points awarded for clearing `rows` rows at `level`
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    base_points(rows).saturating_mul(level)
}

/// Level for a cumulative line count: 1 + one per 10 lines
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}
