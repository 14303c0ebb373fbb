//! Stable text form of a pattern, used to store and compare secrets.
//!
//! When every dot id fits in one decimal digit (grids up to 3x3) the pattern is
//! one digit per dot (`row * size + column`). Larger grids use comma separated ids.

use itertools::Itertools;

use super::{Dot, DotGrid};
use crate::error::{PatternLockError, Result};

pub fn uses_single_digits(grid_size: usize) -> bool {
    grid_size * grid_size <= 10
}

pub fn pattern_to_string(pattern: &[Dot], grid_size: usize) -> String {
    let mut ids = pattern.iter().map(|dot| dot.id(grid_size));
    if uses_single_digits(grid_size) {
        ids.map(|id| id.to_string()).collect()
    } else {
        ids.join(",")
    }
}

pub fn string_to_pattern(input: &str, grid: &DotGrid) -> Result<Vec<Dot>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<usize> = if uses_single_digits(grid.size()) {
        input
            .chars()
            .map(|ch| {
                ch.to_digit(10)
                    .map(|digit| digit as usize)
                    .ok_or_else(|| invalid(input, format!("unexpected character {:?}", ch)))
            })
            .collect::<Result<_>>()?
    } else {
        input
            .split(',')
            .map(|token| {
                token
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid(input, format!("unexpected token {:?}", token)))
            })
            .collect::<Result<_>>()?
    };
    if let Some(id) = ids.iter().duplicates().next() {
        return Err(invalid(input, format!("dot id {} appears more than once", id)));
    }
    ids.into_iter().map(|id| grid.of_id(id)).collect()
}

fn invalid(input: &str, reason: String) -> PatternLockError {
    PatternLockError::InvalidPatternString {
        input: input.to_string(),
        reason,
    }
}
