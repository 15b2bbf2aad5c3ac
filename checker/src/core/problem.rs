//! The parse/validate/score seam shared by every problem variant.

use serde::Deserialize;

use crate::core::violation::{Field, Stream, Violation};
use crate::tokens::Tokens;

/// Inclusive numeric bound for a dataset field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

/// A contest problem: how to read its dataset, validate a solution against
/// it, and score that solution.
///
/// `read_solution` is only called with a dataset returned by `read_dataset`,
/// and `score` only with a solution returned by `read_solution`.
pub trait Problem {
    type Limits;
    type Dataset;
    type Solution;

    fn read_dataset(
        tokens: &mut Tokens<'_>,
        limits: &Self::Limits,
    ) -> Result<Self::Dataset, Violation>;

    fn read_solution(
        dataset: &Self::Dataset,
        tokens: &mut Tokens<'_>,
    ) -> Result<Self::Solution, Violation>;

    fn score(dataset: &Self::Dataset, solution: &Self::Solution) -> u64;
}

/// Run the full pipeline on in-memory texts. The first violation wins.
pub fn evaluate<P: Problem>(
    input: &str,
    output: &str,
    limits: &P::Limits,
) -> Result<u64, Violation> {
    let dataset = P::read_dataset(&mut Tokens::new(input), limits)?;
    let solution = P::read_solution(&dataset, &mut Tokens::new(output))?;
    Ok(P::score(&dataset, &solution))
}

pub(crate) fn read_int(
    tokens: &mut Tokens<'_>,
    stream: Stream,
    field: Field,
) -> Result<i64, Violation> {
    tokens.next_int().map_err(|cause| Violation::Truncated {
        stream,
        field,
        cause,
    })
}

pub(crate) fn check_range(
    stream: Stream,
    field: Field,
    value: i64,
    range: Range,
) -> Result<i64, Violation> {
    if !range.contains(value) {
        return Err(Violation::OutOfRange {
            stream,
            field,
            value,
            min: range.min,
            max: range.max,
        });
    }
    Ok(value)
}

pub(crate) fn read_in(
    tokens: &mut Tokens<'_>,
    stream: Stream,
    field: Field,
    range: Range,
) -> Result<i64, Violation> {
    let value = read_int(tokens, stream, field)?;
    check_range(stream, field, value, range)
}

/// Read an identifier that must index into a collection of `len` elements.
pub(crate) fn read_index(
    tokens: &mut Tokens<'_>,
    stream: Stream,
    field: Field,
    len: usize,
) -> Result<usize, Violation> {
    let value = read_in(tokens, stream, field, Range::new(0, len as i64 - 1))?;
    Ok(value as usize)
}
