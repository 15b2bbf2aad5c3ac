//! Capacity-bounded selection (more pizza).
//!
//! The dataset is a capacity and a sorted list of weights. A solution selects
//! distinct weights whose sum stays within the capacity; the sum is the score.

use serde::Deserialize;

use crate::core::problem::{Problem, Range, check_range, read_in, read_index, read_int};
use crate::core::violation::{Field, Stream, Violation};
use crate::tokens::Tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PackingLimits {
    pub capacity: Range,
    pub item_count: Range,
}

impl Default for PackingLimits {
    fn default() -> Self {
        Self {
            capacity: Range::new(1, 1_000_000_000),
            item_count: Range::new(1, 100_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub capacity: u64,
    /// Non-decreasing, each at most `capacity`.
    pub weights: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub selected: Vec<usize>,
    /// Sum of the selected weights, checked against the capacity.
    pub total: u64,
}

pub struct Packing;

impl Problem for Packing {
    type Limits = PackingLimits;
    type Dataset = Dataset;
    type Solution = Solution;

    fn read_dataset(
        tokens: &mut Tokens<'_>,
        limits: &PackingLimits,
    ) -> Result<Dataset, Violation> {
        let input = Stream::Input;
        let capacity = read_in(tokens, input, Field::Capacity, limits.capacity)?;
        let count = read_in(tokens, input, Field::ItemCount, limits.item_count)? as usize;

        let mut weights = Vec::with_capacity(count);
        let mut previous = 0;
        for index in 0..count {
            let weight = read_int(tokens, input, Field::ItemValue { item: index })?;
            if weight > capacity {
                return Err(Violation::ValueExceedsCapacity {
                    index,
                    value: weight,
                    capacity,
                });
            }
            check_range(
                input,
                Field::ItemValue { item: index },
                weight,
                Range::new(0, capacity),
            )?;
            if weight < previous {
                return Err(Violation::Unsorted {
                    index,
                    value: weight,
                    previous,
                });
            }
            previous = weight;
            weights.push(weight as u64);
        }

        Ok(Dataset {
            capacity: capacity as u64,
            weights,
        })
    }

    fn read_solution(dataset: &Dataset, tokens: &mut Tokens<'_>) -> Result<Solution, Violation> {
        let output = Stream::Output;
        let count = dataset.weights.len();
        let selections = read_in(
            tokens,
            output,
            Field::SelectionCount,
            Range::new(0, count as i64),
        )? as usize;

        let mut first_seen: Vec<Option<usize>> = vec![None; count];
        let mut selected = Vec::with_capacity(selections);
        let mut total: u64 = 0;
        for position in 0..selections {
            let item = read_index(tokens, output, Field::Selection { position }, count)?;
            if let Some(first_position) = first_seen[item] {
                return Err(Violation::DuplicateSelection {
                    position,
                    item,
                    first_position,
                });
            }
            first_seen[item] = Some(position);
            selected.push(item);
            total += dataset.weights[item];
        }

        if total > dataset.capacity {
            return Err(Violation::CapacityExceeded {
                total,
                capacity: dataset.capacity,
            });
        }

        Ok(Solution { selected, total })
    }

    fn score(_dataset: &Dataset, solution: &Solution) -> u64 {
        solution.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::problem::evaluate;
    use crate::core::violation::ViolationKind;

    const SAMPLE_INPUT: &str = "17 4\n2 5 6 8\n";

    fn run(output: &str) -> Result<u64, Violation> {
        evaluate::<Packing>(SAMPLE_INPUT, output, &PackingLimits::default())
    }

    #[test]
    fn scores_weight_sum() {
        assert_eq!(run("3\n0 2 3\n"), Ok(16));
    }

    #[test]
    fn selecting_everything_is_allowed_when_it_fits() {
        let input = "30 3\n1 2 3\n";
        let score = evaluate::<Packing>(input, "3\n2 1 0\n", &PackingLimits::default());
        assert_eq!(score, Ok(6));
    }

    #[test]
    fn empty_selection_scores_zero() {
        assert_eq!(run("0\n"), Ok(0));
    }

    #[test]
    fn rejects_capacity_overflow() {
        let err = run("3\n1 2 3\n").expect_err("over capacity");
        assert_eq!(
            err,
            Violation::CapacityExceeded {
                total: 19,
                capacity: 17
            }
        );
        assert_eq!(err.kind(), ViolationKind::CapacityExceeded);
    }

    #[test]
    fn rejects_duplicate_selection() {
        let err = run("2\n1 1\n").expect_err("duplicate");
        assert_eq!(
            err,
            Violation::DuplicateSelection {
                position: 1,
                item: 1,
                first_position: 0
            }
        );
    }

    #[test]
    fn rejects_selection_out_of_range() {
        let err = run("1\n4\n").expect_err("unknown type");
        assert_eq!(err.kind(), ViolationKind::ReferentialIntegrity);
        let err = run("5\n0 1 2 3 0\n").expect_err("too many");
        assert!(matches!(
            err,
            Violation::OutOfRange {
                field: Field::SelectionCount,
                ..
            }
        ));
    }

    #[test]
    fn rejects_unsorted_weights() {
        let err = evaluate::<Packing>("10 3\n1 5 4\n", "0\n", &PackingLimits::default())
            .expect_err("unsorted");
        assert_eq!(
            err,
            Violation::Unsorted {
                index: 2,
                value: 4,
                previous: 5
            }
        );
    }

    #[test]
    fn rejects_weight_above_capacity() {
        let err = evaluate::<Packing>("4 2\n1 5\n", "0\n", &PackingLimits::default())
            .expect_err("too heavy");
        assert_eq!(
            err,
            Violation::ValueExceedsCapacity {
                index: 1,
                value: 5,
                capacity: 4
            }
        );
    }
}
