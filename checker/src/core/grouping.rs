//! Fixed-size grouping with shared-tag scoring (even more pizza).
//!
//! Items carry sets of string tags. The dataset fixes how many groups of each
//! size may be formed. A solution forms groups from distinct items; each group
//! scores the square of the number of distinct tags among its members.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::core::problem::{Problem, Range, read_in, read_index};
use crate::core::violation::{Field, Stream, Violation};
use crate::tokens::Tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupingLimits {
    pub item_count: Range,
    /// Allowed group sizes. The dataset header carries one quota per size.
    pub group_size: Range,
    pub quota: Range,
    pub tag_count: Range,
}

impl Default for GroupingLimits {
    fn default() -> Self {
        Self {
            item_count: Range::new(1, 100_000),
            group_size: Range::new(2, 4),
            quota: Range::new(0, 100_000),
            tag_count: Range::new(1, 10_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Smallest allowed group size; `quotas[0]` belongs to it.
    pub min_size: usize,
    pub quotas: Vec<u32>,
    /// Interned tag ids per item.
    pub items: Vec<Vec<u32>>,
}

impl Dataset {
    pub fn max_size(&self) -> usize {
        self.min_size + self.quotas.len() - 1
    }

    fn total_quota(&self) -> u64 {
        self.quotas.iter().map(|&quota| u64::from(quota)).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub groups: Vec<Vec<usize>>,
}

pub struct Grouping;

impl Problem for Grouping {
    type Limits = GroupingLimits;
    type Dataset = Dataset;
    type Solution = Solution;

    fn read_dataset(
        tokens: &mut Tokens<'_>,
        limits: &GroupingLimits,
    ) -> Result<Dataset, Violation> {
        let input = Stream::Input;
        let item_count = read_in(tokens, input, Field::ItemCount, limits.item_count)? as usize;

        let min_size = limits.group_size.min as usize;
        let mut quotas = Vec::new();
        for size in min_size..=limits.group_size.max as usize {
            quotas.push(read_in(tokens, input, Field::Quota { size }, limits.quota)? as u32);
        }

        let mut interned: HashMap<&str, u32> = HashMap::new();
        let mut items = Vec::with_capacity(item_count);
        for item in 0..item_count {
            let count = read_in(tokens, input, Field::TagCount { item }, limits.tag_count)?;
            let mut tags = Vec::with_capacity(count as usize);
            for position in 0..count as usize {
                let word = tokens.next_word().map_err(|cause| Violation::Truncated {
                    stream: input,
                    field: Field::Tag { item, position },
                    cause,
                })?;
                let next = interned.len() as u32;
                tags.push(*interned.entry(word).or_insert(next));
            }
            items.push(tags);
        }

        Ok(Dataset {
            min_size,
            quotas,
            items,
        })
    }

    fn read_solution(dataset: &Dataset, tokens: &mut Tokens<'_>) -> Result<Solution, Violation> {
        let output = Stream::Output;
        let count = read_in(
            tokens,
            output,
            Field::GroupCount,
            Range::new(1, dataset.total_quota() as i64),
        )? as usize;

        let mut remaining = dataset.quotas.clone();
        let mut used = vec![false; dataset.items.len()];
        let mut groups = Vec::with_capacity(count);
        for group in 0..count {
            let size = read_in(
                tokens,
                output,
                Field::GroupSize { group },
                Range::new(dataset.min_size as i64, dataset.max_size() as i64),
            )? as usize;
            let quota = &mut remaining[size - dataset.min_size];
            if *quota == 0 {
                return Err(Violation::QuotaExceeded {
                    group,
                    size,
                    quota: dataset.quotas[size - dataset.min_size],
                });
            }
            *quota -= 1;

            let mut members = Vec::with_capacity(size);
            for position in 0..size {
                let item = read_index(
                    tokens,
                    output,
                    Field::GroupItem { group, position },
                    dataset.items.len(),
                )?;
                if used[item] {
                    return Err(Violation::ItemReused {
                        group,
                        position,
                        item,
                    });
                }
                used[item] = true;
                members.push(item);
            }
            groups.push(members);
        }

        Ok(Solution { groups })
    }

    fn score(dataset: &Dataset, solution: &Solution) -> u64 {
        let mut distinct = HashSet::new();
        let mut total = 0;
        for members in &solution.groups {
            distinct.clear();
            for &item in members {
                distinct.extend(dataset.items[item].iter().copied());
            }
            let count = distinct.len() as u64;
            total += count * count;
        }
        total
    }
}
