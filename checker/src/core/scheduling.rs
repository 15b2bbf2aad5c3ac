//! Time-budgeted group activation schedule (book scanning).
//!
//! A dataset lists valued items and groups of items. Each group pays a setup
//! cost on a single shared clock when activated and then processes `rate`
//! items per time unit until the deadline. A solution orders activations and,
//! per activation, the items to process. Each item's value is credited at
//! most once across the whole schedule.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::problem::{Problem, Range, read_in, read_index, read_int};
use crate::core::violation::{Field, Stream, Violation};
use crate::tokens::Tokens;

/// Numeric bounds enforced on a scheduling dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulingLimits {
    pub item_count: Range,
    pub group_count: Range,
    pub deadline: Range,
    pub value: Range,
    pub group_size: Range,
    pub setup_cost: Range,
    pub rate: Range,
    /// Ceiling on the sum of all group sizes.
    pub max_total_items: u64,
}

impl Default for SchedulingLimits {
    fn default() -> Self {
        Self {
            item_count: Range::new(1, 100_000),
            group_count: Range::new(1, 100_000),
            deadline: Range::new(1, 100_000),
            value: Range::new(0, 100),
            group_size: Range::new(1, 100_000),
            setup_cost: Range::new(1, 100_000),
            rate: Range::new(1, 100_000),
            max_total_items: 1_000_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub items: Vec<usize>,
    pub setup_cost: u64,
    pub rate: u64,
    members: HashSet<usize>,
}

impl Group {
    pub fn new(items: Vec<usize>, setup_cost: u64, rate: u64) -> Self {
        let members = items.iter().copied().collect();
        Self {
            items,
            setup_cost,
            rate,
            members,
        }
    }

    pub fn contains(&self, item: usize) -> bool {
        self.members.contains(&item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub values: Vec<u64>,
    pub groups: Vec<Group>,
    pub deadline: u64,
}

/// One activation: the group and the order its items are processed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub group: usize,
    pub items: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub entries: Vec<Entry>,
}

/// What one visited entry contributed during simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryOutcome {
    pub group: usize,
    /// Clock value when the group's setup started.
    pub start: u64,
    /// Items processed before the deadline.
    pub processable: usize,
    /// Processed items not credited by an earlier entry.
    pub credited: usize,
    pub gained: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Simulation {
    /// Visited entries, in schedule order. Entries after the clock reached
    /// the deadline are absent.
    pub entries: Vec<EntryOutcome>,
    pub clock: u64,
    pub score: u64,
}

/// Replay a schedule against the shared clock.
///
/// Only setup costs advance the clock; throughput time does not.
pub fn simulate(dataset: &Dataset, solution: &Solution) -> Simulation {
    let mut credited = vec![false; dataset.values.len()];
    let mut sim = Simulation::default();

    for entry in &solution.entries {
        let group = &dataset.groups[entry.group];
        let start = sim.clock;
        let remaining = dataset
            .deadline
            .saturating_sub(start.saturating_add(group.setup_cost));
        let processable = remaining
            .saturating_mul(group.rate)
            .min(entry.items.len() as u64) as usize;

        let mut outcome = EntryOutcome {
            group: entry.group,
            start,
            processable,
            credited: 0,
            gained: 0,
        };
        for &item in &entry.items[..processable] {
            if !credited[item] {
                credited[item] = true;
                outcome.credited += 1;
                outcome.gained += dataset.values[item];
            }
        }

        sim.score += outcome.gained;
        sim.entries.push(outcome);
        sim.clock = start.saturating_add(group.setup_cost);
        if sim.clock >= dataset.deadline {
            break;
        }
    }

    sim
}

/// Time-budgeted scheduling problem.
pub struct Scheduling;

impl Problem for Scheduling {
    type Limits = SchedulingLimits;
    type Dataset = Dataset;
    type Solution = Solution;

    fn read_dataset(
        tokens: &mut Tokens<'_>,
        limits: &SchedulingLimits,
    ) -> Result<Dataset, Violation> {
        let input = Stream::Input;
        let item_count = read_in(tokens, input, Field::ItemCount, limits.item_count)? as usize;
        let group_count = read_in(tokens, input, Field::GroupCount, limits.group_count)? as usize;
        let deadline = read_in(tokens, input, Field::Deadline, limits.deadline)? as u64;

        let mut values = Vec::with_capacity(item_count);
        for item in 0..item_count {
            values.push(read_in(tokens, input, Field::ItemValue { item }, limits.value)? as u64);
        }

        let mut groups = Vec::with_capacity(group_count);
        let mut total_items: u64 = 0;
        for group in 0..group_count {
            let size = read_in(tokens, input, Field::GroupSize { group }, limits.group_size)?;
            let setup_cost = read_in(tokens, input, Field::SetupCost { group }, limits.setup_cost)?;
            let rate = read_in(tokens, input, Field::Rate { group }, limits.rate)?;

            let mut items = Vec::with_capacity(size as usize);
            let mut seen = HashSet::with_capacity(size as usize);
            for position in 0..size as usize {
                let item =
                    read_index(tokens, input, Field::GroupItem { group, position }, item_count)?;
                if !seen.insert(item) {
                    return Err(Violation::DuplicateItemInGroup {
                        group,
                        position,
                        item,
                    });
                }
                items.push(item);
            }
            total_items += size as u64;
            groups.push(Group {
                items,
                setup_cost: setup_cost as u64,
                rate: rate as u64,
                members: seen,
            });
        }

        if total_items > limits.max_total_items {
            return Err(Violation::DatasetTooLarge {
                total: total_items,
                limit: limits.max_total_items,
            });
        }

        Ok(Dataset {
            values,
            groups,
            deadline,
        })
    }

    fn read_solution(dataset: &Dataset, tokens: &mut Tokens<'_>) -> Result<Solution, Violation> {
        let output = Stream::Output;
        let group_count = dataset.groups.len();

        let count = read_int(tokens, output, Field::ActivationCount)?;
        if count < 0 {
            return Err(Violation::OutOfRange {
                stream: output,
                field: Field::ActivationCount,
                value: count,
                min: 0,
                max: group_count as i64,
            });
        }
        if count as u64 > group_count as u64 {
            return Err(Violation::TooManyActivations {
                count,
                limit: group_count,
            });
        }

        let mut activated_by: Vec<Option<usize>> = vec![None; group_count];
        let mut entries = Vec::with_capacity(count as usize);
        for entry in 0..count as usize {
            let group = read_index(tokens, output, Field::GroupReference { entry }, group_count)?;
            if let Some(first_entry) = activated_by[group] {
                return Err(Violation::GroupReused {
                    entry,
                    group,
                    first_entry,
                });
            }
            activated_by[group] = Some(entry);

            let declared = &dataset.groups[group];
            let size = read_in(
                tokens,
                output,
                Field::EntryItemCount { entry },
                Range::new(1, declared.items.len() as i64),
            )? as usize;

            let mut items = Vec::with_capacity(size);
            let mut seen = HashSet::with_capacity(size);
            for position in 0..size {
                let raw = read_int(tokens, output, Field::EntryItem { entry, position })?;
                let item = match usize::try_from(raw) {
                    Ok(item) if declared.contains(item) => item,
                    _ => {
                        return Err(Violation::ItemNotInGroup {
                            entry,
                            position,
                            item: raw,
                            group,
                        });
                    }
                };
                if !seen.insert(item) {
                    return Err(Violation::DuplicateItemInEntry {
                        entry,
                        position,
                        item,
                        group,
                    });
                }
                items.push(item);
            }
            entries.push(Entry { group, items });
        }

        Ok(Solution { entries })
    }

    fn score(dataset: &Dataset, solution: &Solution) -> u64 {
        simulate(dataset, solution).score
    }
}
