//! Structured feasibility violations.
//!
//! Validators never format messages. They return a [`Violation`] carrying the
//! offending indices and values; text is produced by `Display` at the CLI
//! boundary.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::tokens::TokenError;

/// Which file a violation was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Input,
    Output,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Input => write!(f, "Input"),
            Stream::Output => write!(f, "Output"),
        }
    }
}

/// The quantity a validator was reading when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    ItemCount,
    GroupCount,
    Deadline,
    ItemValue { item: usize },
    GroupSize { group: usize },
    SetupCost { group: usize },
    Rate { group: usize },
    GroupItem { group: usize, position: usize },
    ActivationCount,
    GroupReference { entry: usize },
    EntryItemCount { entry: usize },
    EntryItem { entry: usize, position: usize },
    Capacity,
    Selection { position: usize },
    SelectionCount,
    Quota { size: usize },
    TagCount { item: usize },
    Tag { item: usize, position: usize },
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::ItemCount => write!(f, "item count"),
            Field::GroupCount => write!(f, "group count"),
            Field::Deadline => write!(f, "deadline"),
            Field::ItemValue { item } => write!(f, "value of item {}", item),
            Field::GroupSize { group } => write!(f, "size of group {}", group),
            Field::SetupCost { group } => write!(f, "setup cost of group {}", group),
            Field::Rate { group } => write!(f, "rate of group {}", group),
            Field::GroupItem { group, position } => {
                write!(f, "item at position {} of group {}", position, group)
            }
            Field::ActivationCount => write!(f, "activation count"),
            Field::GroupReference { entry } => write!(f, "group of entry {}", entry),
            Field::EntryItemCount { entry } => write!(f, "item count of entry {}", entry),
            Field::EntryItem { entry, position } => {
                write!(f, "item at position {} of entry {}", position, entry)
            }
            Field::Capacity => write!(f, "capacity"),
            Field::Selection { position } => write!(f, "selection at position {}", position),
            Field::SelectionCount => write!(f, "selection count"),
            Field::Quota { size } => write!(f, "quota for groups of size {}", size),
            Field::TagCount { item } => write!(f, "tag count of item {}", item),
            Field::Tag { item, position } => {
                write!(f, "tag at position {} of item {}", position, item)
            }
        }
    }
}

impl Field {
    /// Whether the field holds a reference to an item, group or type declared
    /// elsewhere, rather than a count or a quantity.
    pub fn is_identifier(&self) -> bool {
        matches!(
            self,
            Field::GroupItem { .. }
                | Field::GroupReference { .. }
                | Field::EntryItem { .. }
                | Field::Selection { .. }
        )
    }
}

/// Coarse classification of a [`Violation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A token was missing or unparsable where one was expected.
    Truncated,
    /// A parsed value violates its declared bound.
    OutOfRange,
    /// An identifier does not exist or is used more often than allowed.
    ReferentialIntegrity,
    /// An aggregate exceeds its ceiling.
    CapacityExceeded,
}

/// First reason a dataset or solution was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("[{stream} incorrect]: Failed to parse {field}: {cause}.")]
    Truncated {
        stream: Stream,
        field: Field,
        #[source]
        cause: TokenError,
    },

    #[error("[{stream} incorrect]: {min} <= {field} <= {max}, with {field} = {value}.")]
    OutOfRange {
        stream: Stream,
        field: Field,
        value: i64,
        min: i64,
        max: i64,
    },

    #[error(
        "[Input incorrect]: Item {item} at position {position} of group {group} is duplicate."
    )]
    DuplicateItemInGroup {
        group: usize,
        position: usize,
        item: usize,
    },

    #[error("[Input incorrect]: Total number of group items = {total} exceeds {limit}.")]
    DatasetTooLarge { total: u64, limit: u64 },

    #[error("[Input incorrect]: Value at index {index} is greater than capacity ({value} > {capacity}).")]
    ValueExceedsCapacity {
        index: usize,
        value: i64,
        capacity: i64,
    },

    #[error("[Input incorrect]: Values are not sorted, {value} at index {index} follows {previous}.")]
    Unsorted {
        index: usize,
        value: i64,
        previous: i64,
    },

    #[error("[Output incorrect]: {count} activations requested but there are only {limit} groups.")]
    TooManyActivations { count: i64, limit: usize },

    #[error(
        "[Output incorrect]: Group {group} of entry {entry} was already activated by entry {first_entry}."
    )]
    GroupReused {
        entry: usize,
        group: usize,
        first_entry: usize,
    },

    #[error(
        "[Output incorrect]: Item {item} at position {position} of entry {entry} is not in group {group}."
    )]
    ItemNotInGroup {
        entry: usize,
        position: usize,
        item: i64,
        group: usize,
    },

    #[error(
        "[Output incorrect]: Item {item} at position {position} of entry {entry} (group {group}) is duplicate."
    )]
    DuplicateItemInEntry {
        entry: usize,
        position: usize,
        item: usize,
        group: usize,
    },

    #[error(
        "[Output incorrect]: Selection {item} at position {position} duplicates position {first_position}."
    )]
    DuplicateSelection {
        position: usize,
        item: usize,
        first_position: usize,
    },

    #[error("[Output incorrect]: Total weight exceeds capacity, with total = {total}, capacity = {capacity}.")]
    CapacityExceeded { total: u64, capacity: u64 },

    #[error("[Output incorrect]: Too many groups of size {size} at group {group}, quota is {quota}.")]
    QuotaExceeded {
        group: usize,
        size: usize,
        quota: u32,
    },

    #[error(
        "[Output incorrect]: Item {item} at position {position} of group {group} was already used."
    )]
    ItemReused {
        group: usize,
        position: usize,
        item: usize,
    },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::Truncated { .. } => ViolationKind::Truncated,
            Violation::OutOfRange { field, .. } if field.is_identifier() => {
                ViolationKind::ReferentialIntegrity
            }
            Violation::OutOfRange { .. }
            | Violation::ValueExceedsCapacity { .. }
            | Violation::Unsorted { .. } => ViolationKind::OutOfRange,
            Violation::DuplicateItemInGroup { .. }
            | Violation::TooManyActivations { .. }
            | Violation::GroupReused { .. }
            | Violation::ItemNotInGroup { .. }
            | Violation::DuplicateItemInEntry { .. }
            | Violation::DuplicateSelection { .. }
            | Violation::QuotaExceeded { .. }
            | Violation::ItemReused { .. } => ViolationKind::ReferentialIntegrity,
            Violation::DatasetTooLarge { .. } | Violation::CapacityExceeded { .. } => {
                ViolationKind::CapacityExceeded
            }
        }
    }

    /// File the violation was found in.
    pub fn stream(&self) -> Stream {
        match self {
            Violation::Truncated { stream, .. } | Violation::OutOfRange { stream, .. } => *stream,
            Violation::DuplicateItemInGroup { .. }
            | Violation::DatasetTooLarge { .. }
            | Violation::ValueExceedsCapacity { .. }
            | Violation::Unsorted { .. } => Stream::Input,
            _ => Stream::Output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_offending_indices() {
        let violation = Violation::OutOfRange {
            stream: Stream::Input,
            field: Field::Rate { group: 4 },
            value: 0,
            min: 1,
            max: 100_000,
        };
        assert_eq!(
            violation.to_string(),
            "[Input incorrect]: 1 <= rate of group 4 <= 100000, with rate of group 4 = 0."
        );
    }

    #[test]
    fn renders_truncation_cause() {
        let violation = Violation::Truncated {
            stream: Stream::Output,
            field: Field::EntryItem {
                entry: 1,
                position: 2,
            },
            cause: TokenError::EndOfInput,
        };
        assert_eq!(
            violation.to_string(),
            "[Output incorrect]: Failed to parse item at position 2 of entry 1: unexpected end of file."
        );
        assert_eq!(violation.kind(), ViolationKind::Truncated);
        let source = std::error::Error::source(&violation).expect("token error source");
        assert_eq!(source.to_string(), "unexpected end of file");
    }

    #[test]
    fn classifies_into_taxonomy() {
        let reused = Violation::GroupReused {
            entry: 1,
            group: 0,
            first_entry: 0,
        };
        assert_eq!(reused.kind(), ViolationKind::ReferentialIntegrity);
        assert_eq!(reused.stream(), Stream::Output);

        let too_large = Violation::DatasetTooLarge {
            total: 2_000_000,
            limit: 1_000_000,
        };
        assert_eq!(too_large.kind(), ViolationKind::CapacityExceeded);
        assert_eq!(too_large.stream(), Stream::Input);
    }

    #[test]
    fn unknown_identifiers_are_referential() {
        let dangling = Violation::OutOfRange {
            stream: Stream::Output,
            field: Field::GroupReference { entry: 0 },
            value: 2,
            min: 0,
            max: 1,
        };
        assert_eq!(dangling.kind(), ViolationKind::ReferentialIntegrity);

        let count = Violation::OutOfRange {
            stream: Stream::Output,
            field: Field::EntryItemCount { entry: 0 },
            value: 0,
            min: 1,
            max: 4,
        };
        assert_eq!(count.kind(), ViolationKind::OutOfRange);
    }
}
