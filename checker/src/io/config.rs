//! Checker limits configuration (TOML).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::core::grouping::GroupingLimits;
use crate::core::packing::PackingLimits;
use crate::core::problem::Range;
use crate::core::scheduling::SchedulingLimits;

/// Numeric bounds for every problem variant.
///
/// Missing sections and fields fall back to the contest defaults, so an empty
/// file is a valid config.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CheckerConfig {
    pub scheduling: SchedulingLimits,
    pub packing: PackingLimits,
    pub grouping: GroupingLimits,
}

impl CheckerConfig {
    pub fn validate(&self) -> Result<()> {
        let s = &self.scheduling;
        ensure_range("scheduling.item_count", s.item_count, 0)?;
        ensure_range("scheduling.group_count", s.group_count, 0)?;
        ensure_range("scheduling.deadline", s.deadline, 0)?;
        ensure_range("scheduling.value", s.value, 0)?;
        ensure_range("scheduling.group_size", s.group_size, 0)?;
        ensure_range("scheduling.setup_cost", s.setup_cost, 0)?;
        ensure_range("scheduling.rate", s.rate, 1)?;
        if s.max_total_items == 0 {
            return Err(anyhow!("scheduling.max_total_items must be > 0"));
        }

        let p = &self.packing;
        ensure_range("packing.capacity", p.capacity, 0)?;
        ensure_range("packing.item_count", p.item_count, 0)?;

        let g = &self.grouping;
        ensure_range("grouping.item_count", g.item_count, 0)?;
        ensure_range("grouping.group_size", g.group_size, 1)?;
        ensure_range("grouping.quota", g.quota, 0)?;
        ensure_range("grouping.tag_count", g.tag_count, 0)?;
        if g.quota.max > i64::from(u32::MAX) {
            return Err(anyhow!("grouping.quota.max must fit in 32 bits"));
        }
        Ok(())
    }
}

fn ensure_range(name: &str, range: Range, floor: i64) -> Result<()> {
    if range.is_empty() {
        return Err(anyhow!(
            "{name} is empty (min {} > max {})",
            range.min,
            range.max
        ));
    }
    if range.min < floor {
        return Err(anyhow!("{name}.min must be >= {floor}"));
    }
    Ok(())
}

/// Load and validate config from a TOML file. The file must exist.
pub fn load_config(path: &Path) -> Result<CheckerConfig> {
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Parse and validate config from TOML text.
pub fn parse_config(contents: &str) -> Result<CheckerConfig> {
    let cfg: CheckerConfig = toml::from_str(contents).context("deserialize config toml")?;
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_config(&temp.path().join("missing.toml")).expect_err("missing");
        assert!(format!("{err:#}").contains("missing.toml"));
    }

    #[test]
    fn load_empty_file_gives_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("checker.toml");
        fs::write(&path, "").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg, CheckerConfig::default());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg = parse_config(
            r#"
[scheduling]
deadline = { min = 1, max = 10 }
"#,
        )
        .expect("parse");
        assert_eq!(cfg.scheduling.deadline, Range::new(1, 10));
        assert_eq!(cfg.scheduling.value, SchedulingLimits::default().value);
        assert_eq!(cfg.packing, PackingLimits::default());
    }

    #[test]
    fn rejects_inverted_range() {
        let err = parse_config(
            r#"
[packing]
capacity = { min = 10, max = 1 }
"#,
        )
        .expect_err("inverted");
        assert!(err.to_string().contains("packing.capacity"));
    }

    #[test]
    fn rejects_zero_group_size() {
        let err = parse_config(
            r#"
[grouping]
group_size = { min = 0, max = 3 }
"#,
        )
        .expect_err("zero size");
        assert!(err.to_string().contains("grouping.group_size.min"));
    }

    #[test]
    fn rejects_zero_rate() {
        let err = parse_config(
            r#"
[scheduling]
rate = { min = 0, max = 5 }
"#,
        )
        .expect_err("zero rate");
        assert!(err.to_string().contains("scheduling.rate.min"));
    }
}
