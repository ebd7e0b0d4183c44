use std::{fmt, thread, time::Duration};

use chrono::{DateTime, Local};
use sysinfo::System;
use tracing::warn;

use crate::constants::READ_DELAY_MS;
use crate::error::{MonitorError, Result};

/// Identifier naming which system metric to sample. Fixed for the
/// process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    CpuPercent,
    MemPercent,
    BatPercent,
}

impl Tag {
    /// Unit string shown in the summary table.
    pub fn unit(&self) -> &'static str {
        "%"
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tag::CpuPercent => "CPU_PERCENT",
            Tag::MemPercent => "MEM_PERCENT",
            Tag::BatPercent => "BAT_PERCENT",
        };
        f.write_str(name)
    }
}

/// One sampled value for a tag at a point in time. Immutable once
/// produced; `value` is `None` when the lookup failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub tag: Tag,
    pub value: Option<f64>,
    pub at: DateTime<Local>,
}

impl Reading {
    pub fn ok(tag: Tag, value: f64) -> Self {
        Self {
            tag,
            value: Some(value),
            at: Local::now(),
        }
    }

    pub fn failed(tag: Tag) -> Self {
        Self {
            tag,
            value: None,
            at: Local::now(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.value.is_some()
    }
}

/// Owns the live OS handles needed to sample metrics. One instance per
/// sampling thread.
pub struct MetricSource {
    sys: System,
}

impl MetricSource {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }

    /// Sample `tag` once. Every lookup failure (missing sensor,
    /// unparsable sysfs content) is caught here and converted to a
    /// failed [`Reading`]; the reason is logged and discarded.
    pub fn read(&mut self, tag: Tag) -> Reading {
        thread::sleep(Duration::from_millis(READ_DELAY_MS));

        let looked_up = match tag {
            Tag::CpuPercent => self.cpu_percent(),
            Tag::MemPercent => self.mem_percent(),
            Tag::BatPercent => battery_percent(),
        };

        match looked_up {
            Ok(value) => Reading::ok(tag, value),
            Err(err) => {
                warn!(tag = %tag, %err, "metric lookup failed");
                Reading::failed(tag)
            }
        }
    }

    fn cpu_percent(&mut self) -> Result<f64> {
        self.sys.refresh_cpu_usage();
        let cpus = self.sys.cpus();
        if cpus.is_empty() {
            return Err(MonitorError::Metric("no CPUs reported".into()));
        }
        let total: f32 = cpus.iter().map(|c| c.cpu_usage()).sum();
        Ok(f64::from(total) / cpus.len() as f64)
    }

    fn mem_percent(&mut self) -> Result<f64> {
        self.sys.refresh_memory();
        percent_of(self.sys.used_memory(), self.sys.total_memory())
            .ok_or_else(|| MonitorError::Metric("total memory reported as zero".into()))
    }
}

/// `used / total` as a percentage, `None` when `total` is zero.
fn percent_of(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(used as f64 / total as f64 * 100.0)
}

/// Read battery charge from the Linux sysfs power-supply interface.
/// Systems without a battery (desktop, VM) have no `BAT*` entry, which
/// is the documented failure path for this tag.
fn battery_percent() -> Result<f64> {
    for name in ["BAT0", "BAT1", "BAT2"] {
        let path = std::path::Path::new("/sys/class/power_supply")
            .join(name)
            .join("capacity");
        if !path.exists() {
            continue;
        }
        let raw = std::fs::read_to_string(&path)?;
        return parse_capacity(&raw)
            .ok_or_else(|| MonitorError::Metric(format!("unparsable capacity in {name}")));
    }
    Err(MonitorError::Metric("no battery present".into()))
}

fn parse_capacity(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_constructors() {
        let ok = Reading::ok(Tag::CpuPercent, 42.5);
        assert!(ok.is_ok());
        assert_eq!(ok.value, Some(42.5));

        let failed = Reading::failed(Tag::BatPercent);
        assert!(!failed.is_ok());
        assert_eq!(failed.value, None);
    }

    #[test]
    fn tag_names_and_units() {
        assert_eq!(Tag::CpuPercent.to_string(), "CPU_PERCENT");
        assert_eq!(Tag::MemPercent.to_string(), "MEM_PERCENT");
        assert_eq!(Tag::BatPercent.unit(), "%");
    }

    #[test]
    fn percent_of_guards_zero_total() {
        assert_eq!(percent_of(1, 0), None);
        assert_eq!(percent_of(1, 4), Some(25.0));
    }

    #[test]
    fn parse_capacity_trims_and_rejects() {
        assert_eq!(parse_capacity("87\n"), Some(87.0));
        assert_eq!(parse_capacity("  100 "), Some(100.0));
        assert_eq!(parse_capacity("n/a"), None);
    }

    // Live reads never panic, for every tag: a missing sensor must come
    // back as a failed reading, a present one as a percentage.
    #[test]
    fn live_reads_are_total() {
        let mut source = MetricSource::new();
        for tag in [Tag::CpuPercent, Tag::MemPercent, Tag::BatPercent] {
            let reading = source.read(tag);
            assert_eq!(reading.tag, tag);
            if let Some(value) = reading.value {
                assert!((0.0..=100.0).contains(&value), "{tag} out of range: {value}");
            }
        }
    }
}
