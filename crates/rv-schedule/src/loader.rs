//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per schedule entry.  `cycle_minutes` is optional; when the column
//! is absent or empty the caller's default cycle is used.
//!
//! ```csv
//! entity_id,start_minute,end_minute,activity,region,location,cycle_minutes
//! 1,1320,360,sleep,0,0,1440
//! 1,360,420,prepare,0,1,1440
//! 1,420,480,eat,0,2,1440
//! 2,480,1020,work,1,4,
//! ```
//!
//! Entities absent from the CSV receive an empty `Schedule`.  Rows naming an
//! entity outside `0..entity_count` are skipped with a warning.  If rows for
//! one entity disagree on `cycle_minutes`, the first row wins.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use rv_core::{LocationId, Place, RegionId};

use crate::{Schedule, ScheduleEntry, ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScheduleRecord {
    entity_id:     u32,
    start_minute:  u32,
    end_minute:    u32,
    activity:      String,
    region:        u32,
    location:      u32,
    #[serde(default)]
    cycle_minutes: Option<u32>,
}

impl ScheduleRecord {
    fn entry(self) -> ScheduleEntry {
        ScheduleEntry::new(
            self.start_minute,
            self.end_minute,
            self.activity.trim(),
            Place::new(RegionId(self.region), LocationId(self.location)),
        )
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-entity schedules from a CSV file.
///
/// Returns a `Vec` of length `entity_count`, indexed by `EntityId`.
pub fn load_schedules_csv(
    path: &Path,
    entity_count: usize,
    default_cycle: u32,
) -> ScheduleResult<Vec<Schedule>> {
    let file = std::fs::File::open(path)?;
    load_schedules_reader(file, entity_count, default_cycle)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
pub fn load_schedules_reader<R: Read>(
    reader: R,
    entity_count: usize,
    default_cycle: u32,
) -> ScheduleResult<Vec<Schedule>> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_entity: BTreeMap<u32, (Option<u32>, Vec<ScheduleEntry>)> = BTreeMap::new();

    for (line, result) in csv_reader.deserialize::<ScheduleRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if row.entity_id as usize >= entity_count {
            warn!(line = line + 2, entity_id = row.entity_id, entity_count, "schedule row for unknown entity skipped");
            continue;
        }
        let slot = by_entity.entry(row.entity_id).or_insert((row.cycle_minutes, Vec::new()));
        if let (Some(first), Some(this)) = (slot.0, row.cycle_minutes) {
            if first != this {
                warn!(entity_id = row.entity_id, first, this, "conflicting cycle_minutes; keeping the first");
            }
        }
        slot.0 = slot.0.or(row.cycle_minutes);
        slot.1.push(row.entry());
    }

    // ── Build one Schedule per entity ─────────────────────────────────────
    let schedules = (0..entity_count as u32)
        .map(|i| match by_entity.remove(&i) {
            None => Schedule::empty(),
            Some((cycle, entries)) => Schedule::new(entries, cycle.unwrap_or(default_cycle)),
        })
        .collect();

    Ok(schedules)
}
