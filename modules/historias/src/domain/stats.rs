//! Reduction of a record window into reporting statistics.
//!
//! `aggregate` is a pure function: identical window and total produce an
//! identical [`Stats`], independent of anything else in the process.

use std::collections::{BTreeMap, BTreeSet};

use crate::contract::model::{DoctorCount, GenderCounts, Stats, StoredRecord};

/// How many clinicians the ranking keeps.
const TOP_DOCTORS: usize = 5;

pub fn aggregate(window: &[StoredRecord], total: u64) -> Stats {
    let mut years = BTreeSet::new();
    let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
    let mut per_month: BTreeMap<u32, u64> = BTreeMap::new();
    let mut genders = GenderCounts::default();
    // Encounter order is the tie-break for the ranking, so counts are kept
    // in a Vec rather than a map.
    let mut doctor_counts: Vec<DoctorCount> = Vec::new();
    let mut most_recent: Option<&StoredRecord> = None;

    for stored in window {
        let record = &stored.record;

        years.insert(record.year);
        *per_year.entry(record.year).or_insert(0) += 1;

        if let Some(bucket) = record.month.index() {
            *per_month.entry(bucket).or_insert(0) += 1;
        }

        if !record.doctor_last.is_empty() {
            match doctor_counts
                .iter_mut()
                .find(|d| d.name == record.doctor_last)
            {
                Some(entry) => entry.count += 1,
                None => doctor_counts.push(DoctorCount {
                    name: record.doctor_last.clone(),
                    count: 1,
                }),
            }
        }

        match record.gender.as_str() {
            "masculino" => genders.masculino += 1,
            "femenino" => genders.femenino += 1,
            _ => {}
        }

        // Strictly-greater keeps the first encountered on equal timestamps.
        if most_recent.map_or(true, |r| stored.created_at > r.created_at) {
            most_recent = Some(stored);
        }
    }

    let doctors: BTreeSet<String> = doctor_counts.iter().map(|d| d.name.clone()).collect();

    let mut top_doctors = doctor_counts;
    // Stable sort preserves encounter order among equal counts.
    top_doctors.sort_by(|a, b| b.count.cmp(&a.count));
    top_doctors.truncate(TOP_DOCTORS);

    Stats {
        total_records: total,
        years,
        per_year,
        doctors,
        per_month,
        genders,
        top_doctors,
        most_recent: most_recent.cloned(),
    }
}
