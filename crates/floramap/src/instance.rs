// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Plant instance grouping.
//!
//! A plant instance is a physical subject photographed multiple times,
//! identified by matching GPS coordinates across images. Grouping is by
//! exact float equality on the `(latitude, longitude)` pair: two images
//! belong to the same instance only when their GPS fixes are
//! bitwise-identical. Each distinct pair receives a dense integer id.

use crate::scan::LocatedRecord;
use std::cmp::Ordering;

// Lexicographic order on (latitude, longitude). total_cmp gives a total
// order over f64 so sorting and binary search agree on every input.
fn compare_pairs(a: &(f64, f64), b: &(f64, f64)) -> Ordering {
    a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
}

/// Assign a dense integer id to each coordinate pair.
///
/// Equal pairs receive equal ids and distinct pairs receive distinct ids
/// covering `[0, k-1]` for `k` distinct pairs, ordered by the pairs'
/// lexicographic ordering. Ids are recomputed from scratch on every call;
/// they are stable within a run but not across datasets.
pub fn encode_instances(pairs: &[(f64, f64)]) -> Vec<u32> {
    let mut unique = pairs.to_vec();
    unique.sort_by(compare_pairs);
    unique.dedup_by(|a, b| compare_pairs(a, b) == Ordering::Equal);

    pairs
        .iter()
        .map(|pair| {
            match unique.binary_search_by(|u| compare_pairs(u, pair)) {
                Ok(index) => index as u32,
                Err(_) => unreachable!("pair came from the encoded slice"),
            }
        })
        .collect()
}

/// Located image records annotated with their plant instance ids.
#[derive(Debug, Clone, Default)]
pub struct InstanceTable {
    records: Vec<LocatedRecord>,
    ids: Vec<u32>,
    count: usize,
}

impl InstanceTable {
    /// Group records into plant instances by exact coordinate match.
    pub fn from_records(records: Vec<LocatedRecord>) -> Self {
        let pairs: Vec<(f64, f64)> = records
            .iter()
            .map(|r| (r.latitude, r.longitude))
            .collect();
        let ids = encode_instances(&pairs);
        let count = ids.iter().copied().max().map_or(0, |max| max as usize + 1);
        InstanceTable {
            records,
            ids,
            count,
        }
    }

    /// The located records, in scan order.
    pub fn records(&self) -> &[LocatedRecord] {
        &self.records
    }

    /// Instance id per record, parallel to [`records`](Self::records).
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// Number of distinct plant instances.
    pub fn instance_count(&self) -> usize {
        self.count
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Species labels of every record in the given instance.
    pub fn labels_for(&self, instance: u32) -> Vec<&str> {
        self.records
            .iter()
            .zip(self.ids.iter().copied())
            .filter(|&(_, id)| id == instance)
            .map(|(record, _)| record.label.as_str())
            .collect()
    }

    /// Image count per instance, indexed by instance id.
    pub fn image_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.count];
        for &id in &self.ids {
            counts[id as usize] += 1;
        }
        counts
    }
}
