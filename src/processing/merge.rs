/*! Corpus merging

Documents are extracted concurrently and independently, and the same article
often shows up in several exports. Merging:
1. concatenates the batches, in document order,
1. removes records that are equal on every field,
1. removes records whose identity key (title, journal, date) was already seen,
   exports of the same article often differ only in header details (word count...),
1. sorts by epoch.

In both passes the first occurrence, in document order, wins.

Undated records come first, and records are otherwise ordered by `(epoch, arrival index)`,
which is a total order: merging the same batches always yields the same corpus.
!*/
use std::collections::HashSet;
use std::ops::Deref;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pivot::Pivot;

/// Deduplicated, epoch-ordered list of [Pivot]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus(Vec<Pivot>);

impl Corpus {
    pub fn into_inner(self) -> Vec<Pivot> {
        self.0
    }
}

impl Deref for Corpus {
    type Target = [Pivot];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Merge record batches into a [Corpus].
pub fn merge(batches: Vec<Vec<Pivot>>) -> Corpus {
    let nb_batches = batches.len();
    let records: Vec<Pivot> = batches.into_iter().flatten().collect();
    let nb_records = records.len();

    // first occurrence wins
    let mut seen = HashSet::with_capacity(nb_records);
    let mut keys = HashSet::with_capacity(nb_records);
    let mut unique: Vec<(usize, Pivot)> = Vec::with_capacity(nb_records);
    for (idx, record) in records.into_iter().enumerate() {
        if seen.contains(&record) {
            debug!("dropping duplicate record {:?}", record.title);
            continue;
        }
        seen.insert(record.clone());

        if !keys.insert(record.identity_key()) {
            debug!("dropping record with known identity {:?}", record.title);
            continue;
        }
        unique.push((idx, record));
    }

    // None < Some(_), and arrival indices are unique.
    unique.par_sort_unstable_by_key(|(idx, record)| (record.epoch(), *idx));

    info!(
        "merged {} batches: {} records, {} after deduplication",
        nb_batches,
        nb_records,
        unique.len()
    );

    Corpus(unique.into_iter().map(|(_, record)| record).collect())
}
