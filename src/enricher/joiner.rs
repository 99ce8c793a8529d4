//! Join of sample rows against the characteristics indexes.
//!
//! One pass per run: every row gets per-level access time and area,
//! then its AAT and total area are derived from those values.

use super::index::{
    CharacteristicsIndex, CharacteristicsKey, LevelCharacteristics, LookupStatus, VictimIndex,
};
use crate::loader::{LevelSample, SampleRow};
use crate::metrics::{total_area, AatInputs, Formula, NextLevel, VictimTerm};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which cache structures a run joins and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hierarchy {
    #[default]
    #[serde(rename = "l1")]
    L1,
    #[serde(rename = "l1-l2")]
    L1L2,
    #[serde(rename = "l1-l2-victim")]
    L1L2Victim,
}

impl Hierarchy {
    pub fn has_l2(&self) -> bool {
        matches!(self, Self::L1L2 | Self::L1L2Victim)
    }

    pub fn has_victim(&self) -> bool {
        matches!(self, Self::L1L2Victim)
    }
}

impl fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::L1 => "l1",
            Self::L1L2 => "l1-l2",
            Self::L1L2Victim => "l1-l2-victim",
        };
        write!(f, "{}", name)
    }
}

/// A sample row with attached characteristics and derived metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRow {
    pub sample: SampleRow,
    pub l1: LevelCharacteristics,
    pub l2: Option<LevelCharacteristics>,
    pub victim: Option<LevelCharacteristics>,
    /// Average access time; `None` is "no data"
    pub aat: Option<f64>,
    /// Area summed over the configured levels; `None` is "no data"
    pub total_area: Option<f64>,
}

impl EnrichedRow {
    /// Statuses of every configured level, labelled
    pub fn lookups(&self) -> impl Iterator<Item = (&'static str, LookupStatus)> + '_ {
        std::iter::once(("l1", self.l1.status))
            .chain(self.l2.iter().map(|l| ("l2", l.status)))
            .chain(self.victim.iter().map(|l| ("victim", l.status)))
    }
}

/// Settings for the join and derive pass
#[derive(Debug, Clone, Copy)]
pub struct EnrichOptions {
    pub hierarchy: Hierarchy,
    pub formula: Formula,
    /// Block size used as the third component of every cache lookup key
    pub block_size: u64,
    pub mem_penalty_ns: f64,
}

/// Joins samples against the indexes and applies the configured formula
pub struct Enricher<'a> {
    characteristics: &'a CharacteristicsIndex,
    victim: &'a VictimIndex,
    options: EnrichOptions,
}

impl<'a> Enricher<'a> {
    pub fn new(
        characteristics: &'a CharacteristicsIndex,
        victim: &'a VictimIndex,
        options: EnrichOptions,
    ) -> Self {
        Self {
            characteristics,
            victim,
            options,
        }
    }

    /// Enrich every row, preserving input order
    pub fn enrich(&self, samples: Vec<SampleRow>) -> Vec<EnrichedRow> {
        debug!(
            "Enriching {} rows (hierarchy {}, formula {}, block size {})",
            samples.len(),
            self.options.hierarchy,
            self.options.formula,
            self.options.block_size
        );

        samples.into_iter().map(|s| self.enrich_row(s)).collect()
    }

    /// Enrich a single row
    pub fn enrich_row(&self, sample: SampleRow) -> EnrichedRow {
        let l1 = self.lookup_level(&sample.l1);

        let l2 = if self.options.hierarchy.has_l2() {
            Some(match &sample.l2 {
                Some(level) if level.size_bytes == 0 => LevelCharacteristics::absent(),
                Some(level) => self.lookup_level(level),
                None => LevelCharacteristics::miss(),
            })
        } else {
            None
        };

        let victim = if self.options.hierarchy.has_victim() {
            Some(match &sample.victim {
                Some(vc) if vc.entries == 0 => LevelCharacteristics::absent(),
                Some(vc) => self.victim.lookup(&vc.entries),
                None => LevelCharacteristics::miss(),
            })
        } else {
            None
        };

        let inputs = aat_inputs(&sample, &l1, l2.as_ref(), victim.as_ref());
        let aat = self
            .options
            .formula
            .evaluate(&inputs, self.options.mem_penalty_ns);

        let area = total_area(
            std::iter::once(l1.area)
                .chain(l2.iter().map(|l| l.area))
                .chain(victim.iter().map(|v| v.area)),
        );

        EnrichedRow {
            sample,
            l1,
            l2,
            victim,
            aat,
            total_area: area,
        }
    }

    fn lookup_level(&self, level: &LevelSample) -> LevelCharacteristics {
        let key = CharacteristicsKey::for_sample(
            level.size_bytes,
            level.assoc_code,
            self.options.block_size,
        );
        self.characteristics.lookup(&key)
    }
}

/// Collect the values the formulas read from an enriched row
fn aat_inputs(
    sample: &SampleRow,
    l1: &LevelCharacteristics,
    l2: Option<&LevelCharacteristics>,
    victim: Option<&LevelCharacteristics>,
) -> AatInputs {
    let next = match l2 {
        None => NextLevel::Memory,
        Some(chars) if chars.is_absent() => NextLevel::Memory,
        Some(chars) => NextLevel::Cache {
            hit: chars.access_time_ns,
            miss_rate: sample.l2.as_ref().and_then(|l| l.miss_rate),
        },
    };

    let victim_term = match victim {
        None => VictimTerm::Absent,
        Some(chars) if chars.is_absent() => VictimTerm::Absent,
        Some(chars) => VictimTerm::Present {
            hit: chars.access_time_ns,
            swap_request_rate: sample.victim.as_ref().and_then(|v| v.swap_request_rate),
        },
    };

    AatInputs {
        l1_hit: l1.access_time_ns,
        l1_miss_rate: sample.l1.miss_rate,
        l2: next,
        victim: victim_term,
    }
}
