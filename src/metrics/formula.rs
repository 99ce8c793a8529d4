//! Formula selection and "no data" propagation.
//!
//! Inputs are `Option<f64>`; `None` is "no data" and yields `None` out of
//! every formula that reads it.

use super::aat::{single_level_aat, three_level_with_victim_aat, two_level_aat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which AAT formula a run applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Formula {
    /// No derived access time (miss-rate studies)
    #[default]
    None,
    SingleLevel,
    TwoLevel,
    ThreeLevelVictim,
}

impl Formula {
    pub fn requires_l2(&self) -> bool {
        matches!(self, Self::TwoLevel | Self::ThreeLevelVictim)
    }

    pub fn requires_victim(&self) -> bool {
        matches!(self, Self::ThreeLevelVictim)
    }

    /// Evaluate the formula; `None` when any input it reads is missing
    pub fn evaluate(&self, inputs: &AatInputs, mem_penalty: f64) -> Option<f64> {
        match self {
            Self::None => None,
            Self::SingleLevel => Some(single_level_aat(inputs.l1_hit?, inputs.l1_miss_rate?, mem_penalty)),
            Self::TwoLevel => {
                let (l2_hit, l2_miss_rate) = inputs.l2.timing()?;
                Some(two_level_aat(
                    inputs.l1_hit?,
                    inputs.l1_miss_rate?,
                    l2_hit,
                    l2_miss_rate,
                    mem_penalty,
                ))
            }
            Self::ThreeLevelVictim => {
                let (l2_hit, l2_miss_rate) = inputs.l2.timing()?;
                let (victim_hit, swap_request_rate) = inputs.victim.timing()?;
                Some(three_level_with_victim_aat(
                    inputs.l1_hit?,
                    inputs.l1_miss_rate?,
                    l2_hit,
                    l2_miss_rate,
                    mem_penalty,
                    victim_hit,
                    swap_request_rate,
                ))
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::SingleLevel => "single-level",
            Self::TwoLevel => "two-level",
            Self::ThreeLevelVictim => "three-level-victim",
        };
        write!(f, "{}", name)
    }
}

/// What an L1 miss falls through to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NextLevel {
    /// No L2 in this configuration; misses go straight to memory
    Memory,
    Cache {
        hit: Option<f64>,
        miss_rate: Option<f64>,
    },
}

impl NextLevel {
    /// (hit time, miss rate) of the level below L1
    ///
    /// Memory is modelled as a zero-latency level that always misses, so
    /// the two-level formula collapses to the single-level one.
    fn timing(&self) -> Option<(f64, f64)> {
        match self {
            Self::Memory => Some((0.0, 1.0)),
            Self::Cache { hit, miss_rate } => Some(((*hit)?, (*miss_rate)?)),
        }
    }
}

/// Victim cache contribution to the L1 access path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VictimTerm {
    /// No victim cache in this configuration
    Absent,
    Present {
        hit: Option<f64>,
        swap_request_rate: Option<f64>,
    },
}

impl VictimTerm {
    fn timing(&self) -> Option<(f64, f64)> {
        match self {
            Self::Absent => Some((0.0, 0.0)),
            Self::Present {
                hit,
                swap_request_rate,
            } => Some(((*hit)?, (*swap_request_rate)?)),
        }
    }
}

/// Enriched values a formula reads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AatInputs {
    pub l1_hit: Option<f64>,
    pub l1_miss_rate: Option<f64>,
    pub l2: NextLevel,
    pub victim: VictimTerm,
}

/// Sum of component areas; any missing part poisons the total
pub fn total_area<I>(parts: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    parts.into_iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> AatInputs {
        AatInputs {
            l1_hit: Some(1.0),
            l1_miss_rate: Some(0.1),
            l2: NextLevel::Cache {
                hit: Some(2.0),
                miss_rate: Some(0.5),
            },
            victim: VictimTerm::Present {
                hit: Some(0.2),
                swap_request_rate: Some(0.05),
            },
        }
    }

    #[test]
    fn test_formula_none_never_produces_a_value() {
        assert_eq!(Formula::None.evaluate(&inputs(), 20.0), None);
    }

    #[test]
    fn test_each_formula() {
        let i = inputs();
        assert!((Formula::SingleLevel.evaluate(&i, 20.0).unwrap() - 3.0).abs() < 1e-12);
        assert!((Formula::TwoLevel.evaluate(&i, 20.0).unwrap() - 2.2).abs() < 1e-12);
        assert!((Formula::ThreeLevelVictim.evaluate(&i, 20.0).unwrap() - 2.21).abs() < 1e-12);
    }

    #[test]
    fn test_missing_l1_hit_propagates() {
        let i = AatInputs {
            l1_hit: None,
            ..inputs()
        };
        assert_eq!(Formula::SingleLevel.evaluate(&i, 20.1), None);
        assert_eq!(Formula::TwoLevel.evaluate(&i, 20.1), None);
        assert_eq!(Formula::ThreeLevelVictim.evaluate(&i, 20.1), None);
    }

    #[test]
    fn test_missing_l2_hit_propagates() {
        let i = AatInputs {
            l2: NextLevel::Cache {
                hit: None,
                miss_rate: Some(0.5),
            },
            ..inputs()
        };
        assert!(Formula::SingleLevel.evaluate(&i, 20.1).is_some());
        assert_eq!(Formula::TwoLevel.evaluate(&i, 20.1), None);
    }

    #[test]
    fn test_missing_victim_hit_propagates() {
        let i = AatInputs {
            victim: VictimTerm::Present {
                hit: None,
                swap_request_rate: Some(0.1),
            },
            ..inputs()
        };
        assert!(Formula::TwoLevel.evaluate(&i, 20.1).is_some());
        assert_eq!(Formula::ThreeLevelVictim.evaluate(&i, 20.1), None);
    }

    #[test]
    fn test_absent_levels_reduce_to_simpler_formulas() {
        let i = AatInputs {
            l2: NextLevel::Memory,
            victim: VictimTerm::Absent,
            ..inputs()
        };
        let single = Formula::SingleLevel.evaluate(&i, 20.1).unwrap();
        assert!((Formula::TwoLevel.evaluate(&i, 20.1).unwrap() - single).abs() < 1e-12);
        assert!((Formula::ThreeLevelVictim.evaluate(&i, 20.1).unwrap() - single).abs() < 1e-12);
    }

    #[test]
    fn test_total_area() {
        assert_eq!(total_area([Some(1.0), Some(2.5), Some(0.0)]), Some(3.5));
        assert_eq!(total_area([Some(1.0), None]), None);
    }

    #[test]
    fn test_formula_requirements() {
        assert!(!Formula::SingleLevel.requires_l2());
        assert!(Formula::TwoLevel.requires_l2());
        assert!(!Formula::TwoLevel.requires_victim());
        assert!(Formula::ThreeLevelVictim.requires_victim());
    }
}
