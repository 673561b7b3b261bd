use std::collections::BTreeMap;

use derive_more::IntoIterator;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Exact probability mass function over integer damage values.
///
/// Probabilities are the relative frequencies of an outcome multiset,
/// rounded to two decimal places independently per key. The rounding error
/// is observable: the stored masses may sum to slightly more or less than
/// 1.0 (a uniform d6 stores six entries of 0.17). Downstream consumers rely
/// on these exact rounded values, so the map is never renormalized.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, IntoIterator)]
#[serde(transparent)]
pub struct Pmf {
    probabilities: BTreeMap<i64, f64>,
}

impl Pmf {
    /// Counts an outcome multiset into a probability mapping.
    pub fn from_outcomes(outcomes: &[i64]) -> Result<Self, EngineError> {
        if outcomes.is_empty() {
            return Err(EngineError::EmptyOutcomes);
        }

        let mut counts: BTreeMap<i64, u64> = BTreeMap::new();
        for &value in outcomes {
            *counts.entry(value).or_insert(0) += 1;
        }

        let total = outcomes.len() as f64;
        let probabilities = counts
            .into_iter()
            .map(|(value, count)| (value, round_mass(count as f64 / total)))
            .collect();

        Ok(Pmf { probabilities })
    }

    pub fn mass_at(&self, value: i64) -> f64 {
        self.probabilities.get(&value).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&i64, &f64)> {
        self.probabilities.iter()
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all stored masses. Drifts from 1.0 by the accumulated
    /// per-key rounding error.
    pub fn total_mass(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Expected value under the stored (rounded) masses.
    pub fn mean(&self) -> f64 {
        self.probabilities
            .iter()
            .map(|(&value, &prob)| value as f64 * prob)
            .sum()
    }

    pub(crate) fn add_mass(&mut self, value: i64, mass: f64) {
        *self.probabilities.entry(value).or_insert(0.0) += mass;
    }
}

impl FromIterator<(i64, f64)> for Pmf {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        Pmf {
            probabilities: iter.into_iter().collect(),
        }
    }
}

fn round_mass(mass: f64) -> f64 {
    (mass * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use statrs::assert_almost_eq;

    use super::*;

    #[test]
    fn test_uniform_d6() {
        let pmf = Pmf::from_outcomes(&[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(pmf.len(), 6);
        for value in 1..=6 {
            assert_almost_eq!(pmf.mass_at(value), 0.17, f64::EPSILON);
        }
        // six keys rounded up independently overshoot 1.0 by 0.02
        assert_almost_eq!(pmf.total_mass(), 1.02, 1e-9);
    }

    #[test]
    fn test_counts_multiplicity() {
        let pmf = Pmf::from_outcomes(&[2, 3, 3, 4]).unwrap();
        assert_almost_eq!(pmf.mass_at(2), 0.25, f64::EPSILON);
        assert_almost_eq!(pmf.mass_at(3), 0.5, f64::EPSILON);
        assert_almost_eq!(pmf.mass_at(4), 0.25, f64::EPSILON);
        assert_eq!(pmf.mass_at(5), 0.0);
    }

    #[test]
    fn test_empty_outcomes_rejected() {
        assert_eq!(Pmf::from_outcomes(&[]), Err(EngineError::EmptyOutcomes));
    }

    #[test]
    fn test_keys_match_distinct_inputs() {
        let outcomes = [5, 5, 5, 9, 9, 12];
        let pmf = Pmf::from_outcomes(&outcomes).unwrap();
        let keys: Vec<i64> = pmf.iter().map(|(&value, _)| value).collect();
        assert_eq!(keys, vec![5, 9, 12]);
        for (_, &prob) in pmf.iter() {
            assert!(prob >= 0.0 && prob <= 1.0);
        }
    }

    #[test]
    fn test_mean() {
        let pmf = Pmf::from_outcomes(&[1, 2, 3, 4]).unwrap();
        assert_almost_eq!(pmf.mean(), 2.5, 1e-9);
    }

    #[test]
    fn test_serializes_transparently() {
        let pmf = Pmf::from_outcomes(&[1, 1, 2, 2]).unwrap();
        let json = serde_json::to_string(&pmf).unwrap();
        assert_eq!(json, r#"{"1":0.5,"2":0.5}"#);
    }
}
