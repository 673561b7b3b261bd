use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::{
    error::EngineError,
    rules::{
        damage::{AttackProfile, DamageCategory},
        dice::DiceExpr,
    },
    statistics::pmf::Pmf,
};

/// Result of aggregating one damage category: the distribution of each
/// expression on its own, plus the combined outcome multiset of all
/// expressions rolled together.
#[derive(Debug, Default, Clone)]
pub struct ComponentOutcomes {
    pub distributions: FxHashMap<String, Pmf>,
    pub combined: Vec<i64>,
}

/// Expands every expression in one category and cross-sums their outcome
/// lists in input order. An empty expression list yields an empty combined
/// multiset; the composer substitutes `[0]` for it.
pub fn aggregate_component(expressions: &[String]) -> Result<ComponentOutcomes, EngineError> {
    let mut distributions = FxHashMap::default();
    let mut combined: Option<Vec<i64>> = None;

    for expr in expressions {
        let parsed: DiceExpr = expr.parse()?;
        let outcomes = parsed.outcomes();
        distributions.insert(expr.clone(), Pmf::from_outcomes(&outcomes)?);

        combined = Some(match combined {
            None => outcomes,
            Some(acc) => cross_sum(&acc, &outcomes),
        });
    }

    Ok(ComponentOutcomes {
        distributions,
        combined: combined.unwrap_or_default(),
    })
}

fn cross_sum(lhs: &[i64], rhs: &[i64]) -> Vec<i64> {
    lhs.iter()
        .flat_map(|&x| rhs.iter().map(move |&y| x + y))
        .collect()
}

/// Per-category distributions of each individual expression, plus the final
/// joint distribution over every combination of the three categories.
///
/// The per-category maps hold the raw per-expression distributions; the
/// category transforms only affect the joint `all` distribution.
#[derive(Debug, Default, Clone, Serialize)]
pub struct DamageBreakdown {
    pub vulnerability: FxHashMap<String, Pmf>,
    pub ordinary: FxHashMap<String, Pmf>,
    pub stability: FxHashMap<String, Pmf>,
    pub all: Pmf,
}

/// Composes an attack profile into its full damage breakdown.
///
/// Each category is aggregated independently, scaled by its transform, and
/// defaulted to the single outcome `0` when it holds no expressions. The
/// joint distribution is built over the Cartesian product of the three
/// transformed outcome lists, with the flat modifier added to every
/// combination.
pub fn compose(profile: &AttackProfile) -> Result<DamageBreakdown, EngineError> {
    let vulnerability = aggregate_component(profile.expressions(DamageCategory::Vulnerability))?;
    let ordinary = aggregate_component(profile.expressions(DamageCategory::Ordinary))?;
    let stability = aggregate_component(profile.expressions(DamageCategory::Stability))?;

    let vuln_values = transform_or_zero(DamageCategory::Vulnerability, vulnerability.combined);
    let ord_values = transform_or_zero(DamageCategory::Ordinary, ordinary.combined);
    let stab_values = transform_or_zero(DamageCategory::Stability, stability.combined);

    let num_combinations = vuln_values.len() * ord_values.len() * stab_values.len();
    log::debug!("composing {} damage combinations", num_combinations);

    let mut totals = Vec::with_capacity(num_combinations);
    for &vuln in &vuln_values {
        for &ord in &ord_values {
            for &stab in &stab_values {
                totals.push(vuln + ord + stab + profile.modifier);
            }
        }
    }

    Ok(DamageBreakdown {
        vulnerability: vulnerability.distributions,
        ordinary: ordinary.distributions,
        stability: stability.distributions,
        all: Pmf::from_outcomes(&totals)?,
    })
}

fn transform_or_zero(category: DamageCategory, values: Vec<i64>) -> Vec<i64> {
    if values.is_empty() {
        return vec![0];
    }
    values
        .into_iter()
        .map(|value| category.transform(value))
        .collect()
}
