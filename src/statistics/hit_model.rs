use serde::{Deserialize, Serialize};

use crate::statistics::pmf::Pmf;

pub const DEFAULT_CRIT_CHANCE: f64 = 0.05;

/// Every blend reserves at least this much miss mass, even for attacks that
/// cannot miss. Game-balance clamp, not a probability identity; with the
/// floor active the hit, crit and miss shares can sum to more than 1.
pub const MISS_FLOOR: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitModel {
    /// Overall chance to land the attack, crits included.
    pub p_total_hit: f64,
    pub p_crit: f64,
}

impl HitModel {
    pub fn new(p_total_hit: f64) -> Self {
        HitModel {
            p_total_hit,
            p_crit: DEFAULT_CRIT_CHANCE,
        }
    }

    pub fn with_crit_chance(p_total_hit: f64, p_crit: f64) -> Self {
        HitModel { p_total_hit, p_crit }
    }

    /// Share of attacks that hit without critting, clamped at zero when the
    /// crit chance exceeds the total hit chance.
    pub fn p_hit_regular(&self) -> f64 {
        (self.p_total_hit - self.p_crit).max(0.0)
    }

    /// Residual miss share, floored at [`MISS_FLOOR`].
    pub fn p_miss(&self) -> f64 {
        (1.0 - self.p_hit_regular() - self.p_crit).max(MISS_FLOOR)
    }

    /// Blends a regular-hit damage distribution and a critical-hit damage
    /// distribution into the final per-attack distribution.
    ///
    /// The miss share lands at damage 0, on top of whatever mass the hit
    /// distributions natively place there.
    pub fn blend(&self, base: &Pmf, crit: &Pmf) -> Pmf {
        let p_hit_regular = self.p_hit_regular();
        let mut blended = Pmf::default();

        for (&damage, &prob) in base.iter() {
            blended.add_mass(damage, prob * p_hit_regular);
        }
        for (&damage, &prob) in crit.iter() {
            blended.add_mass(damage, prob * self.p_crit);
        }
        blended.add_mass(0, self.p_miss());

        blended
    }
}
