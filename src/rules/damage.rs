use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCategory {
    Vulnerability,
    Ordinary,
    Stability,
}

impl DamageCategory {
    /// Applies the category's scaling rule to one combined outcome:
    /// vulnerability doubles, stability floor-halves, ordinary passes
    /// through.
    pub fn transform(&self, value: i64) -> i64 {
        match self {
            DamageCategory::Vulnerability => value * 2,
            DamageCategory::Ordinary => value,
            DamageCategory::Stability => value.div_euclid(2),
        }
    }
}

/// One attack's damage recipe: dice expressions grouped by category, plus a
/// flat modifier added once to every final outcome.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackProfile {
    pub vulnerability: Vec<String>,
    pub ordinary: Vec<String>,
    pub stability: Vec<String>,
    pub modifier: i64,
}

impl AttackProfile {
    pub fn expressions(&self, category: DamageCategory) -> &[String] {
        match category {
            DamageCategory::Vulnerability => &self.vulnerability,
            DamageCategory::Ordinary => &self.ordinary,
            DamageCategory::Stability => &self.stability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vulnerability_doubles() {
        assert_eq!(DamageCategory::Vulnerability.transform(3), 6);
        assert_eq!(DamageCategory::Vulnerability.transform(0), 0);
    }

    #[test]
    fn test_ordinary_passes_through() {
        assert_eq!(DamageCategory::Ordinary.transform(5), 5);
    }

    #[test]
    fn test_stability_floor_halves() {
        assert_eq!(DamageCategory::Stability.transform(7), 3);
        assert_eq!(DamageCategory::Stability.transform(6), 3);
        // floor division, not truncation
        assert_eq!(DamageCategory::Stability.transform(-3), -2);
    }

    #[test]
    fn test_profile_round_trips_through_json() {
        let profile = AttackProfile {
            vulnerability: vec!["1d6".to_string()],
            ordinary: vec!["2d8+1".to_string(), "3".to_string()],
            stability: vec![],
            modifier: 2,
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: AttackProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
