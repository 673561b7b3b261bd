use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One term of a damage roll: either a flat constant or `NdM` dice with an
/// optional per-die bonus.
///
/// The bonus is folded into every individual die face before the faces are
/// cross-summed, so `2d6+1` rolls two dice whose faces are 2..=7 and spans
/// 4..=14. The net additive shift scales with the die count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum DiceExpr {
    Constant(i64),
    Roll { count: u32, sides: u32, bonus: i64 },
}

impl DiceExpr {
    /// Every value this expression can produce, one entry per roll
    /// combination. A `Roll` yields `sides^count` entries, counted with
    /// multiplicity.
    pub fn outcomes(&self) -> Vec<i64> {
        match *self {
            DiceExpr::Constant(value) => vec![value],
            DiceExpr::Roll {
                count,
                sides,
                bonus,
            } => {
                let faces: Vec<i64> = (1..=i64::from(sides)).map(|face| face + bonus).collect();

                let mut outcomes = faces.clone();
                for _ in 1..count {
                    outcomes = outcomes
                        .iter()
                        .flat_map(|&sum| faces.iter().map(move |&face| sum + face))
                        .collect();
                }
                outcomes
            }
        }
    }

    pub fn num_outcomes(&self) -> usize {
        match *self {
            DiceExpr::Constant(_) => 1,
            DiceExpr::Roll { count, sides, .. } => (sides as usize).pow(count),
        }
    }
}

impl FromStr for DiceExpr {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::dice_parser::parse_expr(s)
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            DiceExpr::Constant(value) => write!(f, "{}", value),
            DiceExpr::Roll {
                count,
                sides,
                bonus,
            } => {
                write!(f, "{}d{}", count, sides)?;
                if bonus > 0 {
                    write!(f, "+{}", bonus)?;
                } else if bonus < 0 {
                    write!(f, "{}", bonus)?;
                }
                Ok(())
            }
        }
    }
}
