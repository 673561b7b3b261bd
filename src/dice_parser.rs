use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, opt, recognize, verify},
    sequence::{pair, preceded},
};

use crate::{error::EngineError, rules::dice::DiceExpr};

pub fn parse_expr(input: &str) -> Result<DiceExpr, EngineError> {
    let res = all_consuming(dice_expr).parse(input);

    match res {
        Ok((_, expr)) => Ok(expr),
        Err(_) => Err(EngineError::Parse(input.to_string())),
    }
}

fn dice_expr(input: &str) -> IResult<&str, DiceExpr> {
    alt((roll, constant)).parse(input)
}

fn roll(input: &str) -> IResult<&str, DiceExpr> {
    let (input, (count, sides, bonus)) = (
        opt(positive_u32),
        preceded(char('d'), positive_u32),
        opt(pair(
            alt((char('+'), char('-'))),
            map_res(digit1, |s: &str| s.parse::<i64>()),
        )),
    )
        .parse(input)?;

    let bonus = match bonus {
        Some(('+', value)) => value,
        Some(('-', value)) => -value,
        None => 0,
        _ => unreachable!(),
    };

    Ok((
        input,
        DiceExpr::Roll {
            count: count.unwrap_or(1),
            sides,
            bonus,
        },
    ))
}

fn constant(input: &str) -> IResult<&str, DiceExpr> {
    map(
        map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
            s.parse::<i64>()
        }),
        DiceExpr::Constant,
    )
    .parse(input)
}

// die counts and die sizes must be at least 1
fn positive_u32(input: &str) -> IResult<&str, u32> {
    verify(map_res(digit1, |s: &str| s.parse::<u32>()), |&value| {
        value > 0
    })
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_roll() {
        let expected = DiceExpr::Roll {
            count: 2,
            sides: 6,
            bonus: 3,
        };
        assert_eq!(parse_expr("2d6+3").unwrap(), expected);
    }

    #[test]
    fn test_parse_negative_bonus() {
        let expected = DiceExpr::Roll {
            count: 4,
            sides: 10,
            bonus: -2,
        };
        assert_eq!(parse_expr("4d10-2").unwrap(), expected);
    }

    #[test]
    fn test_parse_count_defaults_to_one() {
        let expected = DiceExpr::Roll {
            count: 1,
            sides: 8,
            bonus: 0,
        };
        assert_eq!(parse_expr("d8").unwrap(), expected);
    }

    #[test]
    fn test_parse_constant() {
        assert_eq!(parse_expr("7").unwrap(), DiceExpr::Constant(7));
        assert_eq!(parse_expr("-3").unwrap(), DiceExpr::Constant(-3));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "abc", "2d", "d", "2x6", "1d6++2", "2d6+1-1", "1d6 "] {
            assert!(parse_expr(input).is_err(), "expected failure for {input:?}");
        }
    }

    #[test]
    fn test_parse_rejects_degenerate_dice() {
        for input in ["0d6", "1d0", "0d0"] {
            assert!(parse_expr(input).is_err(), "expected failure for {input:?}");
        }
    }
}
