//! Dice notation used for hit points, damage and quantities.
//!
//! Supports literal amounts (`7`, `"7"`) and formulas like `"2d6"`, `"1d8+2"`,
//! `"d20"`. Content files may give either a JSON number or a string.

use core::fmt;
use core::str::FromStr;

use crate::env::RngOracle;

/// Error when parsing a dice notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    /// The notation string is empty.
    #[error("Empty dice notation")]
    Empty,

    /// Invalid format - expected N, NdM or NdM+K.
    #[error("Invalid dice notation: {0}")]
    InvalidFormat(String),

    /// Dice count must be at least 1.
    #[error("Dice count must be at least 1")]
    InvalidDiceCount,

    /// Die size must be at least 1.
    #[error("Die size must be at least 1")]
    InvalidDieSize,
}

impl crate::error::GameError for DiceError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "DICE_EMPTY",
            Self::InvalidFormat(_) => "DICE_INVALID_FORMAT",
            Self::InvalidDiceCount => "DICE_INVALID_COUNT",
            Self::InvalidDieSize => "DICE_INVALID_SIZE",
        }
    }
}

/// An amount that is either fixed or rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RollRepr", into = "RollRepr")
)]
pub enum Roll {
    /// Literal amount, returned as-is.
    Flat(u32),

    /// `count` dice with `sides` faces each, plus a signed modifier.
    Dice { count: u32, sides: u32, modifier: i32 },
}

impl Roll {
    /// Shorthand for `NdM` without modifier.
    pub const fn dice(count: u32, sides: u32) -> Self {
        Self::Dice {
            count,
            sides,
            modifier: 0,
        }
    }

    /// Resolves the amount. Negative totals saturate at 0.
    pub fn roll(&self, rng: &mut dyn RngOracle) -> u32 {
        match *self {
            Self::Flat(amount) => amount,
            Self::Dice {
                count,
                sides,
                modifier,
            } => {
                let rolled: i64 = (0..count).map(|_| i64::from(rng.roll_die(sides))).sum();
                (rolled + i64::from(modifier)).clamp(0, i64::from(u32::MAX)) as u32
            }
        }
    }

    /// Smallest value [`Roll::roll`] can return.
    pub fn min(&self) -> u32 {
        match *self {
            Self::Flat(amount) => amount,
            Self::Dice {
                count, modifier, ..
            } => (i64::from(count) + i64::from(modifier)).max(0) as u32,
        }
    }

    /// Largest value [`Roll::roll`] can return.
    pub fn max(&self) -> u32 {
        match *self {
            Self::Flat(amount) => amount,
            Self::Dice {
                count,
                sides,
                modifier,
            } => (i64::from(count) * i64::from(sides) + i64::from(modifier)).max(0) as u32,
        }
    }
}

impl Default for Roll {
    fn default() -> Self {
        Self::Flat(1)
    }
}

impl From<u32> for Roll {
    fn from(amount: u32) -> Self {
        Self::Flat(amount)
    }
}

impl FromStr for Roll {
    type Err = DiceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim().to_ascii_lowercase();
        if input.is_empty() {
            return Err(DiceError::Empty);
        }

        let Some(d_pos) = input.find('d') else {
            return input
                .parse::<u32>()
                .map(Self::Flat)
                .map_err(|_| DiceError::InvalidFormat(input.clone()));
        };

        let count_str = &input[..d_pos];
        let count: u32 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DiceError::InvalidFormat(format!("invalid dice count '{count_str}'")))?
        };
        if count == 0 {
            return Err(DiceError::InvalidDiceCount);
        }

        let after_d = &input[d_pos + 1..];
        let (sides_str, modifier) = match after_d.find(['+', '-']) {
            Some(0) => {
                return Err(DiceError::InvalidFormat(format!(
                    "invalid die size '{after_d}'"
                )));
            }
            Some(pos) => {
                let modifier: i32 = after_d[pos..].parse().map_err(|_| {
                    DiceError::InvalidFormat(format!("invalid modifier '{}'", &after_d[pos..]))
                })?;
                (&after_d[..pos], modifier)
            }
            None => (after_d, 0),
        };

        let sides: u32 = sides_str
            .parse()
            .map_err(|_| DiceError::InvalidFormat(format!("invalid die size '{sides_str}'")))?;
        if sides == 0 {
            return Err(DiceError::InvalidDieSize);
        }

        Ok(Self::Dice {
            count,
            sides,
            modifier,
        })
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Flat(amount) => write!(f, "{amount}"),
            Self::Dice {
                count,
                sides,
                modifier: 0,
            } => write!(f, "{count}d{sides}"),
            Self::Dice {
                count,
                sides,
                modifier,
            } => write!(f, "{count}d{sides}{modifier:+}"),
        }
    }
}

/// Wire form: JSON number or notation string.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RollRepr {
    Number(u32),
    Text(String),
}

#[cfg(feature = "serde")]
impl TryFrom<RollRepr> for Roll {
    type Error = DiceError;

    fn try_from(repr: RollRepr) -> Result<Self, Self::Error> {
        match repr {
            RollRepr::Number(amount) => Ok(Self::Flat(amount)),
            RollRepr::Text(text) => text.parse(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<Roll> for RollRepr {
    fn from(roll: Roll) -> Self {
        match roll {
            Roll::Flat(amount) => Self::Number(amount),
            other => Self::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn parses_literals_and_notation() {
        assert_eq!("7".parse::<Roll>(), Ok(Roll::Flat(7)));
        assert_eq!(" 2d6 ".parse::<Roll>(), Ok(Roll::dice(2, 6)));
        assert_eq!("d20".parse::<Roll>(), Ok(Roll::dice(1, 20)));
        assert_eq!(
            "1d8+2".parse::<Roll>(),
            Ok(Roll::Dice {
                count: 1,
                sides: 8,
                modifier: 2
            })
        );
        assert_eq!(
            "3D4-1".parse::<Roll>(),
            Ok(Roll::Dice {
                count: 3,
                sides: 4,
                modifier: -1
            })
        );
    }

    #[test]
    fn rejects_malformed_notation() {
        assert_eq!("".parse::<Roll>(), Err(DiceError::Empty));
        assert_eq!("0d6".parse::<Roll>(), Err(DiceError::InvalidDiceCount));
        assert_eq!("2d0".parse::<Roll>(), Err(DiceError::InvalidDieSize));
        assert!(matches!(
            "abc".parse::<Roll>(),
            Err(DiceError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2d-3".parse::<Roll>(),
            Err(DiceError::InvalidFormat(_))
        ));
    }

    #[test]
    fn literal_rolls_exactly() {
        let mut rng = PcgRng::new(1);
        assert_eq!(Roll::Flat(20).roll(&mut rng), 20);
        assert_eq!("12".parse::<Roll>().unwrap().roll(&mut rng), 12);
    }

    #[test]
    fn dice_stay_within_bounds() {
        let mut rng = PcgRng::new(42);
        for (count, sides) in [(1, 6), (2, 6), (3, 8), (5, 12), (1, 1)] {
            let roll = Roll::dice(count, sides);
            for _ in 0..200 {
                let value = roll.roll(&mut rng);
                assert!(
                    (count..=count * sides).contains(&value),
                    "{roll} produced {value}"
                );
            }
        }
    }

    #[test]
    fn negative_modifier_saturates_at_zero() {
        let mut rng = PcgRng::new(3);
        let roll: Roll = "1d2-5".parse().unwrap();
        assert_eq!(roll.min(), 0);
        assert_eq!(roll.roll(&mut rng), 0);
    }

    #[test]
    fn display_round_trips_notation() {
        assert_eq!(Roll::dice(2, 6).to_string(), "2d6");
        assert_eq!("1d8+2".parse::<Roll>().unwrap().to_string(), "1d8+2");
        assert_eq!("1d8-2".parse::<Roll>().unwrap().to_string(), "1d8-2");
        assert_eq!(Roll::Flat(4).to_string(), "4");
    }
}
