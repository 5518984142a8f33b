//! Conditional requirements gating actions and effects.
//!
//! Content writes requirements as `"type:value[:value...]"` strings. They are
//! parsed once at load time into [`Requirement`] and evaluated against an
//! [`Entity`] with [`Requirement::holds`].

use core::fmt;
use core::str::FromStr;

use crate::state::Entity;

/// A single parsed requirement. A requirement list holds when every entry holds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum Requirement {
    /// `condition:X` - the entity has condition X.
    Condition(String),

    /// `status:X[,Y...]` - the entity has an active status of any listed type.
    Status(Vec<String>),

    /// `item:X` - the inventory holds item X.
    Item(String),

    /// `is:X` - the entity has fact X.
    Is(String),

    /// Anything else, kept raw for diagnostics. Always fails.
    Unknown(String),
}

impl Requirement {
    pub fn holds(&self, entity: &Entity) -> bool {
        match self {
            Self::Condition(condition) => entity.has_condition(condition),
            Self::Status(types) => entity.has_status(types),
            Self::Item(item) => entity.inventory.has_item(item),
            Self::Is(fact) => entity.has_fact(fact),
            Self::Unknown(raw) => {
                tracing::warn!(requirement = %raw, "unknown requirement type");
                false
            }
        }
    }

    /// Evaluates a requirement list with logical AND. Empty lists hold.
    pub fn all_hold(requirements: &[Requirement], entity: &Entity) -> bool {
        requirements.iter().all(|requirement| requirement.holds(entity))
    }
}

impl FromStr for Requirement {
    type Err = core::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((kind, value)) = raw.split_once(':') else {
            return Ok(Self::Unknown(raw.to_string()));
        };
        Ok(match kind {
            "condition" => Self::Condition(value.to_string()),
            "status" => Self::Status(
                value
                    .split([',', ':'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            ),
            "item" => Self::Item(value.to_string()),
            "is" => Self::Is(value.to_string()),
            _ => Self::Unknown(raw.to_string()),
        })
    }
}

impl From<String> for Requirement {
    fn from(raw: String) -> Self {
        match raw.parse() {
            Ok(requirement) => requirement,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Requirement {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Requirement> for String {
    fn from(requirement: Requirement) -> Self {
        requirement.to_string()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition(value) => write!(f, "condition:{value}"),
            Self::Status(types) => write!(f, "status:{}", types.join(",")),
            Self::Item(value) => write!(f, "item:{value}"),
            Self::Is(value) => write!(f, "is:{value}"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_types() {
        assert_eq!(
            Requirement::from("condition:stunned"),
            Requirement::Condition("stunned".into())
        );
        assert_eq!(
            Requirement::from("status:poison,burning"),
            Requirement::Status(vec!["poison".into(), "burning".into()])
        );
        assert_eq!(
            Requirement::from("status:poison:burning"),
            Requirement::Status(vec!["poison".into(), "burning".into()])
        );
        assert_eq!(
            Requirement::from("item:ammo/arrow"),
            Requirement::Item("ammo/arrow".into())
        );
        assert_eq!(Requirement::from("is:unarmed"), Requirement::Is("unarmed".into()));
    }

    #[test]
    fn unknown_types_keep_raw_text() {
        assert_eq!(
            Requirement::from("level:3"),
            Requirement::Unknown("level:3".into())
        );
        assert_eq!(Requirement::from("nonsense"), Requirement::Unknown("nonsense".into()));
        assert_eq!(Requirement::from("level:3").to_string(), "level:3");
    }
}
