//! Age gate: bracket selection mapped to an age category.

use serde::{Deserialize, Serialize};

/// Coarse age bucket sent to the backend to scope assistant content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeCategory {
    BabyCare,
    ChildServices,
    Preteen,
    TeenSupport,
    AdultServices,
}

impl AgeCategory {
    /// Map an age in years to its category.
    pub fn for_age(age: u8) -> Self {
        match age {
            0..=3 => Self::BabyCare,
            4..=9 => Self::ChildServices,
            10..=12 => Self::Preteen,
            13..=17 => Self::TeenSupport,
            _ => Self::AdultServices,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BabyCare => "BABY_CARE",
            Self::ChildServices => "CHILD_SERVICES",
            Self::Preteen => "PRETEEN",
            Self::TeenSupport => "TEEN_SUPPORT",
            Self::AdultServices => "ADULT_SERVICES",
        }
    }
}

impl std::fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed, ordered set of brackets offered by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "0-3")]
    Infant,
    #[serde(rename = "4-9")]
    Child,
    #[serde(rename = "10-12")]
    Preteen,
    #[serde(rename = "13-17")]
    Teen,
    #[serde(rename = "18+")]
    Adult,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::Infant,
        AgeBracket::Child,
        AgeBracket::Preteen,
        AgeBracket::Teen,
        AgeBracket::Adult,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Infant => "0-3",
            Self::Child => "4-9",
            Self::Preteen => "10-12",
            Self::Teen => "13-17",
            Self::Adult => "18+",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Infant => "Baby care",
            Self::Child => "Child services",
            Self::Preteen => "Pre-teen",
            Self::Teen => "Teen support",
            Self::Adult => "Adult services",
        }
    }

    /// Bracket minimum; the open-ended bracket counts as 18.
    pub fn representative_age(&self) -> u8 {
        match self {
            Self::Infant => 0,
            Self::Child => 4,
            Self::Preteen => 10,
            Self::Teen => 13,
            Self::Adult => 18,
        }
    }

    /// Accepts a bracket label ("13-17") or its 1-based menu position ("4").
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Some(bracket) = Self::ALL.iter().find(|b| b.label() == input) {
            return Some(*bracket);
        }
        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}

impl std::fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of the age gate. Replaced, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeInfo {
    pub age: u8,
    #[serde(rename = "ageCategory")]
    pub age_category: AgeCategory,
}

impl AgeInfo {
    pub fn from_bracket(bracket: AgeBracket) -> Self {
        let age = bracket.representative_age();
        Self {
            age,
            age_category: AgeCategory::for_age(age),
        }
    }
}
