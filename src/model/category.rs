//! Service categories used to scope discovery queries.

use serde::{Deserialize, Serialize};

/// Closed taxonomy of support-service types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCategory {
    Food,
    Shelter,
    Medical,
    MentalHealth,
    CommunityNgos,
    RetirementHomes,
    Education,
    Financial,
    Legal,
    Transportation,
    Emergency,
    Other,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 12] = [
        ServiceCategory::Food,
        ServiceCategory::Shelter,
        ServiceCategory::Medical,
        ServiceCategory::MentalHealth,
        ServiceCategory::CommunityNgos,
        ServiceCategory::RetirementHomes,
        ServiceCategory::Education,
        ServiceCategory::Financial,
        ServiceCategory::Legal,
        ServiceCategory::Transportation,
        ServiceCategory::Emergency,
        ServiceCategory::Other,
    ];

    /// Categories offered by the selector, in menu order. `Other` is a
    /// display fallback only.
    pub fn selectable() -> impl Iterator<Item = ServiceCategory> {
        Self::ALL.into_iter().filter(|c| *c != ServiceCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "FOOD",
            Self::Shelter => "SHELTER",
            Self::Medical => "MEDICAL",
            Self::MentalHealth => "MENTAL_HEALTH",
            Self::CommunityNgos => "COMMUNITY_NGOS",
            Self::RetirementHomes => "RETIREMENT_HOMES",
            Self::Education => "EDUCATION",
            Self::Financial => "FINANCIAL",
            Self::Legal => "LEGAL",
            Self::Transportation => "TRANSPORTATION",
            Self::Emergency => "EMERGENCY",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label shown on buttons and cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food & Nutrition",
            Self::Shelter => "Shelter & Housing",
            Self::Medical => "Medical Help",
            Self::MentalHealth => "Mental Health Support",
            Self::CommunityNgos => "Community NGOs",
            Self::RetirementHomes => "Retirement Homes",
            Self::Education => "Education & Training",
            Self::Financial => "Financial Assistance",
            Self::Legal => "Legal & Administrative",
            Self::Transportation => "Transportation & Mobility",
            Self::Emergency => "Emergency Services",
            Self::Other => "Other Services",
        }
    }

    /// Emergency results never show an address.
    pub fn hides_location(&self) -> bool {
        matches!(self, Self::Emergency)
    }

    /// Accepts the wire name (case-insensitive, `-` or `_`) or a 1-based
    /// position in the selectable menu.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        if let Some(category) = Self::ALL.iter().find(|c| c.as_str() == normalized) {
            return Some(*category);
        }
        normalized
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| Self::selectable().nth(idx))
    }
}

impl std::fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
