//! Enumerated directive field values
//!
//! Each enum carries a short string id for parsing user input and a
//! human-readable label used in screens, the generated prompt, and the
//! sealed serialization. Unset selections are modeled as `Option::None`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::InvalidFieldValue;

/// Health assessment levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HealthLevel {
    High,
    Medium,
    Low,
}

/// All health levels, in screen order
pub const ALL_HEALTH_LEVELS: &[HealthLevel] =
    &[HealthLevel::High, HealthLevel::Medium, HealthLevel::Low];

impl HealthLevel {
    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for HealthLevel {
    type Err = InvalidFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(InvalidFieldValue {
                field: "health level",
                input: s.to_string(),
                options: "high, medium, low",
            }),
        }
    }
}

/// Who provides care in the support-system section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SupportProvider {
    Spouse,
    Children,
    Other,
}

/// All support providers, in screen order
pub const ALL_SUPPORT_PROVIDERS: &[SupportProvider] = &[
    SupportProvider::Spouse,
    SupportProvider::Children,
    SupportProvider::Other,
];

impl SupportProvider {
    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Spouse => "Spouse",
            Self::Children => "Children",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for SupportProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SupportProvider {
    type Err = InvalidFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spouse" => Ok(Self::Spouse),
            "children" => Ok(Self::Children),
            "other" => Ok(Self::Other),
            _ => Err(InvalidFieldValue {
                field: "support provider",
                input: s.to_string(),
                options: "spouse, children, other",
            }),
        }
    }
}

/// Expected recovery prognosis periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PrognosisPeriod {
    #[serde(rename = "3 Months")]
    ThreeMonths,
    #[serde(rename = "6 Months")]
    SixMonths,
    #[serde(rename = "1 Year")]
    OneYear,
    #[serde(rename = "2 Years")]
    TwoYears,
}

/// All prognosis periods, in screen order
pub const ALL_PROGNOSIS_PERIODS: &[PrognosisPeriod] = &[
    PrognosisPeriod::ThreeMonths,
    PrognosisPeriod::SixMonths,
    PrognosisPeriod::OneYear,
    PrognosisPeriod::TwoYears,
];

impl PrognosisPeriod {
    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::ThreeMonths => "3 Months",
            Self::SixMonths => "6 Months",
            Self::OneYear => "1 Year",
            Self::TwoYears => "2 Years",
        }
    }
}

impl fmt::Display for PrognosisPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PrognosisPeriod {
    type Err = InvalidFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "3m" | "3 months" => Ok(Self::ThreeMonths),
            "6m" | "6 months" => Ok(Self::SixMonths),
            "1y" | "1 year" => Ok(Self::OneYear),
            "2y" | "2 years" => Ok(Self::TwoYears),
            _ => Err(InvalidFieldValue {
                field: "recovery prognosis",
                input: s.to_string(),
                options: "3m, 6m, 1y, 2y",
            }),
        }
    }
}

/// Medical insurance coverage tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InsuranceCoverage {
    #[serde(rename = "30%")]
    Pct30,
    #[serde(rename = "50%")]
    Pct50,
    #[serde(rename = "70%")]
    Pct70,
    #[serde(rename = "100%")]
    Pct100,
}

/// All coverage tiers, in screen order
pub const ALL_COVERAGE_TIERS: &[InsuranceCoverage] = &[
    InsuranceCoverage::Pct30,
    InsuranceCoverage::Pct50,
    InsuranceCoverage::Pct70,
    InsuranceCoverage::Pct100,
];

impl InsuranceCoverage {
    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pct30 => "30%",
            Self::Pct50 => "50%",
            Self::Pct70 => "70%",
            Self::Pct100 => "100%",
        }
    }
}

impl fmt::Display for InsuranceCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for InsuranceCoverage {
    type Err = InvalidFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('%') {
            "30" => Ok(Self::Pct30),
            "50" => Ok(Self::Pct50),
            "70" => Ok(Self::Pct70),
            "100" => Ok(Self::Pct100),
            _ => Err(InvalidFieldValue {
                field: "insurance coverage",
                input: s.to_string(),
                options: "30, 50, 70, 100",
            }),
        }
    }
}

/// Preferred location for end-of-life care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PassingLocation {
    Home,
    Hospital,
    #[serde(rename = "Hospice/Nursing Home")]
    Hospice,
}

/// All passing locations, in screen order
pub const ALL_PASSING_LOCATIONS: &[PassingLocation] = &[
    PassingLocation::Home,
    PassingLocation::Hospital,
    PassingLocation::Hospice,
];

impl PassingLocation {
    /// Get the human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Hospital => "Hospital",
            Self::Hospice => "Hospice/Nursing Home",
        }
    }
}

impl fmt::Display for PassingLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for PassingLocation {
    type Err = InvalidFieldValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Self::Home),
            "hospital" => Ok(Self::Hospital),
            "hospice" | "hospice/nursing home" | "nursing home" => Ok(Self::Hospice),
            _ => Err(InvalidFieldValue {
                field: "preferred location",
                input: s.to_string(),
                options: "home, hospital, hospice",
            }),
        }
    }
}
