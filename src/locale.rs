//! Roles and country-specific signup rules.
//!
//! The country drives three things during signup: the wire form of the
//! country code, how ambiguous date input is read (month-first vs
//! day-first), and which government identity document the user is asked
//! for. All three live here so the rest of the crate never hard-codes a
//! country check.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who is signing up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Techie,
    HiringManager,
    Company,
    School,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Techie => "techie",
            Self::HiringManager => "hiring_manager",
            Self::Company => "company",
            Self::School => "school",
        };
        write!(f, "{s}")
    }
}

/// Component order for two-digit date prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// `MM/DD/YYYY` — US convention.
    MonthFirst,
    /// `DD/MM/YYYY` — everywhere else.
    DayFirst,
}

/// Government identity document kinds, one per supported country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// US Social Security Number.
    Ssn,
    /// Indian Permanent Account Number.
    Pan,
    /// UK National Insurance Number.
    Nino,
    /// Canadian Social Insurance Number.
    Sin,
    /// Australian Tax File Number.
    Tfn,
    /// Singapore NRIC.
    Nric,
}

impl DocumentKind {
    /// Whether the document is digits-only on the wire (formatting
    /// characters are stripped before extraction).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Ssn | Self::Sin | Self::Tfn)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ssn => "ssn",
            Self::Pan => "pan",
            Self::Nino => "nino",
            Self::Sin => "sin",
            Self::Tfn => "tfn",
            Self::Nric => "nric",
        };
        write!(f, "{s}")
    }
}

/// A captured identity document. `FormState` holds at most one of these,
/// so the "one populated document field" rule is a type-level fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovDocument {
    pub kind: DocumentKind,
    pub value: String,
}

impl GovDocument {
    pub fn new(kind: DocumentKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Supported signup countries (launch markets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Us,
    In,
    Gb,
    Ca,
    Au,
    Sg,
}

impl Country {
    /// ISO 3166-1 alpha-3 code — the form the registration API expects.
    pub fn alpha3(&self) -> &'static str {
        match self {
            Self::Us => "USA",
            Self::In => "IND",
            Self::Gb => "GBR",
            Self::Ca => "CAN",
            Self::Au => "AUS",
            Self::Sg => "SGP",
        }
    }

    /// How two-digit date prefixes are read for this country.
    pub fn date_order(&self) -> DateOrder {
        match self {
            Self::Us => DateOrder::MonthFirst,
            _ => DateOrder::DayFirst,
        }
    }

    /// The identity document this country's signup asks for.
    pub fn document_kind(&self) -> DocumentKind {
        match self {
            Self::Us => DocumentKind::Ssn,
            Self::In => DocumentKind::Pan,
            Self::Gb => DocumentKind::Nino,
            Self::Ca => DocumentKind::Sin,
            Self::Au => DocumentKind::Tfn,
            Self::Sg => DocumentKind::Nric,
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Us => "US",
            Self::In => "IN",
            Self::Gb => "GB",
            Self::Ca => "CA",
            Self::Au => "AU",
            Self::Sg => "SG",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Country {
    type Err = UnknownCountry;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "US" => Ok(Self::Us),
            "IN" => Ok(Self::In),
            "GB" | "UK" => Ok(Self::Gb),
            "CA" => Ok(Self::Ca),
            "AU" => Ok(Self::Au),
            "SG" => Ok(Self::Sg),
            _ => Err(UnknownCountry(s.to_string())),
        }
    }
}

/// Returned when parsing an unsupported country code.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unsupported country code: {0}")]
pub struct UnknownCountry(pub String);
