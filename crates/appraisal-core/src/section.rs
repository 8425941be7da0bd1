//! Report section identifiers.
//!
//! Every extraction call names one [`Section`]. The catalog in
//! [`crate::catalog`] maps each section to the fields (or audit
//! questions) the model is asked to return for it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// A logical region of an appraisal report known to the extractor.
///
/// Most variants correspond to labelled areas of the standard URAR
/// forms (1004, 1025, 1073, 1004D). A few are review-oriented rather
/// than form-oriented: [`Section::EscalationCheck`] carries audit
/// questions instead of field names, and [`Section::CustomAnalysis`] /
/// [`Section::RevisionCheck`] are driven entirely by a caller-supplied
/// instruction.
///
/// Sections are independent of each other; extracting one has no
/// ordering dependency on another, so callers may fan out concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Form type, add-on forms, and key certification statements
    BaseInfo,
    /// Borrower, property address, occupancy, assignment type
    Subject,
    /// Contract analysis and contract price
    Contract,
    /// Neighborhood characteristics and land-use table
    Neighborhood,
    /// Site dimensions, zoning, utilities
    Site,
    /// Improvements, materials, car storage, ADU
    Improvements,
    /// Sales comparison grid (subject + comparables)
    SalesGrid,
    /// Sales grid re-read focused on adjustment consistency
    SalesGridAdjustment,
    /// Rental comparison grid (1025 / 1007 addenda)
    RentalGrid,
    /// Prior sale and transfer history grid plus research statements
    SaleHistory,
    /// Reconciliation, final opinion of market value
    Reconciliation,
    /// Cost approach figures
    CostApproach,
    /// Income approach figures
    IncomeApproach,
    /// Presence/absence inventory of report exhibits
    ReportDetails,
    /// PUD rider information
    PudInfo,
    /// Report type identification block
    AppraisalId,
    /// Appraiser and supervisory appraiser certification block
    Certification,
    /// Market conditions addendum (1004MC)
    MarketConditions,
    /// Condominium project information (1073)
    Condo,
    /// State-specific compliance findings (two-phase extraction)
    StateRequirement,
    /// Client and lender overlay compliance findings
    ClientLenderRequirements,
    /// Cross-document escalation audit questions
    EscalationCheck,
    /// 1004D completion / update certification
    D1004,
    /// Free-form analysis driven by a caller-supplied question
    CustomAnalysis,
    /// Verification that a rejection reason was addressed in a revision
    RevisionCheck,
}

impl Section {
    /// Every section in catalog order.
    pub const ALL: [Self; 25] = [
        Self::BaseInfo,
        Self::Subject,
        Self::Contract,
        Self::Neighborhood,
        Self::Site,
        Self::Improvements,
        Self::SalesGrid,
        Self::SalesGridAdjustment,
        Self::RentalGrid,
        Self::SaleHistory,
        Self::Reconciliation,
        Self::CostApproach,
        Self::IncomeApproach,
        Self::ReportDetails,
        Self::PudInfo,
        Self::AppraisalId,
        Self::Certification,
        Self::MarketConditions,
        Self::Condo,
        Self::StateRequirement,
        Self::ClientLenderRequirements,
        Self::EscalationCheck,
        Self::D1004,
        Self::CustomAnalysis,
        Self::RevisionCheck,
    ];

    /// Canonical string key, as used in serialized payloads and on the
    /// command line.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::BaseInfo => "base_info",
            Self::Subject => "subject",
            Self::Contract => "contract",
            Self::Neighborhood => "neighborhood",
            Self::Site => "site",
            Self::Improvements => "improvements",
            Self::SalesGrid => "sales_grid",
            Self::SalesGridAdjustment => "sales_grid_adjustment",
            Self::RentalGrid => "rental_grid",
            Self::SaleHistory => "sale_history",
            Self::Reconciliation => "reconciliation",
            Self::CostApproach => "cost_approach",
            Self::IncomeApproach => "income_approach",
            Self::ReportDetails => "report_details",
            Self::PudInfo => "pud_info",
            Self::AppraisalId => "appraisal_id",
            Self::Certification => "certification",
            Self::MarketConditions => "market_conditions",
            Self::Condo => "condo",
            Self::StateRequirement => "state_requirement",
            Self::ClientLenderRequirements => "client_lender_requirements",
            Self::EscalationCheck => "escalation_check",
            Self::D1004 => "d1004",
            Self::CustomAnalysis => "custom_analysis",
            Self::RevisionCheck => "revision_check",
        }
    }

    /// Human-readable title, e.g. `"Sales Grid"` for `sales_grid`.
    #[must_use]
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.key().len());
        for (i, word) in self.key().split('_').enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }

    /// Whether the extracted payload nests a `subject` object and a
    /// `comparables` array instead of being a flat field map.
    #[inline]
    #[must_use = "grid sections need the subject/comparables accessors"]
    pub const fn is_grid(&self) -> bool {
        matches!(
            self,
            Self::SalesGrid | Self::SalesGridAdjustment | Self::RentalGrid | Self::SaleHistory
        )
    }

    /// Whether the section has no fixed field list and is driven
    /// entirely by a caller-supplied instruction.
    #[inline]
    #[must_use = "prompt-only sections need a caller-supplied instruction"]
    pub const fn is_prompt_only(&self) -> bool {
        matches!(self, Self::CustomAnalysis | Self::RevisionCheck)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Section {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|section| section.key() == key)
            .copied()
            .ok_or_else(|| ExtractError::UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrips_through_from_str() {
        for section in Section::ALL {
            let parsed: Section = section.key().parse().unwrap();
            assert_eq!(parsed, section);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("Sales_Grid".parse::<Section>().unwrap(), Section::SalesGrid);
        assert_eq!("  D1004 ".parse::<Section>().unwrap(), Section::D1004);
    }

    #[test]
    fn unknown_section_reports_the_offending_name() {
        let err = "floorplan".parse::<Section>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid section name provided: floorplan"
        );
    }

    #[test]
    fn serde_key_matches_canonical_key() {
        for section in Section::ALL {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section.key()));
            let back: Section = serde_json::from_str(&json).unwrap();
            assert_eq!(back, section);
        }
    }

    #[test]
    fn grid_sections_are_exactly_the_comparable_carriers() {
        let grids: Vec<Section> = Section::ALL.iter().copied().filter(Section::is_grid).collect();
        assert_eq!(
            grids,
            vec![
                Section::SalesGrid,
                Section::SalesGridAdjustment,
                Section::RentalGrid,
                Section::SaleHistory,
            ]
        );
    }

    #[test]
    fn titles_read_like_headings() {
        assert_eq!(Section::SalesGrid.title(), "Sales Grid");
        assert_eq!(Section::D1004.title(), "D1004");
        assert_eq!(Section::ClientLenderRequirements.title(), "Client Lender Requirements");
    }
}
