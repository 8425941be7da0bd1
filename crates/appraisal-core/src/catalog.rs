//! Registry mapping each [`Section`] to the things the extractor is
//! asked to return for it.
//!
//! Most sections carry a flat ordered list of field names. Grid
//! sections carry the per-row field list; their payloads nest a
//! `subject` object and a `comparables` array. The escalation section
//! carries grouped natural-language audit questions instead of field
//! names, and two sections carry nothing at all because the caller
//! supplies the whole instruction.

use crate::fields;
use crate::section::Section;

/// What the catalog knows to ask for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionFields {
    /// Flat ordered list of field names.
    Named(&'static [&'static str]),
    /// Per-row field names for grid sections; the extracted payload
    /// nests them under `subject` and `comparables`.
    Grid(&'static [&'static str]),
    /// Audit questions grouped by category, asked verbatim.
    Checklist(&'static [(&'static str, &'static [&'static str])]),
    /// No fixed contents; the caller supplies the instruction.
    PromptOnly,
}

impl SectionFields {
    /// Field names when the section has them, flattening checklist
    /// categories into one ordered question list.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        match self {
            Self::Named(fields) | Self::Grid(fields) => fields.to_vec(),
            Self::Checklist(groups) => groups
                .iter()
                .flat_map(|(_, questions)| questions.iter().copied())
                .collect(),
            Self::PromptOnly => Vec::new(),
        }
    }

    /// Number of fields or questions registered for the section.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Named(fields) | Self::Grid(fields) => fields.len(),
            Self::Checklist(groups) => groups.iter().map(|(_, qs)| qs.len()).sum(),
            Self::PromptOnly => 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Catalog entry for a section. Total over the closed [`Section`] enum;
/// string keys are validated once at the parse boundary instead.
#[must_use]
pub const fn fields_for(section: Section) -> SectionFields {
    match section {
        Section::BaseInfo => SectionFields::Named(fields::BASE_INFO_FIELDS),
        Section::Subject => SectionFields::Named(fields::SUBJECT_FIELDS),
        Section::Contract => SectionFields::Named(fields::CONTRACT_FIELDS),
        Section::Neighborhood => SectionFields::Named(fields::NEIGHBORHOOD_FIELDS),
        Section::Site => SectionFields::Named(fields::SITE_FIELDS),
        Section::Improvements => SectionFields::Named(fields::IMPROVEMENTS_FIELDS),
        Section::SalesGrid => SectionFields::Grid(fields::SALES_GRID_FIELDS),
        Section::SalesGridAdjustment => {
            SectionFields::Grid(fields::SALES_GRID_ADJUSTMENT_FIELDS)
        }
        Section::RentalGrid => SectionFields::Grid(fields::RENTAL_GRID_FIELDS),
        Section::SaleHistory => SectionFields::Grid(fields::SALE_HISTORY_FIELDS),
        Section::Reconciliation => SectionFields::Named(fields::RECONCILIATION_FIELDS),
        Section::CostApproach => SectionFields::Named(fields::COST_APPROACH_FIELDS),
        Section::IncomeApproach => SectionFields::Named(fields::INCOME_APPROACH_FIELDS),
        Section::ReportDetails => SectionFields::Named(fields::REPORT_DETAILS_FIELDS),
        Section::PudInfo => SectionFields::Named(fields::PUD_INFO_FIELDS),
        Section::AppraisalId => SectionFields::Named(fields::APPRAISAL_ID_FIELDS),
        Section::Certification => SectionFields::Named(fields::CERTIFICATION_FIELDS),
        Section::MarketConditions => SectionFields::Named(fields::MARKET_CONDITIONS_FIELDS),
        Section::Condo => SectionFields::Named(fields::CONDO_FIELDS),
        Section::StateRequirement => SectionFields::Named(fields::STATE_REQUIREMENT_FIELDS),
        Section::ClientLenderRequirements => {
            SectionFields::Named(fields::CLIENT_LENDER_REQUIREMENTS_FIELDS)
        }
        Section::EscalationCheck => SectionFields::Checklist(fields::ESCALATION_CHECKLIST),
        Section::D1004 => SectionFields::Named(fields::D1004_FIELDS),
        Section::CustomAnalysis | Section::RevisionCheck => SectionFields::PromptOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_an_entry() {
        for section in Section::ALL {
            let entry = fields_for(section);
            if section.is_prompt_only() {
                assert!(entry.is_empty(), "{section} should carry no fields");
            } else {
                assert!(!entry.is_empty(), "{section} lost its field list");
            }
        }
    }

    #[test]
    fn grid_entries_match_the_grid_predicate() {
        for section in Section::ALL {
            let is_grid_entry = matches!(fields_for(section), SectionFields::Grid(_));
            assert_eq!(is_grid_entry, section.is_grid(), "{section}");
        }
    }

    #[test]
    fn known_field_counts_hold() {
        assert_eq!(fields_for(Section::BaseInfo).len(), 5);
        assert_eq!(fields_for(Section::Subject).len(), 26);
        assert_eq!(fields_for(Section::SalesGrid).len(), 45);
        assert_eq!(fields_for(Section::D1004).len(), 25);
        assert_eq!(fields_for(Section::ClientLenderRequirements).len(), 76);
    }

    #[test]
    fn field_names_are_unique_within_a_section() {
        for section in Section::ALL {
            let names = fields_for(section).names();
            let mut seen = std::collections::HashSet::new();
            for name in &names {
                assert!(seen.insert(name), "{section} repeats field {name:?}");
            }
        }
    }

    #[test]
    fn checklist_groups_survive_flattening() {
        let SectionFields::Checklist(groups) = fields_for(Section::EscalationCheck) else {
            panic!("escalation_check should be a checklist");
        };
        assert!(!groups.is_empty());
        let flattened = fields_for(Section::EscalationCheck).names();
        assert_eq!(
            flattened.len(),
            groups.iter().map(|(_, qs)| qs.len()).sum::<usize>()
        );
    }
}
