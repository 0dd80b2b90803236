//! Directive form aggregate
//!
//! One mutable record of all directive answers, organized into fixed named
//! sections. Sections are independent namespaces: every update goes through
//! a section patch whose fields are all `Option`, and applying a patch
//! overwrites only the `Some` fields. Sibling sections and unspecified
//! fields of the same section are never disturbed.

use serde::Serialize;

use super::consent::{ConsentRecording, ConsentRole};
use super::fields::{
    HealthLevel, InsuranceCoverage, PassingLocation, PrognosisPeriod, SupportProvider,
};

/// Personal identification answers
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonalInfo {
    pub surname: String,
    pub given_name: String,
    pub sex: String,
    pub date_of_birth: String,
    pub nationality: String,
}

/// Current health answers
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthStatus {
    pub self_assessed: Option<HealthLevel>,
    pub self_assessed_details: String,
    pub diagnosed: Option<HealthLevel>,
    pub diagnosed_condition: String,
    pub doctor_opinion: String,
}

/// Who provides care at home and in hospital
#[derive(Debug, Clone, Default, Serialize)]
pub struct SupportSystem {
    pub home_care: Vec<SupportProvider>,
    pub hospital_care: Vec<SupportProvider>,
}

/// Prognosis and medical insurance answers
#[derive(Debug, Clone, Default, Serialize)]
pub struct PrognosisInsurance {
    pub recovery_prognosis: Option<PrognosisPeriod>,
    pub has_insurance: bool,
    pub insurance_coverage: Option<InsuranceCoverage>,
}

/// Financial provisions for the family
#[derive(Debug, Clone, Default, Serialize)]
pub struct Financial {
    pub is_family_provided_for: bool,
    pub financial_wishes: String,
    pub has_life_insurance: bool,
}

/// Free-text personal wishes
#[derive(Debug, Clone, Default, Serialize)]
pub struct Wishes {
    pub future_life_wishes: String,
    pub impact_on_family: String,
}

/// Treatment refusal, location preference, and the three spoken consents
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdvanceDirective {
    pub refuse_treatment: bool,
    pub preferred_location: Option<PassingLocation>,
    pub patient_consent: ConsentRecording,
    pub family_consent: ConsentRecording,
    pub physician_consent: ConsentRecording,
    pub family_member_name: String,
    pub physician_name: String,
}

impl AdvanceDirective {
    /// Get the consent slot for a role
    pub fn consent(&self, role: ConsentRole) -> &ConsentRecording {
        match role {
            ConsentRole::Patient => &self.patient_consent,
            ConsentRole::Family => &self.family_consent,
            ConsentRole::Physician => &self.physician_consent,
        }
    }

    /// Whether all three consents have been recorded
    pub fn all_consents_recorded(&self) -> bool {
        self.patient_consent.is_recorded()
            && self.family_consent.is_recorded()
            && self.physician_consent.is_recorded()
    }
}

/// Organ donation decision and legal acknowledgement
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganDonation {
    pub consent_to_donate: bool,
    pub legal_agreement: bool,
}

/// The canonical record of all directive answers for one session.
/// All fields default to empty/false; nothing is derived from anything else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectiveForm {
    pub personal_info: PersonalInfo,
    pub health_status: HealthStatus,
    pub support_system: SupportSystem,
    pub prognosis_insurance: PrognosisInsurance,
    pub financial: Financial,
    pub wishes: Wishes,
    pub advance_directive: AdvanceDirective,
    pub organ_donation: OrganDonation,
}

impl DirectiveForm {
    /// Create a form with every field empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a section-scoped partial update
    pub fn apply(&mut self, patch: SectionPatch) {
        match patch {
            SectionPatch::PersonalInfo(p) => p.apply(&mut self.personal_info),
            SectionPatch::HealthStatus(p) => p.apply(&mut self.health_status),
            SectionPatch::SupportSystem(p) => p.apply(&mut self.support_system),
            SectionPatch::PrognosisInsurance(p) => p.apply(&mut self.prognosis_insurance),
            SectionPatch::Financial(p) => p.apply(&mut self.financial),
            SectionPatch::Wishes(p) => p.apply(&mut self.wishes),
            SectionPatch::AdvanceDirective(p) => p.apply(&mut self.advance_directive),
            SectionPatch::OrganDonation(p) => p.apply(&mut self.organ_donation),
        }
    }
}

/// Partial update to the personal-info section
#[derive(Debug, Clone, Default)]
pub struct PersonalInfoPatch {
    pub surname: Option<String>,
    pub given_name: Option<String>,
    pub sex: Option<String>,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
}

impl PersonalInfoPatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut PersonalInfo) {
        if let Some(v) = self.surname {
            section.surname = v;
        }
        if let Some(v) = self.given_name {
            section.given_name = v;
        }
        if let Some(v) = self.sex {
            section.sex = v;
        }
        if let Some(v) = self.date_of_birth {
            section.date_of_birth = v;
        }
        if let Some(v) = self.nationality {
            section.nationality = v;
        }
    }
}

/// Partial update to the health-status section
#[derive(Debug, Clone, Default)]
pub struct HealthStatusPatch {
    pub self_assessed: Option<HealthLevel>,
    pub self_assessed_details: Option<String>,
    pub diagnosed: Option<HealthLevel>,
    pub diagnosed_condition: Option<String>,
    pub doctor_opinion: Option<String>,
}

impl HealthStatusPatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut HealthStatus) {
        if let Some(v) = self.self_assessed {
            section.self_assessed = Some(v);
        }
        if let Some(v) = self.self_assessed_details {
            section.self_assessed_details = v;
        }
        if let Some(v) = self.diagnosed {
            section.diagnosed = Some(v);
        }
        if let Some(v) = self.diagnosed_condition {
            section.diagnosed_condition = v;
        }
        if let Some(v) = self.doctor_opinion {
            section.doctor_opinion = v;
        }
    }
}

/// Partial update to the support-system section
#[derive(Debug, Clone, Default)]
pub struct SupportSystemPatch {
    pub home_care: Option<Vec<SupportProvider>>,
    pub hospital_care: Option<Vec<SupportProvider>>,
}

impl SupportSystemPatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut SupportSystem) {
        if let Some(v) = self.home_care {
            section.home_care = v;
        }
        if let Some(v) = self.hospital_care {
            section.hospital_care = v;
        }
    }
}

/// Partial update to the prognosis/insurance section
#[derive(Debug, Clone, Default)]
pub struct PrognosisInsurancePatch {
    pub recovery_prognosis: Option<PrognosisPeriod>,
    pub has_insurance: Option<bool>,
    pub insurance_coverage: Option<InsuranceCoverage>,
}

impl PrognosisInsurancePatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut PrognosisInsurance) {
        if let Some(v) = self.recovery_prognosis {
            section.recovery_prognosis = Some(v);
        }
        if let Some(v) = self.has_insurance {
            section.has_insurance = v;
        }
        if let Some(v) = self.insurance_coverage {
            section.insurance_coverage = Some(v);
        }
    }
}

/// Partial update to the financial section
#[derive(Debug, Clone, Default)]
pub struct FinancialPatch {
    pub is_family_provided_for: Option<bool>,
    pub financial_wishes: Option<String>,
    pub has_life_insurance: Option<bool>,
}

impl FinancialPatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut Financial) {
        if let Some(v) = self.is_family_provided_for {
            section.is_family_provided_for = v;
        }
        if let Some(v) = self.financial_wishes {
            section.financial_wishes = v;
        }
        if let Some(v) = self.has_life_insurance {
            section.has_life_insurance = v;
        }
    }
}

/// Partial update to the wishes section
#[derive(Debug, Clone, Default)]
pub struct WishesPatch {
    pub future_life_wishes: Option<String>,
    pub impact_on_family: Option<String>,
}

impl WishesPatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut Wishes) {
        if let Some(v) = self.future_life_wishes {
            section.future_life_wishes = v;
        }
        if let Some(v) = self.impact_on_family {
            section.impact_on_family = v;
        }
    }
}

/// Partial update to the advance-directive section
#[derive(Debug, Clone, Default)]
pub struct AdvanceDirectivePatch {
    pub refuse_treatment: Option<bool>,
    pub preferred_location: Option<PassingLocation>,
    pub patient_consent: Option<ConsentRecording>,
    pub family_consent: Option<ConsentRecording>,
    pub physician_consent: Option<ConsentRecording>,
    pub family_member_name: Option<String>,
    pub physician_name: Option<String>,
}

impl AdvanceDirectivePatch {
    /// Build a patch that replaces one role's consent slot
    pub fn for_consent(role: ConsentRole, recording: ConsentRecording) -> Self {
        let mut patch = Self::default();
        match role {
            ConsentRole::Patient => patch.patient_consent = Some(recording),
            ConsentRole::Family => patch.family_consent = Some(recording),
            ConsentRole::Physician => patch.physician_consent = Some(recording),
        }
        patch
    }

    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut AdvanceDirective) {
        if let Some(v) = self.refuse_treatment {
            section.refuse_treatment = v;
        }
        if let Some(v) = self.preferred_location {
            section.preferred_location = Some(v);
        }
        if let Some(v) = self.patient_consent {
            section.patient_consent = v;
        }
        if let Some(v) = self.family_consent {
            section.family_consent = v;
        }
        if let Some(v) = self.physician_consent {
            section.physician_consent = v;
        }
        if let Some(v) = self.family_member_name {
            section.family_member_name = v;
        }
        if let Some(v) = self.physician_name {
            section.physician_name = v;
        }
    }
}

/// Partial update to the organ-donation section
#[derive(Debug, Clone, Default)]
pub struct OrganDonationPatch {
    pub consent_to_donate: Option<bool>,
    pub legal_agreement: Option<bool>,
}

impl OrganDonationPatch {
    /// Merge into the section; only `Some` fields overwrite
    pub fn apply(self, section: &mut OrganDonation) {
        if let Some(v) = self.consent_to_donate {
            section.consent_to_donate = v;
        }
        if let Some(v) = self.legal_agreement {
            section.legal_agreement = v;
        }
    }
}

/// A partial update addressed to exactly one section
#[derive(Debug, Clone)]
pub enum SectionPatch {
    PersonalInfo(PersonalInfoPatch),
    HealthStatus(HealthStatusPatch),
    SupportSystem(SupportSystemPatch),
    PrognosisInsurance(PrognosisInsurancePatch),
    Financial(FinancialPatch),
    Wishes(WishesPatch),
    AdvanceDirective(AdvanceDirectivePatch),
    OrganDonation(OrganDonationPatch),
}

impl SectionPatch {
    /// Get the name of the targeted section
    pub const fn section_name(&self) -> &'static str {
        match self {
            Self::PersonalInfo(_) => "personal_info",
            Self::HealthStatus(_) => "health_status",
            Self::SupportSystem(_) => "support_system",
            Self::PrognosisInsurance(_) => "prognosis_insurance",
            Self::Financial(_) => "financial",
            Self::Wishes(_) => "wishes",
            Self::AdvanceDirective(_) => "advance_directive",
            Self::OrganDonation(_) => "organ_donation",
        }
    }
}
