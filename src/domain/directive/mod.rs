//! Directive data model
//!
//! The form aggregate, its enumerated field values, consent recordings,
//! and the deterministic drafting prompt.

mod consent;
mod fields;
mod form;
mod prompt;

pub use consent::{ConsentRecording, ConsentRole, ALL_CONSENT_ROLES};
pub use fields::{
    HealthLevel, InsuranceCoverage, PassingLocation, PrognosisPeriod, SupportProvider,
    ALL_COVERAGE_TIERS, ALL_HEALTH_LEVELS, ALL_PASSING_LOCATIONS, ALL_PROGNOSIS_PERIODS,
    ALL_SUPPORT_PROVIDERS,
};
pub use form::{
    AdvanceDirective, AdvanceDirectivePatch, DirectiveForm, Financial, FinancialPatch,
    HealthStatus, HealthStatusPatch, OrganDonation, OrganDonationPatch, PersonalInfo,
    PersonalInfoPatch, PrognosisInsurance, PrognosisInsurancePatch, SectionPatch, SupportSystem,
    SupportSystemPatch, Wishes, WishesPatch,
};
pub use prompt::DirectivePrompt;
