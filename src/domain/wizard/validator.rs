//! Per-step forward-navigation rules
//!
//! Each step's rule is a pure function of that step's own fields at the
//! moment the user asks to move on. Earlier steps are never re-validated,
//! so edits that invalidate an already-passed step do not retroactively
//! block the wizard.

use crate::domain::directive::{DirectiveForm, HealthLevel};

use super::step::Step;

/// Whether forward navigation from `step` is permitted.
///
/// `summary` is the generated summary for the current Summary-step visit,
/// if any; it only influences the Summary step's rule.
pub fn can_advance(step: Step, form: &DirectiveForm, summary: Option<&str>) -> bool {
    match step {
        Step::PersonalInfo => personal_info_complete(form),
        Step::HealthStatus => health_status_complete(form),
        Step::SupportSystem => true,
        Step::PrognosisInsurance => prognosis_insurance_complete(form),
        Step::PersonalWishes => true,
        Step::AdvanceDirective => advance_directive_complete(form),
        Step::OrganDonation => form.organ_donation.legal_agreement,
        Step::Summary => summary.is_some_and(|s| !s.is_empty()),
        Step::Confirmation => false,
    }
}

fn personal_info_complete(form: &DirectiveForm) -> bool {
    let pi = &form.personal_info;
    !pi.surname.is_empty()
        && !pi.given_name.is_empty()
        && !pi.sex.is_empty()
        && !pi.date_of_birth.is_empty()
        && !pi.nationality.is_empty()
}

fn health_status_complete(form: &DirectiveForm) -> bool {
    let hs = &form.health_status;
    hs.self_assessed.is_some()
        && hs.diagnosed.is_some()
        && (hs.diagnosed != Some(HealthLevel::Low) || !hs.diagnosed_condition.trim().is_empty())
}

fn prognosis_insurance_complete(form: &DirectiveForm) -> bool {
    let pai = &form.prognosis_insurance;
    let fin = &form.financial;
    pai.recovery_prognosis.is_some()
        && (!pai.has_insurance || pai.insurance_coverage.is_some())
        && (fin.is_family_provided_for || !fin.financial_wishes.trim().is_empty())
}

fn advance_directive_complete(form: &DirectiveForm) -> bool {
    let ad = &form.advance_directive;
    if !ad.refuse_treatment {
        return true;
    }
    ad.preferred_location.is_some()
        && ad.all_consents_recorded()
        && !ad.family_member_name.trim().is_empty()
        && !ad.physician_name.trim().is_empty()
}
