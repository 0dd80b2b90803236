//! Drafting prompt value object

use super::fields::SupportProvider;
use super::form::DirectiveForm;

/// Instruction header for the drafting request
const DRAFTING_INSTRUCTION: &str = "Based on the following information, act as a compassionate and professional scribe to draft a clear, respectful, and legally-phrased Advance Directive and Statement of Wishes. The tone should be formal yet personal, accurately reflecting the individual's choices. Structure the output in Markdown format.";

/// Value object holding the complete drafting prompt for one directive.
///
/// Built deterministically from the form with a fixed section ordering:
/// personal information, health summary, support system, directives,
/// personal wishes, financial/insurance status, post-mortem wishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectivePrompt {
    content: String,
}

impl DirectivePrompt {
    /// Build the drafting prompt from a completed form
    pub fn build(form: &DirectiveForm) -> Self {
        let pi = &form.personal_info;
        let hs = &form.health_status;
        let ss = &form.support_system;
        let pai = &form.prognosis_insurance;
        let fin = &form.financial;
        let w = &form.wishes;
        let ad = &form.advance_directive;
        let od = &form.organ_donation;

        let treatment_line = if ad.refuse_treatment {
            "The individual has expressed a clear wish to REFUSE life-sustaining treatment if their condition is deemed irrecoverable and consciousness is significantly diminished."
        } else {
            "The individual has not opted to refuse life-sustaining treatment at this time."
        };

        let insurance_line = if pai.has_insurance {
            format!(
                "Yes, with {} coverage.",
                pai.insurance_coverage
                    .map(|c| c.label())
                    .unwrap_or("unspecified")
            )
        } else {
            "No".to_string()
        };

        let provisions_line = if fin.is_family_provided_for {
            "The individual states their family's financial needs are met.".to_string()
        } else {
            format!(
                "The individual has expressed the following wishes regarding family finances: \"{}\"",
                fin.financial_wishes
            )
        };

        let donation_line = if od.consent_to_donate {
            "The individual CONSENTS to organ donation to help others in need."
        } else {
            "The individual does NOT consent to organ donation."
        };

        let content = format!(
            "{instruction}\n\n\
             **1. Personal Information:**\n\
             - Name: {given} {surname}\n\
             - Date of Birth: {dob}\n\
             - Sex: {sex}\n\
             - Nationality: {nationality}\n\n\
             **2. Health Status Summary:**\n\
             - Self-Assessed Health: {self_assessed} ({self_details})\n\
             - Medical Diagnosis: {diagnosed}, with the condition of \"{condition}\"\n\
             - Physician's Opinion: {doctor_opinion}\n\
             - Recovery Prognosis: {prognosis}\n\n\
             **3. Support System:**\n\
             - Home Care Provided By: {home_care}\n\
             - Hospital Care Provided By: {hospital_care}\n\n\
             **4. End-of-Life Directives:**\n\
             - Life-Sustaining Treatment: {treatment}\n\
             - Preferred Location for End-of-Life Care: {location}\n\
             - Consents: Verbal consents have been recorded from the Patient, a Family Member ({family_name}), and the Primary Physician ({physician_name}).\n\n\
             **5. Personal Wishes & Considerations:**\n\
             - Hopes for the Future: \"{future_wishes}\"\n\
             - Reflections on Family Impact: \"{family_impact}\"\n\n\
             **6. Financial & Insurance Status:**\n\
             - Medical Insurance: {insurance}\n\
             - Life Insurance: {life_insurance}\n\
             - Financial Provisions for Family: {provisions}\n\n\
             **7. Post-Mortem Wishes:**\n\
             - Organ Donation: {donation}\n\n\
             **Drafting Task:**\n\
             Please synthesize this information into a formal document titled \"Advance Directive and Statement of Wishes for {given} {surname}\". Use clear headings for each section. Convert the provided data into well-formed sentences that convey the gravity and clarity of these decisions. Conclude with the statement of legal understanding provided by the individual.",
            instruction = DRAFTING_INSTRUCTION,
            given = pi.given_name,
            surname = pi.surname,
            dob = pi.date_of_birth,
            sex = pi.sex,
            nationality = pi.nationality,
            self_assessed = hs.self_assessed.map(|l| l.label()).unwrap_or("Not specified"),
            self_details = hs.self_assessed_details,
            diagnosed = hs.diagnosed.map(|l| l.label()).unwrap_or("Not specified"),
            condition = hs.diagnosed_condition,
            doctor_opinion = hs.doctor_opinion,
            prognosis = pai
                .recovery_prognosis
                .map(|p| p.label())
                .unwrap_or("Not specified"),
            home_care = format_providers(&ss.home_care),
            hospital_care = format_providers(&ss.hospital_care),
            treatment = treatment_line,
            location = ad
                .preferred_location
                .map(|l| l.label())
                .unwrap_or("Not specified."),
            family_name = ad.family_member_name,
            physician_name = ad.physician_name,
            future_wishes = w.future_life_wishes,
            family_impact = w.impact_on_family,
            insurance = insurance_line,
            life_insurance = if fin.has_life_insurance { "Yes" } else { "No" },
            provisions = provisions_line,
            donation = donation_line,
        );

        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the content
    pub fn into_content(self) -> String {
        self.content
    }
}

/// Render a provider list, or "None specified" when empty
fn format_providers(providers: &[SupportProvider]) -> String {
    if providers.is_empty() {
        "None specified".to_string()
    } else {
        providers
            .iter()
            .map(|p| p.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
