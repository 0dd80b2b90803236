//! Interactive step screens
//!
//! Each screen renders the current section values and collects edits as
//! section patches; navigation is prompted by the app runner afterwards
//! so that the per-step gating stays in one place. Screens read from a
//! generic reader, so tests drive them with in-memory cursors.

use std::io::{self, BufRead};

use crate::application::consent::ConsentRecorder;
use crate::application::ports::{Clipboard, ClipPlayer, ConsentCapture, DigestFunction, Summarizer};
use crate::application::wizard::DirectiveWizard;
use crate::domain::directive::{
    AdvanceDirective, AdvanceDirectivePatch, ConsentRecording, ConsentRole, FinancialPatch,
    HealthStatusPatch, OrganDonationPatch, PersonalInfo, PersonalInfoPatch,
    PrognosisInsurancePatch, SectionPatch, SupportSystemPatch, WishesPatch, ALL_CONSENT_ROLES,
    ALL_COVERAGE_TIERS, ALL_HEALTH_LEVELS, ALL_PASSING_LOCATIONS, ALL_PROGNOSIS_PERIODS,
    ALL_SUPPORT_PROVIDERS,
};
use crate::domain::directive::{DirectiveForm, Financial, HealthStatus, OrganDonation, PrognosisInsurance, SupportSystem, Wishes};
use crate::domain::wizard::Step;

use super::input::{self, NavIntent};
use super::presenter::Presenter;

/// Fixed message shown when document generation fails
pub const SUMMARY_FAILURE_MESSAGE: &str =
    "There was an error generating the summary. Please try again.";

/// Fixed message shown when sealing fails
pub const SEAL_FAILURE_MESSAGE: &str = "Error generating secure hash.";

/// Welcome screen shown before step 1
pub fn welcome<R: BufRead>(presenter: &Presenter, input_reader: &mut R) -> io::Result<()> {
    presenter.heading("Dignified Endings Directive");
    presenter.output(
        "This application is a tool to help you document your current health status \
         and articulate your wishes regarding end-of-life care. It is designed to \
         facilitate clear communication and ensure your choices are understood and \
         respected. Every individual has the right to a dignified and honored passing.",
    );
    presenter.output("");
    presenter.output(
        "Please proceed with solemn consideration. The information you provide will \
         be used to construct a personal directive.",
    );
    presenter.output("");
    presenter.output_inline("Press Enter to begin the process. ");
    input::read_line(input_reader)?;
    Ok(())
}

/// Step 1: personal information
pub fn personal_info<R: BufRead>(
    presenter: &Presenter,
    input_reader: &mut R,
    section: &PersonalInfo,
) -> io::Result<Vec<SectionPatch>> {
    let patch = PersonalInfoPatch {
        surname: input::prompt_text(presenter, input_reader, "Surname", &section.surname)?,
        given_name: input::prompt_text(
            presenter,
            input_reader,
            "Given name",
            &section.given_name,
        )?,
        sex: input::prompt_text(presenter, input_reader, "Sex", &section.sex)?,
        date_of_birth: input::prompt_text(
            presenter,
            input_reader,
            "Date of birth (YYYY-MM-DD)",
            &section.date_of_birth,
        )?,
        nationality: input::prompt_text(
            presenter,
            input_reader,
            "Nationality",
            &section.nationality,
        )?,
    };
    Ok(vec![SectionPatch::PersonalInfo(patch)])
}

/// Step 2: health status
pub fn health_status<R: BufRead>(
    presenter: &Presenter,
    input_reader: &mut R,
    section: &HealthStatus,
) -> io::Result<Vec<SectionPatch>> {
    let patch = HealthStatusPatch {
        self_assessed: input::prompt_choice(
            presenter,
            input_reader,
            "How would you assess your current health?",
            ALL_HEALTH_LEVELS,
            section.self_assessed,
        )?,
        self_assessed_details: input::prompt_text(
            presenter,
            input_reader,
            "Details on your self-assessment",
            &section.self_assessed_details,
        )?,
        diagnosed: input::prompt_choice(
            presenter,
            input_reader,
            "What level has been medically diagnosed?",
            ALL_HEALTH_LEVELS,
            section.diagnosed,
        )?,
        diagnosed_condition: input::prompt_text(
            presenter,
            input_reader,
            "Diagnosed condition (required for a Low diagnosis)",
            &section.diagnosed_condition,
        )?,
        doctor_opinion: input::prompt_text(
            presenter,
            input_reader,
            "Your physician's opinion",
            &section.doctor_opinion,
        )?,
    };
    Ok(vec![SectionPatch::HealthStatus(patch)])
}

/// Step 3: support system
pub fn support_system<R: BufRead>(
    presenter: &Presenter,
    input_reader: &mut R,
    section: &SupportSystem,
) -> io::Result<Vec<SectionPatch>> {
    let patch = SupportSystemPatch {
        home_care: input::prompt_multi_choice(
            presenter,
            input_reader,
            "Who provides your care at home?",
            ALL_SUPPORT_PROVIDERS,
            &section.home_care,
        )?,
        hospital_care: input::prompt_multi_choice(
            presenter,
            input_reader,
            "Who provides your care in hospital?",
            ALL_SUPPORT_PROVIDERS,
            &section.hospital_care,
        )?,
    };
    Ok(vec![SectionPatch::SupportSystem(patch)])
}

/// Step 4: prognosis, insurance, and financial provisions
pub fn prognosis_insurance<R: BufRead>(
    presenter: &Presenter,
    input_reader: &mut R,
    prognosis: &PrognosisInsurance,
    financial: &Financial,
) -> io::Result<Vec<SectionPatch>> {
    let recovery_prognosis = input::prompt_choice(
        presenter,
        input_reader,
        "Expected recovery prognosis",
        ALL_PROGNOSIS_PERIODS,
        prognosis.recovery_prognosis,
    )?;

    let has_insurance = input::prompt_yes_no(
        presenter,
        input_reader,
        "Do you hold medical insurance?",
        prognosis.has_insurance,
    )?;
    let insured_now = has_insurance.unwrap_or(prognosis.has_insurance);

    let insurance_coverage = if insured_now {
        input::prompt_choice(
            presenter,
            input_reader,
            "Insurance coverage",
            ALL_COVERAGE_TIERS,
            prognosis.insurance_coverage,
        )?
    } else {
        None
    };

    let is_family_provided_for = input::prompt_yes_no(
        presenter,
        input_reader,
        "Are your family's financial needs met?",
        financial.is_family_provided_for,
    )?;
    let provided_now = is_family_provided_for.unwrap_or(financial.is_family_provided_for);

    let financial_wishes = if provided_now {
        None
    } else {
        input::prompt_text(
            presenter,
            input_reader,
            "Your wishes regarding family finances",
            &financial.financial_wishes,
        )?
    };

    let has_life_insurance = input::prompt_yes_no(
        presenter,
        input_reader,
        "Do you hold life insurance?",
        financial.has_life_insurance,
    )?;

    Ok(vec![
        SectionPatch::PrognosisInsurance(PrognosisInsurancePatch {
            recovery_prognosis,
            has_insurance,
            insurance_coverage,
        }),
        SectionPatch::Financial(FinancialPatch {
            is_family_provided_for,
            financial_wishes,
            has_life_insurance,
        }),
    ])
}

/// Step 5: personal wishes
pub fn personal_wishes<R: BufRead>(
    presenter: &Presenter,
    input_reader: &mut R,
    section: &Wishes,
) -> io::Result<Vec<SectionPatch>> {
    let patch = WishesPatch {
        future_life_wishes: input::prompt_text(
            presenter,
            input_reader,
            "Your hopes for the future",
            &section.future_life_wishes,
        )?,
        impact_on_family: input::prompt_text(
            presenter,
            input_reader,
            "Your reflections on how this affects your family",
            &section.impact_on_family,
        )?,
    };
    Ok(vec![SectionPatch::Wishes(patch)])
}

/// Step 6: advance directive, including the three spoken consents
pub async fn advance_directive<R, C, P, F>(
    presenter: &Presenter,
    input_reader: &mut R,
    section: &AdvanceDirective,
    make_recorder: F,
) -> io::Result<Vec<SectionPatch>>
where
    R: BufRead,
    C: ConsentCapture,
    P: ClipPlayer,
    F: Fn(ConsentRecording) -> ConsentRecorder<C, P>,
{
    let refuse_treatment = input::prompt_yes_no(
        presenter,
        input_reader,
        "Refuse life-sustaining treatment if your condition is deemed irrecoverable?",
        section.refuse_treatment,
    )?;
    let refusing_now = refuse_treatment.unwrap_or(section.refuse_treatment);

    let mut patch = AdvanceDirectivePatch {
        refuse_treatment,
        ..Default::default()
    };

    if refusing_now {
        patch.preferred_location = input::prompt_choice(
            presenter,
            input_reader,
            "Preferred location for end-of-life care",
            ALL_PASSING_LOCATIONS,
            section.preferred_location,
        )?;
        patch.family_member_name = input::prompt_text(
            presenter,
            input_reader,
            "Designated family member's name",
            &section.family_member_name,
        )?;
        patch.physician_name = input::prompt_text(
            presenter,
            input_reader,
            "Primary physician's name",
            &section.physician_name,
        )?;

        presenter.info("Spoken consent is required from all three parties.");
        for role in ALL_CONSENT_ROLES {
            let recorder = make_recorder(section.consent(*role).clone());
            let recording = record_consent(presenter, input_reader, *role, recorder).await?;
            match role {
                ConsentRole::Patient => patch.patient_consent = Some(recording),
                ConsentRole::Family => patch.family_consent = Some(recording),
                ConsentRole::Physician => patch.physician_consent = Some(recording),
            }
        }
    }

    Ok(vec![SectionPatch::AdvanceDirective(patch)])
}

/// Drive one consent slot through record/play/delete until the user
/// moves on. The recorder is consumed so a session left running is
/// always cancelled on the way out.
async fn record_consent<R, C, P>(
    presenter: &Presenter,
    input_reader: &mut R,
    role: ConsentRole,
    mut recorder: ConsentRecorder<C, P>,
) -> io::Result<ConsentRecording>
where
    R: BufRead,
    C: ConsentCapture,
    P: ClipPlayer,
{
    loop {
        let status = if recorder.recording().is_recorded() {
            "Consent recorded."
        } else {
            "Ready to record."
        };
        presenter.output(&format!("{} — {}", role.label(), status));

        let commands = if recorder.recording().is_recorded() {
            "[p] play  [d] delete  [enter] continue"
        } else {
            "[r] record  [enter] continue"
        };
        presenter.output(commands);
        presenter.output_inline("> ");

        let Some(line) = input::read_line(input_reader)? else {
            break;
        };
        match line.to_lowercase().as_str() {
            "" => break,
            "r" => {
                match recorder.start_recording().await {
                    Err(e) if e.is_permission_denied() => {
                        presenter.error("Microphone access denied.");
                        continue;
                    }
                    Err(e) => {
                        presenter.error(&e.to_string());
                        continue;
                    }
                    Ok(()) => {}
                }
                presenter.info("Recording... press Enter to stop.");
                input::read_line(input_reader)?;
                match recorder.stop_recording().await {
                    Ok(()) => presenter.success("Consent recorded."),
                    Err(e) => presenter.error(&e.to_string()),
                }
            }
            "p" => {
                if let Err(e) = recorder.play().await {
                    presenter.error(&e.to_string());
                }
            }
            "d" => {
                if let Err(e) = recorder.delete() {
                    presenter.error(&e.to_string());
                }
            }
            _ => presenter.warn("Unknown command."),
        }
    }

    Ok(recorder.into_recording().await)
}

/// Step 7: organ donation
pub fn organ_donation<R: BufRead>(
    presenter: &Presenter,
    input_reader: &mut R,
    section: &OrganDonation,
) -> io::Result<Vec<SectionPatch>> {
    let patch = OrganDonationPatch {
        consent_to_donate: input::prompt_yes_no(
            presenter,
            input_reader,
            "Do you consent to organ donation?",
            section.consent_to_donate,
        )?,
        legal_agreement: input::prompt_yes_no(
            presenter,
            input_reader,
            "Do you affirm that you understand the legal weight of this directive?",
            section.legal_agreement,
        )?,
    };
    Ok(vec![SectionPatch::OrganDonation(patch)])
}

/// Step 8: review and document generation.
/// Returns the navigation intent chosen from within the screen.
pub async fn summary<R, S, D>(
    presenter: &mut Presenter,
    input_reader: &mut R,
    wizard: &mut DirectiveWizard<S, D>,
) -> io::Result<NavIntent>
where
    R: BufRead,
    S: Summarizer,
    D: DigestFunction,
{
    render_review(presenter, wizard.form());

    loop {
        presenter.output(
            "[g] generate the formal document  [b] back  [1-7] edit a step  \
             [n] confirm & create secure record  [q] quit",
        );
        presenter.output_inline("> ");
        let Some(line) = input::read_line(input_reader)? else {
            return Ok(NavIntent::Quit);
        };
        match line.to_lowercase().as_str() {
            "g" => {
                presenter.start_spinner("Generating formal document...");
                match wizard.generate_summary().await {
                    Ok(_) => {
                        presenter.spinner_success("Document generated");
                        if let Some(text) = wizard.summary() {
                            presenter.output("");
                            presenter.output(text);
                            presenter.output("");
                        }
                    }
                    Err(e) => {
                        presenter.spinner_fail(SUMMARY_FAILURE_MESSAGE);
                        presenter.error(&e.to_string());
                    }
                }
            }
            "n" => {
                if wizard.can_advance() {
                    return Ok(NavIntent::Next);
                }
                presenter.warn("Generate the formal document before creating the secure record.");
            }
            "b" => return Ok(NavIntent::Back),
            "q" => return Ok(NavIntent::Quit),
            other => match other.parse::<u8>() {
                Ok(step) => return Ok(NavIntent::Jump(step)),
                Err(_) => presenter.warn("Unknown command."),
            },
        }
    }
}

/// Step 9: seal the directive and show the receipt. Terminal screen.
pub async fn confirmation<S, D, CB>(
    presenter: &mut Presenter,
    wizard: &DirectiveWizard<S, D>,
    clipboard: Option<&CB>,
) where
    S: Summarizer,
    D: DigestFunction,
    CB: Clipboard,
{
    presenter.start_spinner("Securing your directive...");

    match wizard.seal() {
        Ok(record) => {
            presenter.spinner_success("Directive secured");
            presenter.output("");
            presenter.output("Your Advance Directive has been securely recorded.");
            presenter.output("");
            presenter.output("Directive record hash (SHA-256):");
            presenter.output(record.hash());

            let ad = &wizard.form().advance_directive;
            if !ad.family_member_name.is_empty() || !ad.physician_name.is_empty() {
                presenter.output("");
                presenter.output(&format!(
                    "Share this record with your designated family member ({}) and physician ({}).",
                    ad.family_member_name, ad.physician_name
                ));
            }
            presenter.output("");
            presenter.output("Please keep a copy of the record hash for your records.");

            if let Some(clipboard) = clipboard {
                match clipboard.copy(record.hash()).await {
                    Ok(()) => presenter.info("Record hash copied to clipboard"),
                    Err(e) => presenter.warn(&format!("Clipboard copy failed: {}", e)),
                }
            }
        }
        Err(e) => {
            presenter.spinner_fail(SEAL_FAILURE_MESSAGE);
            presenter.error(&e.to_string());
        }
    }
}

/// Render the review list shown at the top of the Summary step
fn render_review(presenter: &Presenter, form: &DirectiveForm) {
    presenter.output("Directive details:");
    presenter.review_item(
        "Full Name",
        &format!(
            "{} {}",
            form.personal_info.given_name, form.personal_info.surname
        )
        .trim()
        .to_string(),
        Step::PersonalInfo,
    );
    presenter.review_item(
        "Health Status (Self-Assessed)",
        form.health_status
            .self_assessed
            .map(|l| l.label())
            .unwrap_or(""),
        Step::HealthStatus,
    );
    presenter.review_item(
        "Health Status (Diagnosed)",
        form.health_status.diagnosed.map(|l| l.label()).unwrap_or(""),
        Step::HealthStatus,
    );
    presenter.review_item(
        "Refuse Treatment",
        if form.advance_directive.refuse_treatment {
            "Yes"
        } else {
            "No"
        },
        Step::AdvanceDirective,
    );
    presenter.review_item(
        "Organ Donation",
        if form.organ_donation.consent_to_donate {
            "Yes"
        } else {
            "No"
        },
        Step::OrganDonation,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::directive::{HealthLevel, PrognosisPeriod, SupportProvider};
    use std::io::Cursor;

    fn presenter() -> Presenter {
        Presenter::new()
    }

    fn apply_all(form: &mut DirectiveForm, patches: Vec<SectionPatch>) {
        for patch in patches {
            form.apply(patch);
        }
    }

    #[test]
    fn personal_info_screen_builds_a_partial_patch() {
        let mut form = DirectiveForm::new();
        // Fill surname and sex; keep the rest
        let mut input = Cursor::new("Ahn\n\nFemale\n\n\n");
        let patches =
            personal_info(&presenter(), &mut input, &form.personal_info).unwrap();
        apply_all(&mut form, patches);

        assert_eq!(form.personal_info.surname, "Ahn");
        assert_eq!(form.personal_info.sex, "Female");
        assert!(form.personal_info.given_name.is_empty());
    }

    #[test]
    fn personal_info_screen_keeps_existing_values() {
        let mut form = DirectiveForm::new();
        form.personal_info.surname = "Ahn".into();

        let mut input = Cursor::new("\nJisoo\n\n\n\n");
        let patches =
            personal_info(&presenter(), &mut input, &form.personal_info).unwrap();
        apply_all(&mut form, patches);

        assert_eq!(form.personal_info.surname, "Ahn");
        assert_eq!(form.personal_info.given_name, "Jisoo");
    }

    #[test]
    fn health_status_screen_sets_levels() {
        let mut form = DirectiveForm::new();
        // self-assessed: 1 (High), details kept, diagnosed: 3 (Low),
        // condition entered, opinion kept
        let mut input = Cursor::new("1\n\n3\nChronic heart failure\n\n");
        let patches = health_status(&presenter(), &mut input, &form.health_status).unwrap();
        apply_all(&mut form, patches);

        assert_eq!(form.health_status.self_assessed, Some(HealthLevel::High));
        assert_eq!(form.health_status.diagnosed, Some(HealthLevel::Low));
        assert_eq!(form.health_status.diagnosed_condition, "Chronic heart failure");
    }

    #[test]
    fn support_system_screen_sets_providers() {
        let mut form = DirectiveForm::new();
        let mut input = Cursor::new("1,2\nnone\n");
        let patches = support_system(&presenter(), &mut input, &form.support_system).unwrap();
        apply_all(&mut form, patches);

        assert_eq!(
            form.support_system.home_care,
            vec![SupportProvider::Spouse, SupportProvider::Children]
        );
        assert!(form.support_system.hospital_care.is_empty());
    }

    #[test]
    fn prognosis_screen_skips_coverage_without_insurance() {
        let mut form = DirectiveForm::new();
        // prognosis: 2 (6 Months), insurance: n, provided-for: y,
        // life insurance: n
        let mut input = Cursor::new("2\nn\ny\nn\n");
        let patches = prognosis_insurance(
            &presenter(),
            &mut input,
            &form.prognosis_insurance,
            &form.financial,
        )
        .unwrap();
        apply_all(&mut form, patches);

        assert_eq!(
            form.prognosis_insurance.recovery_prognosis,
            Some(PrognosisPeriod::SixMonths)
        );
        assert!(!form.prognosis_insurance.has_insurance);
        assert!(form.prognosis_insurance.insurance_coverage.is_none());
        assert!(form.financial.is_family_provided_for);
        assert!(form.financial.financial_wishes.is_empty());
    }

    #[test]
    fn prognosis_screen_collects_wishes_when_not_provided_for() {
        let mut form = DirectiveForm::new();
        // prognosis: 4, insurance: y, coverage: 3 (70%), provided: n,
        // wishes text, life insurance: y
        let mut input = Cursor::new("4\ny\n3\nn\nSell the orchard.\ny\n");
        let patches = prognosis_insurance(
            &presenter(),
            &mut input,
            &form.prognosis_insurance,
            &form.financial,
        )
        .unwrap();
        apply_all(&mut form, patches);

        assert!(form.prognosis_insurance.has_insurance);
        assert!(form.prognosis_insurance.insurance_coverage.is_some());
        assert_eq!(form.financial.financial_wishes, "Sell the orchard.");
        assert!(form.financial.has_life_insurance);
    }

    #[test]
    fn organ_donation_screen_sets_both_flags() {
        let mut form = DirectiveForm::new();
        let mut input = Cursor::new("n\ny\n");
        let patches = organ_donation(&presenter(), &mut input, &form.organ_donation).unwrap();
        apply_all(&mut form, patches);

        assert!(!form.organ_donation.consent_to_donate);
        assert!(form.organ_donation.legal_agreement);
    }

    #[test]
    fn welcome_screen_waits_for_enter() {
        let mut input = Cursor::new("\n");
        assert!(welcome(&presenter(), &mut input).is_ok());
    }
}
