//! Directive wizard use case
//!
//! Owns the session state machine and the form for one run, and composes
//! the summary and sealing collaborators into the full flow.

use crate::domain::directive::{DirectiveForm, DirectivePrompt, SectionPatch};
use crate::domain::wizard::{can_advance, Step, WizardSession, WizardStage};

use super::ports::{DigestFunction, Summarizer, SummaryError};
use super::seal::{seal_directive, SealError, SealedRecord};

/// Directive wizard use case.
///
/// The session, the form, and the generated summary are exclusively owned
/// here and mutated synchronously in response to discrete user actions;
/// `&mut self` on the mutating operations is what keeps summary requests
/// single-flight.
pub struct DirectiveWizard<S, D>
where
    S: Summarizer,
    D: DigestFunction,
{
    session: WizardSession,
    form: DirectiveForm,
    summarizer: S,
    digest: D,
    summary: Option<String>,
}

impl<S, D> DirectiveWizard<S, D>
where
    S: Summarizer,
    D: DigestFunction,
{
    /// Create a wizard at the welcome stage with an empty form
    pub fn new(summarizer: S, digest: D) -> Self {
        Self {
            session: WizardSession::new(),
            form: DirectiveForm::new(),
            summarizer,
            digest,
            summary: None,
        }
    }

    /// Get the current stage
    pub fn stage(&self) -> WizardStage {
        self.session.stage()
    }

    /// Whether the welcome screen is still showing
    pub fn is_welcome(&self) -> bool {
        self.session.is_welcome()
    }

    /// Get the current step, if past the welcome stage
    pub fn current_step(&self) -> Option<Step> {
        self.session.current_step()
    }

    /// Whether a step has been completed (moved past)
    pub fn is_completed(&self, step: Step) -> bool {
        self.session.is_completed(step)
    }

    /// Get the form
    pub fn form(&self) -> &DirectiveForm {
        &self.form
    }

    /// Get the summary generated during the current Summary-step visit
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Whether the current step's forward-navigation rule is satisfied
    pub fn can_advance(&self) -> bool {
        match self.session.current_step() {
            None => true, // welcome screen always proceeds to step 1
            Some(step) => can_advance(step, &self.form, self.summary.as_deref()),
        }
    }

    /// Leave the welcome screen and enter step 1
    pub fn begin(&mut self) {
        self.session.begin();
    }

    /// Move forward one step, clamped at the terminal step.
    ///
    /// The transition itself is not validity-gated; screens disable their
    /// Next affordance while `can_advance` is false.
    pub fn advance(&mut self) {
        let from = self.session.current_step();
        self.session.advance();
        self.discard_summary_if_left(from);
    }

    /// Move back one step, clamped at step 1. Always allowed.
    pub fn retreat(&mut self) {
        let from = self.session.current_step();
        self.session.retreat();
        self.discard_summary_if_left(from);
    }

    /// Jump to a step by number. Out-of-range input is silently absorbed;
    /// callers offer only completed steps as targets.
    pub fn jump_to(&mut self, number: u8) {
        let from = self.session.current_step();
        self.session.jump_to(number);
        self.discard_summary_if_left(from);
    }

    /// Apply a section-scoped partial update to the form
    pub fn update_section(&mut self, patch: SectionPatch) {
        self.form.apply(patch);
    }

    /// Request a drafted summary from the text-generation collaborator.
    ///
    /// The stored summary for this Summary-step visit is replaced on
    /// success; on failure nothing is stored and the caller surfaces a
    /// fixed failure message. No retry is attempted here.
    pub async fn generate_summary(&mut self) -> Result<String, SummaryError> {
        let prompt = DirectivePrompt::build(&self.form);
        let text = self.summarizer.summarize(&prompt).await?;
        self.summary = Some(text.clone());
        Ok(text)
    }

    /// Seal the directive into its display-only receipt
    pub fn seal(&self) -> Result<SealedRecord, SealError> {
        seal_directive(&self.digest, &self.form)
    }

    // A summary lives only as long as the Summary-step visit that
    // produced it; navigating away discards it.
    fn discard_summary_if_left(&mut self, from: Option<Step>) {
        if from == Some(Step::Summary) && self.session.current_step() != Some(Step::Summary) {
            self.summary = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{DigestError, SummaryError};
    use crate::domain::directive::PersonalInfoPatch;
    use async_trait::async_trait;

    struct FixedSummarizer {
        fail: bool,
    }

    #[async_trait]
    impl Summarizer for FixedSummarizer {
        async fn summarize(&self, prompt: &DirectivePrompt) -> Result<String, SummaryError> {
            if self.fail {
                Err(SummaryError::ApiError("boom".into()))
            } else {
                Ok(format!("Document ({} chars of prompt)", prompt.content().len()))
            }
        }
    }

    struct LenDigest;

    impl DigestFunction for LenDigest {
        fn digest_hex(&self, bytes: &[u8]) -> Result<String, DigestError> {
            Ok(format!("{:08x}", bytes.len()))
        }
    }

    fn wizard() -> DirectiveWizard<FixedSummarizer, LenDigest> {
        DirectiveWizard::new(FixedSummarizer { fail: false }, LenDigest)
    }

    fn fill_personal_info(w: &mut DirectiveWizard<FixedSummarizer, LenDigest>) {
        w.update_section(SectionPatch::PersonalInfo(PersonalInfoPatch {
            surname: Some("Ahn".into()),
            given_name: Some("Jisoo".into()),
            sex: Some("Female".into()),
            date_of_birth: Some("1952-03-14".into()),
            nationality: Some("Korean".into()),
        }));
    }

    #[test]
    fn starts_on_welcome_with_empty_form() {
        let w = wizard();
        assert!(w.is_welcome());
        assert!(w.form().personal_info.surname.is_empty());
        assert!(w.summary().is_none());
    }

    #[test]
    fn step_one_gates_until_personal_info_is_filled() {
        let mut w = wizard();
        w.begin();
        assert_eq!(w.current_step(), Some(Step::PersonalInfo));
        assert!(!w.can_advance());

        fill_personal_info(&mut w);
        assert!(w.can_advance());

        w.advance();
        assert_eq!(w.current_step(), Some(Step::HealthStatus));
    }

    #[test]
    fn updates_merge_across_calls() {
        let mut w = wizard();
        w.begin();
        w.update_section(SectionPatch::PersonalInfo(PersonalInfoPatch {
            surname: Some("Ahn".into()),
            ..Default::default()
        }));
        w.update_section(SectionPatch::PersonalInfo(PersonalInfoPatch {
            given_name: Some("Jisoo".into()),
            ..Default::default()
        }));
        assert_eq!(w.form().personal_info.surname, "Ahn");
        assert_eq!(w.form().personal_info.given_name, "Jisoo");
    }

    #[test]
    fn jump_back_from_summary_is_permitted() {
        let mut w = wizard();
        w.begin();
        w.jump_to(8);
        assert_eq!(w.current_step(), Some(Step::Summary));

        w.jump_to(5);
        assert_eq!(w.current_step(), Some(Step::PersonalWishes));
        assert!(w.is_completed(Step::PersonalInfo));
        assert!(!w.is_completed(Step::Summary));
    }

    #[tokio::test]
    async fn summary_gate_opens_after_generation() {
        let mut w = wizard();
        w.begin();
        w.jump_to(8);
        assert!(!w.can_advance());

        let text = w.generate_summary().await.unwrap();
        assert!(text.starts_with("Document"));
        assert!(w.can_advance());

        w.advance();
        assert_eq!(w.current_step(), Some(Step::Confirmation));
        assert!(!w.can_advance());
    }

    #[tokio::test]
    async fn failed_generation_stores_nothing() {
        let mut w = DirectiveWizard::new(FixedSummarizer { fail: true }, LenDigest);
        w.begin();
        w.jump_to(8);

        assert!(w.generate_summary().await.is_err());
        assert!(w.summary().is_none());
        assert!(!w.can_advance());
    }

    #[tokio::test]
    async fn leaving_the_summary_step_discards_the_summary() {
        let mut w = wizard();
        w.begin();
        w.jump_to(8);
        w.generate_summary().await.unwrap();
        assert!(w.summary().is_some());

        w.retreat();
        assert!(w.summary().is_none());

        // Returning requires generating again before the gate opens
        w.advance();
        assert_eq!(w.current_step(), Some(Step::Summary));
        assert!(!w.can_advance());
    }

    #[test]
    fn seal_produces_a_marker_prefixed_hash() {
        let w = wizard();
        let record = w.seal().unwrap();
        assert!(record.hash().starts_with("0x"));
    }

    #[test]
    fn navigation_clamps_silently() {
        let mut w = wizard();
        w.begin();
        w.retreat();
        assert_eq!(w.current_step(), Some(Step::PersonalInfo));

        w.jump_to(9);
        for _ in 0..3 {
            w.advance();
        }
        assert_eq!(w.current_step(), Some(Step::Confirmation));
    }
}
