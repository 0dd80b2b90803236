//! Wizard session state machine

use super::step::Step;

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStage {
    /// Welcome screen shown before step 1
    #[default]
    Welcome,
    /// One of the nine steps
    InStep(Step),
}

/// Wizard session entity.
/// Tracks the current stage for one session's lifetime.
///
/// State machine:
///   WELCOME -> STEP 1 (begin)
///   STEP n  -> STEP n+1 (advance, clamped at 9)
///   STEP n  -> STEP n-1 (retreat, clamped at 1)
///   STEP n  -> STEP m   (jump_to, any 1..=9)
///
/// Invalid transitions are silently absorbed rather than raised: the flow
/// never dead-ends, matching the navigation contract of the screens.
#[derive(Debug, Default)]
pub struct WizardSession {
    stage: WizardStage,
}

impl WizardSession {
    /// Create a new session at the welcome stage
    pub fn new() -> Self {
        Self {
            stage: WizardStage::Welcome,
        }
    }

    /// Get the current stage
    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    /// Whether the welcome screen is still showing
    pub fn is_welcome(&self) -> bool {
        self.stage == WizardStage::Welcome
    }

    /// Get the current step, if past the welcome stage
    pub fn current_step(&self) -> Option<Step> {
        match self.stage {
            WizardStage::Welcome => None,
            WizardStage::InStep(step) => Some(step),
        }
    }

    /// Leave the welcome screen and enter step 1. No-op once begun.
    pub fn begin(&mut self) {
        if self.stage == WizardStage::Welcome {
            self.stage = WizardStage::InStep(Step::FIRST);
        }
    }

    /// Move forward one step. No-op at the terminal step or on the
    /// welcome screen. Does not consult the validator; forward gating is
    /// the caller's contract.
    pub fn advance(&mut self) {
        if let WizardStage::InStep(step) = self.stage {
            if let Some(next) = step.next() {
                self.stage = WizardStage::InStep(next);
            }
        }
    }

    /// Move back one step. Always allowed; no-op at step 1.
    pub fn retreat(&mut self) {
        if let WizardStage::InStep(step) = self.stage {
            if let Some(prev) = step.prev() {
                self.stage = WizardStage::InStep(prev);
            }
        }
    }

    /// Jump directly to a step by number. Out-of-range numbers and jumps
    /// from the welcome screen are silently absorbed. Callers are expected
    /// to offer only completed steps as targets.
    pub fn jump_to(&mut self, number: u8) {
        if self.stage == WizardStage::Welcome {
            return;
        }
        if let Some(step) = Step::from_number(number) {
            self.stage = WizardStage::InStep(step);
        }
    }

    /// Whether a step has been completed (the wizard has moved past it)
    pub fn is_completed(&self, step: Step) -> bool {
        match self.stage {
            WizardStage::Welcome => false,
            WizardStage::InStep(current) => step < current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_welcome() {
        let session = WizardSession::new();
        assert!(session.is_welcome());
        assert_eq!(session.current_step(), None);
    }

    #[test]
    fn begin_enters_step_one() {
        let mut session = WizardSession::new();
        session.begin();
        assert_eq!(session.current_step(), Some(Step::PersonalInfo));
    }

    #[test]
    fn begin_twice_is_a_noop() {
        let mut session = WizardSession::new();
        session.begin();
        session.advance();
        session.begin();
        assert_eq!(session.current_step(), Some(Step::HealthStatus));
    }

    #[test]
    fn advance_walks_to_terminal_and_clamps() {
        let mut session = WizardSession::new();
        session.begin();
        for _ in 0..12 {
            session.advance();
        }
        assert_eq!(session.current_step(), Some(Step::Confirmation));
    }

    #[test]
    fn advance_on_welcome_is_absorbed() {
        let mut session = WizardSession::new();
        session.advance();
        assert!(session.is_welcome());
    }

    #[test]
    fn retreat_clamps_at_step_one() {
        let mut session = WizardSession::new();
        session.begin();
        session.advance();
        session.retreat();
        session.retreat();
        assert_eq!(session.current_step(), Some(Step::PersonalInfo));
    }

    #[test]
    fn jump_to_any_step_in_range() {
        let mut session = WizardSession::new();
        session.begin();
        session.jump_to(8);
        assert_eq!(session.current_step(), Some(Step::Summary));
        session.jump_to(5);
        assert_eq!(session.current_step(), Some(Step::PersonalWishes));
    }

    #[test]
    fn jump_out_of_range_is_absorbed() {
        let mut session = WizardSession::new();
        session.begin();
        session.jump_to(0);
        session.jump_to(10);
        assert_eq!(session.current_step(), Some(Step::PersonalInfo));
    }

    #[test]
    fn jump_from_welcome_is_absorbed() {
        let mut session = WizardSession::new();
        session.jump_to(3);
        assert!(session.is_welcome());
    }

    #[test]
    fn completed_means_strictly_before_current() {
        let mut session = WizardSession::new();
        session.begin();
        session.jump_to(8);
        assert!(session.is_completed(Step::PersonalWishes));
        assert!(!session.is_completed(Step::Summary));
        assert!(!session.is_completed(Step::Confirmation));
    }

    #[test]
    fn nothing_is_completed_on_welcome() {
        let session = WizardSession::new();
        assert!(!session.is_completed(Step::PersonalInfo));
    }
}
