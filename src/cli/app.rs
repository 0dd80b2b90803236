//! Main app runner for the wizard flow

use std::env;
use std::io::{self, BufRead};
use std::process::ExitCode;

use crate::application::consent::ConsentRecorder;
use crate::application::ports::ConfigStore;
use crate::application::wizard::DirectiveWizard;
use crate::domain::config::AppConfig;
use crate::domain::wizard::Step;
use crate::infrastructure::capture::create_capture;
use crate::infrastructure::{
    ArboardClipboard, GeminiSummarizer, RodioClipPlayer, Sha256Digest, XdgConfigStore,
};

use super::args::WizardOptions;
use super::input::{self, NavIntent};
use super::presenter::Presenter;
use super::screens;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run the directive wizard
pub async fn run_wizard(options: WizardOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Load API key from config or environment
    let api_key = match get_api_key().await {
        Ok(key) => key,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create collaborators and the wizard
    let summarizer = GeminiSummarizer::with_model(api_key, &options.model);
    let digest = Sha256Digest::new();
    let mut wizard = DirectiveWizard::new(summarizer, digest);

    let stdin = io::stdin();
    let mut input_reader = stdin.lock();

    match drive(&mut presenter, &mut input_reader, &mut wizard, &options).await {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Input error: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Drive the wizard loop over the given reader until the flow finishes
/// or the user quits
async fn drive<R: BufRead>(
    presenter: &mut Presenter,
    input_reader: &mut R,
    wizard: &mut DirectiveWizard<GeminiSummarizer, Sha256Digest>,
    options: &WizardOptions,
) -> io::Result<()> {
    screens::welcome(presenter, input_reader)?;
    wizard.begin();

    loop {
        let Some(step) = wizard.current_step() else {
            return Ok(());
        };

        if !step.is_terminal() {
            presenter.step_indicator(step);
        }
        presenter.heading(&step.to_string());

        let intent = match step {
            Step::PersonalInfo => {
                let patches =
                    screens::personal_info(presenter, input_reader, &wizard.form().personal_info)?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, false)?
            }
            Step::HealthStatus => {
                let patches =
                    screens::health_status(presenter, input_reader, &wizard.form().health_status)?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, true)?
            }
            Step::SupportSystem => {
                let patches =
                    screens::support_system(presenter, input_reader, &wizard.form().support_system)?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, true)?
            }
            Step::PrognosisInsurance => {
                let patches = screens::prognosis_insurance(
                    presenter,
                    input_reader,
                    &wizard.form().prognosis_insurance,
                    &wizard.form().financial,
                )?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, true)?
            }
            Step::PersonalWishes => {
                let patches =
                    screens::personal_wishes(presenter, input_reader, &wizard.form().wishes)?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, true)?
            }
            Step::AdvanceDirective => {
                let section = wizard.form().advance_directive.clone();
                let patches = screens::advance_directive(
                    presenter,
                    input_reader,
                    &section,
                    |recording| {
                        ConsentRecorder::with_recording(
                            create_capture(),
                            RodioClipPlayer::new(),
                            recording,
                        )
                    },
                )
                .await?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, true)?
            }
            Step::OrganDonation => {
                let patches =
                    screens::organ_donation(presenter, input_reader, &wizard.form().organ_donation)?;
                apply(wizard, patches);
                input::prompt_nav(presenter, input_reader, true)?
            }
            Step::Summary => screens::summary(presenter, input_reader, wizard).await?,
            Step::Confirmation => {
                let clipboard = options.clipboard.then(ArboardClipboard::new);
                screens::confirmation(presenter, wizard, clipboard.as_ref()).await;
                return Ok(());
            }
        };

        match intent {
            NavIntent::Next => {
                if wizard.can_advance() {
                    wizard.advance();
                } else {
                    presenter.warn(gate_hint(step));
                }
            }
            NavIntent::Back => wizard.retreat(),
            NavIntent::Jump(number) => match Step::from_number(number) {
                Some(target) if wizard.is_completed(target) => wizard.jump_to(number),
                _ => presenter.warn("Only completed steps can be revisited."),
            },
            NavIntent::Quit => return Ok(()),
        }
    }
}

/// Apply a screen's patches to the wizard
fn apply(
    wizard: &mut DirectiveWizard<GeminiSummarizer, Sha256Digest>,
    patches: Vec<crate::domain::directive::SectionPatch>,
) {
    for patch in patches {
        wizard.update_section(patch);
    }
}

/// What is still missing when a step refuses to advance
fn gate_hint(step: Step) -> &'static str {
    match step {
        Step::PersonalInfo => "All personal fields are required before continuing.",
        Step::HealthStatus => {
            "Both health levels are required, and a Low diagnosis needs its condition named."
        }
        Step::PrognosisInsurance => {
            "A prognosis is required; insured holders pick coverage, and unmet family needs \
             require your financial wishes."
        }
        Step::AdvanceDirective => {
            "Refusing treatment requires a location, both names, and all three recorded consents."
        }
        Step::OrganDonation => "The statement of legal understanding must be affirmed.",
        Step::Summary => "Generate the formal document before creating the secure record.",
        _ => "This step is incomplete.",
    }
}

/// Get API key from environment or config file
pub async fn get_api_key() -> Result<String, String> {
    // Check environment first
    if let Ok(key) = env::var("GEMINI_API_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    // Check config file
    let store = XdgConfigStore::new();
    if let Ok(config) = store.load().await {
        if let Some(key) = config.api_key {
            if !key.is_empty() {
                return Ok(key);
            }
        }
    }

    Err(
        "Missing API key. Set GEMINI_API_KEY or configure via \
         'dignity-directive config set api_key <key>'"
            .to_string(),
    )
}

/// Merge defaults, the config file, and CLI overrides (highest wins)
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
