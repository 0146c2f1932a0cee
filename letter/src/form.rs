use std::{fmt::Display, path::PathBuf, sync::Arc};

use chrono::{DateTime, TimeZone};

use crate::{
    beacon::Tracker,
    details::PersonalDetails,
    download::DownloadEmitter,
    error::{FormError, IntentError, ResponseError},
    format::format_letter,
    intent::{IntentCapture, IntentSummary},
    navigator::{DetailsStep, StepKind, StepNavigator},
    prompts::{Prompt, PromptSet},
    responses::ResponseMap,
};

pub const PAGE_VIEW_EVENT: &str = "page_view";
pub const DOWNLOAD_EVENT: &str = "generate_download";

/// The step the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentStep<'a> {
    Details(&'a PersonalDetails),
    Prompt { prompt: &'a Prompt, answer: &'a str },
}

/// State of one letter-writing session: answers, position in the flow,
/// validation and completion flags, and the follow-up request.
pub struct LetterForm {
    prompts: PromptSet,
    responses: ResponseMap,
    details: PersonalDetails,
    navigator: StepNavigator,
    show_errors: bool,
    completed: bool,
    intent: IntentCapture,
    tracker: Arc<dyn Tracker>,
}

impl LetterForm {
    /// Opens the form, which counts as a page view.
    pub fn new(prompts: PromptSet, details_step: DetailsStep, tracker: Arc<dyn Tracker>) -> Self {
        tracker.track(PAGE_VIEW_EVENT, None);

        Self {
            responses: ResponseMap::new(&prompts),
            navigator: StepNavigator::new(prompts.len(), details_step),
            prompts,
            details: PersonalDetails::default(),
            show_errors: false,
            completed: false,
            intent: IntentCapture::new(tracker.clone()),
            tracker,
        }
    }

    pub fn prompts(&self) -> &PromptSet {
        &self.prompts
    }

    pub fn responses(&self) -> &ResponseMap {
        &self.responses
    }

    pub fn details(&self) -> &PersonalDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut PersonalDetails {
        &mut self.details
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn step(&self) -> usize {
        self.navigator.step()
    }

    /// `None` only if the navigator ran past the prompt set, which the
    /// form never lets happen.
    pub fn current(&self) -> Option<CurrentStep<'_>> {
        match self.navigator.kind() {
            StepKind::Details => Some(CurrentStep::Details(&self.details)),
            StepKind::Prompt(index) => self.prompts.get(index).map(|prompt| CurrentStep::Prompt {
                prompt,
                answer: self.responses.get(&prompt.id),
            }),
        }
    }

    pub fn edit(&mut self, id: &str, answer: impl Into<String>) -> Result<(), ResponseError> {
        self.responses.set(id, answer)
    }

    /// Replaces the answer of the active prompt. Does nothing on the
    /// details step.
    pub fn edit_current(&mut self, answer: impl Into<String>) {
        if let StepKind::Prompt(index) = self.navigator.kind() {
            if let Some(prompt) = self.prompts.get(index) {
                let id = prompt.id.clone();
                let _ = self.responses.set(&id, answer);
            }
        }
    }

    pub fn current_step_complete(&self) -> bool {
        self.navigator.step_complete(&self.prompts, &self.responses)
    }

    pub fn next(&mut self) -> bool {
        self.show_errors = false;
        self.navigator.next(&self.prompts, &self.responses)
    }

    pub fn back(&mut self) -> bool {
        self.show_errors = false;
        self.navigator.back()
    }

    pub fn is_last_step(&self) -> bool {
        self.navigator.is_last()
    }

    /// Set after a submission with unanswered prompts.
    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn is_complete(&self) -> bool {
        self.responses.is_complete(&self.prompts)
    }

    /// Set once a letter has been downloaded.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn progress(&self) -> f64 {
        self.navigator.progress()
    }

    fn letter_details(&self) -> Option<&PersonalDetails> {
        match self.navigator.details() {
            DetailsStep::Disabled => None,
            DetailsStep::Leading | DetailsStep::Trailing => Some(&self.details),
        }
    }

    /// The letter as it would be downloaded right now.
    pub fn preview<Tz>(&self, timestamp: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format_letter(&self.prompts, &self.responses, timestamp, self.letter_details())
    }

    /// Downloads the letter if every prompt is answered. Otherwise raises
    /// the validation flag and leaves the flow where it is.
    pub fn submit<Tz>(
        &mut self,
        timestamp: &DateTime<Tz>,
        emitter: &DownloadEmitter,
    ) -> Result<PathBuf, FormError>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        if !self.is_complete() {
            self.show_errors = true;
            return Err(FormError::Incomplete {
                missing: self
                    .responses
                    .unanswered(&self.prompts)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }

        let path = emitter
            .emit(&self.prompts, &self.responses, self.letter_details(), timestamp)
            .map_err(|err| FormError::Save {
                reason: format!("{:#}", err),
            })?;

        self.show_errors = false;
        self.completed = true;
        self.intent.reset();
        self.tracker.track(DOWNLOAD_EVENT, None);

        Ok(path)
    }

    pub fn intent_submitted(&self) -> bool {
        self.intent.is_submitted()
    }

    /// Asks for follow-up using the email and recipients from the details.
    pub fn submit_intent(&mut self) -> Result<IntentSummary, IntentError> {
        self.intent
            .submit(&self.details.email, &self.details.recipients)
    }
}
