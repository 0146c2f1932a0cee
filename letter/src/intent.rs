use std::sync::Arc;

use crate::{beacon::Tracker, details::split_recipients, error::IntentError};

pub const INTENT_EVENT: &str = "email_intent";

/// Who asked to be followed up about emailing the letter.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentSummary {
    pub from: Option<String>,
    pub recipients: Vec<String>,
}

impl IntentSummary {
    /// `from=<email|(none)>;recipients=<a,b|(none)>`
    pub fn extra(&self) -> String {
        let recipients = if self.recipients.is_empty() {
            "(none)".to_string()
        } else {
            self.recipients.join(",")
        };
        format!(
            "from={};recipients={}",
            self.from.as_deref().unwrap_or("(none)"),
            recipients
        )
    }
}

/// Records a one-time request for follow-up. Only the addresses travel,
/// never the letter.
pub struct IntentCapture {
    submitted: bool,
    tracker: Arc<dyn Tracker>,
}

impl IntentCapture {
    pub fn new(tracker: Arc<dyn Tracker>) -> Self {
        Self {
            submitted: false,
            tracker,
        }
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Allows a new request, used when a new letter has been downloaded.
    pub fn reset(&mut self) {
        self.submitted = false;
    }

    pub fn submit(
        &mut self,
        primary_email: &str,
        recipients_csv: &str,
    ) -> Result<IntentSummary, IntentError> {
        if self.submitted {
            return Err(IntentError::AlreadySubmitted);
        }

        let primary = primary_email.trim();
        let recipients = split_recipients(recipients_csv);

        if primary.is_empty() && recipients.is_empty() {
            return Err(IntentError::NothingToFollowUp);
        }

        let summary = IntentSummary {
            from: Some(primary.to_string()).filter(|primary| !primary.is_empty()),
            recipients,
        };

        self.submitted = true;
        self.tracker.track(INTENT_EVENT, Some(&summary.extra()));

        Ok(summary)
    }
}
