use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::{prompts::PromptSet, responses::ResponseMap};

/// Where the optional "about you" page sits in the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailsStep {
    #[default]
    Disabled,
    Leading,
    Trailing,
}

impl FromStr for DetailsStep {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "none" | "disabled" => Ok(DetailsStep::Disabled),
            "leading" => Ok(DetailsStep::Leading),
            "trailing" => Ok(DetailsStep::Trailing),
            other => bail!("Unknown details step {:?}, expected none, leading or trailing", other),
        }
    }
}

/// What the active step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Details,
    /// Index into the prompt set.
    Prompt(usize),
}

/// Linear walk over the steps. `next` is gated on the active prompt being
/// answered, `back` never is.
#[derive(Debug, Clone, PartialEq)]
pub struct StepNavigator {
    step: usize,
    prompts: usize,
    details: DetailsStep,
}

impl StepNavigator {
    pub fn new(prompts: usize, details: DetailsStep) -> Self {
        Self {
            step: 0,
            prompts,
            details,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn details(&self) -> DetailsStep {
        self.details
    }

    pub fn step_count(&self) -> usize {
        match self.details {
            DetailsStep::Disabled => self.prompts,
            DetailsStep::Leading | DetailsStep::Trailing => self.prompts + 1,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self.details {
            DetailsStep::Disabled => StepKind::Prompt(self.step),
            DetailsStep::Leading if self.step == 0 => StepKind::Details,
            DetailsStep::Leading => StepKind::Prompt(self.step - 1),
            DetailsStep::Trailing if self.step == self.prompts => StepKind::Details,
            DetailsStep::Trailing => StepKind::Prompt(self.step),
        }
    }

    pub fn is_first(&self) -> bool {
        self.step == 0
    }

    /// On the last step the form submits instead of moving on.
    pub fn is_last(&self) -> bool {
        self.step + 1 >= self.step_count()
    }

    /// Whether the active step lets the user move on.
    pub fn step_complete(&self, prompts: &PromptSet, responses: &ResponseMap) -> bool {
        match self.kind() {
            StepKind::Details => true,
            StepKind::Prompt(index) => prompts
                .get(index)
                .map(|prompt| responses.is_answered(&prompt.id))
                .unwrap_or(false),
        }
    }

    /// Moves one step forward. Returns `false` and stays put when the
    /// active prompt is unanswered or this is the last step.
    pub fn next(&mut self, prompts: &PromptSet, responses: &ResponseMap) -> bool {
        if self.is_last() || !self.step_complete(prompts, responses) {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn back(&mut self) -> bool {
        if self.step == 0 {
            return false;
        }
        self.step -= 1;
        true
    }

    /// Share of the flow reached, in percent.
    pub fn progress(&self) -> f64 {
        let count = self.step_count().max(1);
        ((self.step + 1).min(count) as f64 / count as f64) * 100.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prompts::Prompt;

    fn prompts() -> PromptSet {
        PromptSet::new(vec![
            Prompt::new("a", "A?", ""),
            Prompt::new("b", "B?", ""),
            Prompt::new("c", "C?", ""),
        ])
        .unwrap()
    }

    #[test]
    fn next_is_gated_on_answer() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        let mut navigator = StepNavigator::new(prompts.len(), DetailsStep::Disabled);

        assert!(!navigator.next(&prompts, &responses));
        assert_eq!(navigator.step(), 0);

        responses.set("a", "   ").unwrap();
        assert!(!navigator.next(&prompts, &responses));
        assert_eq!(navigator.step(), 0);

        responses.set("a", "x").unwrap();
        assert!(navigator.next(&prompts, &responses));
        assert_eq!(navigator.step(), 1);
        assert_eq!(navigator.kind(), StepKind::Prompt(1));
    }

    #[test]
    fn back_is_floored_at_zero() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        let mut navigator = StepNavigator::new(prompts.len(), DetailsStep::Disabled);

        assert!(!navigator.back());
        assert_eq!(navigator.step(), 0);

        responses.set("a", "x").unwrap();
        navigator.next(&prompts, &responses);
        assert!(navigator.back());
        assert_eq!(navigator.step(), 0);
    }

    #[test]
    fn stops_at_last_step() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        for id in ["a", "b", "c"] {
            responses.set(id, "x").unwrap();
        }
        let mut navigator = StepNavigator::new(prompts.len(), DetailsStep::Disabled);

        assert!(navigator.next(&prompts, &responses));
        assert!(navigator.next(&prompts, &responses));
        assert!(navigator.is_last());
        assert!(!navigator.next(&prompts, &responses));
        assert_eq!(navigator.step(), 2);
        assert_eq!(navigator.progress(), 100.0);
    }

    #[test]
    fn leading_details_step_always_advances() {
        let prompts = prompts();
        let responses = ResponseMap::new(&prompts);
        let mut navigator = StepNavigator::new(prompts.len(), DetailsStep::Leading);

        assert_eq!(navigator.step_count(), 4);
        assert_eq!(navigator.kind(), StepKind::Details);
        assert!(navigator.next(&prompts, &responses));
        assert_eq!(navigator.kind(), StepKind::Prompt(0));
        assert!(!navigator.next(&prompts, &responses));
    }

    #[test]
    fn trailing_details_step_is_last() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        for id in ["a", "b", "c"] {
            responses.set(id, "x").unwrap();
        }
        let mut navigator = StepNavigator::new(prompts.len(), DetailsStep::Trailing);

        for _ in 0..3 {
            assert!(navigator.next(&prompts, &responses));
        }
        assert_eq!(navigator.kind(), StepKind::Details);
        assert!(navigator.is_last());
    }

    #[test]
    fn parses_details_step() {
        assert_eq!("none".parse::<DetailsStep>().unwrap(), DetailsStep::Disabled);
        assert_eq!(" Leading ".parse::<DetailsStep>().unwrap(), DetailsStep::Leading);
        assert_eq!("trailing".parse::<DetailsStep>().unwrap(), DetailsStep::Trailing);
        assert!("sideways".parse::<DetailsStep>().is_err());
    }
}
