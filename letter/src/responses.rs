use std::collections::HashMap;

use crate::{error::ResponseError, prompts::PromptSet};

/// An answer counts only when it holds something besides whitespace.
pub fn is_blank(answer: &str) -> bool {
    answer.trim().is_empty()
}

/// Answers of one session, exactly one entry per prompt of the set it was
/// created for. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseMap {
    answers: HashMap<String, String>,
}

impl ResponseMap {
    pub fn new(prompts: &PromptSet) -> Self {
        Self {
            answers: prompts
                .iter()
                .map(|prompt| (prompt.id.clone(), String::new()))
                .collect(),
        }
    }

    pub fn set(&mut self, id: &str, answer: impl Into<String>) -> Result<(), ResponseError> {
        match self.answers.get_mut(id) {
            Some(slot) => {
                *slot = answer.into();
                Ok(())
            }
            None => Err(ResponseError::UnknownPrompt { id: id.to_string() }),
        }
    }

    /// Raw answer, `""` for unknown ids.
    pub fn get(&self, id: &str) -> &str {
        self.answers.get(id).map(String::as_str).unwrap_or_default()
    }

    pub fn is_answered(&self, id: &str) -> bool {
        !is_blank(self.get(id))
    }

    /// Ids of unanswered prompts, in prompt order.
    pub fn unanswered<'a>(&self, prompts: &'a PromptSet) -> Vec<&'a str> {
        prompts
            .iter()
            .filter(|prompt| !self.is_answered(&prompt.id))
            .map(|prompt| prompt.id.as_str())
            .collect()
    }

    pub fn is_complete(&self, prompts: &PromptSet) -> bool {
        prompts.iter().all(|prompt| self.is_answered(&prompt.id))
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prompts::Prompt;

    fn prompts() -> PromptSet {
        PromptSet::new(vec![
            Prompt::new("first", "First?", ""),
            Prompt::new("second", "Second?", ""),
        ])
        .unwrap()
    }

    #[test]
    fn starts_with_one_empty_entry_per_prompt() {
        let prompts = prompts();
        let responses = ResponseMap::new(&prompts);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses.get("first"), "");
        assert_eq!(responses.unanswered(&prompts), vec!["first", "second"]);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        assert_eq!(
            responses.set("third", "hello"),
            Err(ResponseError::UnknownPrompt {
                id: "third".to_string()
            })
        );
        assert_eq!(responses.len(), 2);
    }

    #[test]
    fn whitespace_is_not_an_answer() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        responses.set("first", " \n\t ").unwrap();
        responses.set("second", "yes").unwrap();
        assert!(!responses.is_answered("first"));
        assert!(responses.is_answered("second"));
        assert!(!responses.is_complete(&prompts));

        responses.set("first", "ok").unwrap();
        assert!(responses.is_complete(&prompts));
    }
}
