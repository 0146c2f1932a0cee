use std::{collections::HashSet, path::Path};

use anyhow::Context;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::PromptSetError;

/// One reflective question of the letter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub placeholder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Prompt {
    pub fn new(id: &str, title: &str, placeholder: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            placeholder: placeholder.to_string(),
            description: None,
        }
    }
}

lazy_static! {
    static ref BUILTIN: Vec<Prompt> = vec![
        Prompt::new(
            "opening",
            "If someone important to you were hearing this many years from now, what would you want them to understand about the way you lived your life?",
            "Share the moments or beliefs that shaped your path.",
        ),
        Prompt::new(
            "values",
            "What principles or values do you believe should never be compromised, regardless of the situation?",
            "Name the values you want to pass along.",
        ),
        Prompt::new(
            "memories",
            "In your own words, what does a life well lived look like to you?",
            "Describe the qualities of a life that feels complete.",
        ),
        Prompt::new(
            "lessons",
            "Is there a mistake, habit, or way of thinking that you hope those who come after you can avoid?",
            "Offer a gentle warning or lesson learned.",
        ),
        Prompt::new(
            "hopes",
            "Is there something about you—your choices, your character, or your intentions—that people often misunderstand?",
            "Clarify what you hope others come to see clearly.",
        ),
        Prompt::new(
            "closing",
            "If this message were played during a difficult or important decision, what guidance would you want it to offer?",
            "Share the counsel that would steady someone you love.",
        ),
    ];
}

/// Ordered, non-empty list of prompts with unique ids.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSet {
    prompts: Vec<Prompt>,
}

impl PromptSet {
    pub fn new(prompts: Vec<Prompt>) -> Result<Self, PromptSetError> {
        if prompts.is_empty() {
            return Err(PromptSetError::Empty);
        }

        let mut seen = HashSet::new();
        for prompt in &prompts {
            if !seen.insert(prompt.id.as_str()) {
                return Err(PromptSetError::DuplicateId {
                    id: prompt.id.clone(),
                });
            }
        }

        Ok(Self { prompts })
    }

    /// The six reflections of the Legacy Letter.
    pub fn builtin() -> Self {
        Self {
            prompts: BUILTIN.clone(),
        }
    }

    /// Parses a JSON array of prompts.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let prompts: Vec<Prompt> = serde_json::from_str(json)?;
        Ok(Self::new(prompts)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Reading prompt set {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Parsing prompt set {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Prompt> {
        self.prompts.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|prompt| prompt.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Prompt> {
        self.prompts.iter()
    }
}

impl Default for PromptSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a PromptSet {
    type Item = &'a Prompt;
    type IntoIter = std::slice::Iter<'a, Prompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
