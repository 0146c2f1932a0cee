use serde::{Deserialize, Serialize};

/// Splits a comma-separated list, trimming entries and dropping empty ones.
pub fn split_recipients(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|recipient| !recipient.is_empty())
        .map(str::to_string)
        .collect()
}

/// Optional "about you" answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub name: String,
    pub email: String,
    /// Comma-separated addresses.
    pub recipients: String,
}

impl PersonalDetails {
    pub fn recipient_list(&self) -> Vec<String> {
        split_recipients(&self.recipients)
    }

    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.email.trim().is_empty()
            && self.recipient_list().is_empty()
    }
}
