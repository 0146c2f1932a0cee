use anyhow::bail;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::repository::SetMember;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A normalized (trimmed, lower-cased) email address somebody asked to be
/// followed up on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailIntent(String);

impl EmailIntent {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() || !EMAIL.is_match(&email) {
            bail!("Invalid email");
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailIntent {
    type Error = anyhow::Error;

    fn try_from(value: String) -> anyhow::Result<Self> {
        Self::parse(&value)
    }
}

impl From<EmailIntent> for String {
    fn from(value: EmailIntent) -> Self {
        value.0
    }
}

impl std::fmt::Display for EmailIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl SetMember for EmailIntent {
    const SET: &'static str = "legacy:email_intents:set";

    fn member(&self) -> &str {
        &self.0
    }

    fn from_member(member: String) -> anyhow::Result<Self> {
        Self::parse(&member)
    }
}

#[cfg(test)]
mod test {
    use super::EmailIntent;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = EmailIntent::parse(" A@B.com ").unwrap();
        assert_eq!(email.as_str(), "a@b.com");

        let email = EmailIntent::parse("US.ER+tag@Example.CO.UK").unwrap();
        assert_eq!(email.as_str(), "us.er+tag@example.co.uk");
    }

    #[test]
    fn rejects_malformed() {
        for raw in ["not-an-email", "a@b", "a@.com", "", "   ", "a b@c.com", "a@@b.com"] {
            assert!(EmailIntent::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn accepts_plain_address() {
        assert!(EmailIntent::parse("user@example.com").is_ok());
    }
}
