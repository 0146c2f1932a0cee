use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::{details::PersonalDetails, prompts::PromptSet, responses::ResponseMap};

pub const LETTER_TITLE: &str = "Legacy Letter";
pub const NOT_PROVIDED: &str = "[Not provided]";

/// Long en-US form: `Monday, January 15, 2024 at 3:04 PM`.
pub fn format_timestamp<Tz>(timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp.format("%A, %B %-d, %Y at %-I:%M %p").to_string()
}

/// `From:`, `Email:` and `Recipients:` lines for the non-blank fields.
fn details_block(details: &PersonalDetails) -> String {
    let recipients = details.recipient_list().join(", ");

    [
        ("From", details.name.trim()),
        ("Email", details.email.trim()),
        ("Recipients", recipients.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{}: {}\n", label, value))
    .collect()
}

/// Renders the letter. Pure: the same inputs always give the same text.
pub fn format_letter<Tz>(
    prompts: &PromptSet,
    responses: &ResponseMap,
    timestamp: &DateTime<Tz>,
    details: Option<&PersonalDetails>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let body = prompts
        .iter()
        .map(|prompt| {
            let answer = responses.get(&prompt.id).trim();
            let answer = if answer.is_empty() { NOT_PROVIDED } else { answer };
            format!("{}\n{}", prompt.title, answer)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let details = details
        .filter(|details| !details.is_empty())
        .map(|details| format!("{}\n", details_block(details)))
        .unwrap_or_default();

    format!(
        "{}\nCreated on: {}\n\n{}{}\n",
        LETTER_TITLE,
        format_timestamp(timestamp),
        details,
        body
    )
}

#[cfg(test)]
mod test {
    use chrono::{FixedOffset, Utc};

    use super::*;
    use crate::prompts::Prompt;

    fn prompts() -> PromptSet {
        PromptSet::new(vec![
            Prompt::new("one", "What matters?", "..."),
            Prompt::new("two", "What did you learn?", "..."),
        ])
        .unwrap()
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 15, 4, 5).unwrap()
    }

    #[test]
    fn timestamp_is_long_form() {
        assert_eq!(format_timestamp(&timestamp()), "Monday, January 15, 2024 at 3:04 PM");

        let morning = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2023, 12, 3, 9, 30, 0)
            .unwrap();
        assert_eq!(format_timestamp(&morning), "Sunday, December 3, 2023 at 9:30 AM");
    }

    #[test]
    fn answered_letter() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        responses.set("one", "  Kindness.\n").unwrap();
        responses.set("two", "Patience").unwrap();

        let letter = format_letter(&prompts, &responses, &timestamp(), None);
        assert_eq!(
            letter,
            "Legacy Letter\n\
             Created on: Monday, January 15, 2024 at 3:04 PM\n\
             \n\
             What matters?\nKindness.\n\
             \n\
             What did you learn?\nPatience\n"
        );
        assert!(!letter.contains(NOT_PROVIDED));
    }

    #[test]
    fn blank_answers_are_not_provided() {
        let prompts = prompts();
        let mut responses = ResponseMap::new(&prompts);
        responses.set("one", "   ").unwrap();
        responses.set("two", "Patience").unwrap();

        let letter = format_letter(&prompts, &responses, &timestamp(), None);
        assert!(letter.contains("What matters?\n[Not provided]\n\nWhat did you learn?\nPatience\n"));
    }

    #[test]
    fn is_pure() {
        let prompts = prompts();
        let responses = ResponseMap::new(&prompts);
        assert_eq!(
            format_letter(&prompts, &responses, &timestamp(), None),
            format_letter(&prompts, &responses, &timestamp(), None)
        );
    }

    #[test]
    fn details_block_only_when_filled() {
        let prompts = prompts();
        let responses = ResponseMap::new(&prompts);

        let empty = PersonalDetails::default();
        assert_eq!(
            format_letter(&prompts, &responses, &timestamp(), Some(&empty)),
            format_letter(&prompts, &responses, &timestamp(), None)
        );

        let details = PersonalDetails {
            name: "Ada".to_string(),
            email: String::new(),
            recipients: "a@x.com, b@y.org".to_string(),
        };
        let letter = format_letter(&prompts, &responses, &timestamp(), Some(&details));
        assert!(letter.contains(
            "3:04 PM\n\nFrom: Ada\nRecipients: a@x.com, b@y.org\n\nWhat matters?\n"
        ));
        assert!(!letter.contains("Email:"));
    }
}
