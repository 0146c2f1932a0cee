use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use chrono::Local;

use crate::{
    download::DownloadEmitter,
    error::{FormError, IntentError},
    form::{CurrentStep, LetterForm},
    intent::IntentSummary,
};

const BAR_WIDTH: usize = 30;

/// What a terminal session produced.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    pub letter: Option<PathBuf>,
    pub intent: Option<IntentSummary>,
}

enum Command {
    Back,
    Preview,
    Quit,
}

fn command(line: &str) -> Option<Command> {
    match line.trim() {
        ":back" | ":b" => Some(Command::Back),
        ":preview" | ":p" => Some(Command::Preview),
        ":quit" | ":q" => Some(Command::Quit),
        _ => None,
    }
}

/// Line-based front end for [`LetterForm`]. A prompt's answer is every
/// line typed until an empty one, which moves on (or downloads on the last
/// step).
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// `None` once input is exhausted.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn header(&mut self, form: &LetterForm) -> anyhow::Result<()> {
        let navigator = form.navigator();
        let filled = (form.progress() / 100.0 * BAR_WIDTH as f64).round() as usize;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "Step {} of {}  [{}{}]",
            navigator.step() + 1,
            navigator.step_count(),
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH.saturating_sub(filled)),
        )?;
        Ok(())
    }

    pub fn run(
        &mut self,
        form: &mut LetterForm,
        emitter: &DownloadEmitter,
    ) -> anyhow::Result<Outcome> {
        writeln!(self.output, "Legacy Letter")?;
        writeln!(
            self.output,
            "Your answers stay on this device. Type your answer, then an empty line to continue."
        )?;
        writeln!(self.output, "Commands: :back, :preview, :quit")?;

        let letter = loop {
            self.header(form)?;

            let proceed = match form.current() {
                Some(CurrentStep::Details(_)) => self.details_step(form)?,
                Some(CurrentStep::Prompt { prompt, answer }) => {
                    writeln!(self.output, "{}", prompt.title)?;
                    if let Some(description) = &prompt.description {
                        writeln!(self.output, "{}", description)?;
                    }
                    if answer.trim().is_empty() {
                        writeln!(self.output, "({})", prompt.placeholder)?;
                    } else {
                        writeln!(self.output, "Current answer:\n{}", answer)?;
                    }
                    self.prompt_step(form)?
                }
                None => Some(true),
            };

            match proceed {
                None => return Ok(Outcome::default()),
                Some(false) => continue,
                Some(true) => {}
            }

            if form.is_last_step() {
                match form.submit(&Local::now(), emitter) {
                    Ok(path) => break path,
                    Err(FormError::Incomplete { missing }) => {
                        writeln!(self.output, "{}", FormError::Incomplete { missing: missing.clone() })?;
                        for id in missing {
                            if let Some(prompt) = form.prompts().find(&id) {
                                writeln!(self.output, "  - {}", prompt.title)?;
                            }
                        }
                    }
                    Err(err) => return Err(err.into()),
                }
            } else if !form.next() {
                writeln!(
                    self.output,
                    "Please add a few words here so your letter feels complete."
                )?;
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "Your letter is ready: {}", letter.display())?;

        let intent = self.intent(form)?;
        Ok(Outcome {
            letter: Some(letter),
            intent,
        })
    }

    /// Reads answer lines. `Some(true)` to move on, `Some(false)` to show
    /// the step again, `None` to stop.
    fn prompt_step(&mut self, form: &mut LetterForm) -> anyhow::Result<Option<bool>> {
        let mut lines: Vec<String> = Vec::new();
        loop {
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match command(&line) {
                Some(Command::Back) => {
                    form.back();
                    return Ok(Some(false));
                }
                Some(Command::Preview) => {
                    writeln!(self.output, "\n{}", form.preview(&Local::now()))?;
                }
                Some(Command::Quit) => return Ok(None),
                None if line.trim().is_empty() => {
                    if !lines.is_empty() {
                        form.edit_current(lines.join("\n"));
                    }
                    return Ok(Some(true));
                }
                None => lines.push(line),
            }
        }
    }

    fn details_step(&mut self, form: &mut LetterForm) -> anyhow::Result<Option<bool>> {
        writeln!(self.output, "About you (optional, press enter to skip a field)")?;

        let Some(name) = self.ask("Your name")? else {
            return Ok(None);
        };
        match command(&name) {
            Some(Command::Back) => {
                form.back();
                return Ok(Some(false));
            }
            Some(Command::Quit) => return Ok(None),
            _ => {}
        }
        let Some(email) = self.ask("Your email")? else {
            return Ok(None);
        };
        let Some(recipients) = self.ask("Recipient emails (comma-separated)")? else {
            return Ok(None);
        };

        let details = form.details_mut();
        for (field, value) in [
            (&mut details.name, name),
            (&mut details.email, email),
            (&mut details.recipients, recipients),
        ] {
            if !value.trim().is_empty() {
                *field = value.trim().to_string();
            }
        }
        Ok(Some(true))
    }

    fn intent(&mut self, form: &mut LetterForm) -> anyhow::Result<Option<IntentSummary>> {
        writeln!(
            self.output,
            "If you'd like help sharing it over email, we'll coordinate with you first. Emails are never sent automatically."
        )?;
        let Some(answer) = self.ask("Ask us to email this letter? [y/N]")? else {
            return Ok(None);
        };
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            return Ok(None);
        }

        loop {
            let Some(email) = self.ask("Your email (optional)")? else {
                return Ok(None);
            };
            if matches!(command(&email), Some(Command::Quit)) {
                return Ok(None);
            }
            let Some(recipients) = self.ask("Other recipient emails (optional, comma-separated)")?
            else {
                return Ok(None);
            };
            if matches!(command(&recipients), Some(Command::Quit)) {
                return Ok(None);
            }

            let details = form.details_mut();
            if !email.trim().is_empty() {
                details.email = email;
            }
            if !recipients.trim().is_empty() {
                details.recipients = recipients;
            }

            match form.submit_intent() {
                Ok(summary) => {
                    writeln!(self.output, "Thanks, we'll follow up before sending anything.")?;
                    return Ok(Some(summary));
                }
                Err(IntentError::AlreadySubmitted) => return Ok(None),
                Err(err @ IntentError::NothingToFollowUp) => {
                    writeln!(self.output, "{} (:quit to skip)", err)?;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::{io::Cursor, sync::Arc};

    use super::*;
    use crate::{
        beacon::test::RecordingTracker,
        download::test::MemorySink,
        navigator::DetailsStep,
        prompts::{Prompt, PromptSet},
    };

    fn run(input: &str, details: DetailsStep) -> (Outcome, String, MemorySink) {
        let prompts = PromptSet::new(vec![
            Prompt::new("a", "First question?", "hint a"),
            Prompt::new("b", "Second question?", "hint b"),
        ])
        .unwrap();
        let mut form = LetterForm::new(prompts, details, Arc::new(RecordingTracker::default()));
        let sink = MemorySink::default();
        let emitter = DownloadEmitter::new(sink.clone());

        let mut terminal = Terminal::new(Cursor::new(input.to_string()), Vec::new());
        let outcome = terminal.run(&mut form, &emitter).unwrap();
        let output = String::from_utf8(terminal.into_output()).unwrap();
        (outcome, output, sink)
    }

    #[test]
    fn answers_and_downloads() {
        let (outcome, output, sink) = run("line one\nline two\n\nsecond\n\nn\n", DetailsStep::Disabled);

        assert!(outcome.letter.is_some());
        assert_eq!(outcome.intent, None);
        assert_eq!(sink.count(), 1);
        assert!(output.contains("Your letter is ready"));

        let saved = sink.saved.lock().unwrap();
        assert!(saved[0].1.contains("First question?\nline one\nline two\n\nSecond question?\nsecond\n"));
    }

    #[test]
    fn empty_answer_does_not_advance() {
        let (outcome, output, sink) = run("\nfirst\n\n", DetailsStep::Disabled);

        assert_eq!(outcome, Outcome::default());
        assert_eq!(sink.count(), 0);
        assert!(output.contains("Please add a few words here"));
        assert!(output.contains("Second question?"));
    }

    #[test]
    fn back_returns_to_previous_prompt() {
        let (outcome, _, sink) = run("first\n\n:back\n\nsecond\n\n", DetailsStep::Disabled);

        assert!(outcome.letter.is_some());
        let saved = sink.saved.lock().unwrap();
        assert!(saved[0].1.contains("First question?\nfirst\n"));
    }

    #[test]
    fn intent_after_download() {
        let (outcome, output, _) = run(
            "first\n\nsecond\n\ny\n\n\nme@example.com\nfriend@example.com\n",
            DetailsStep::Disabled,
        );

        assert!(output.contains("Add your email or at least one recipient"));
        let intent = outcome.intent.unwrap();
        assert_eq!(intent.from.as_deref(), Some("me@example.com"));
        assert_eq!(intent.recipients, vec!["friend@example.com".to_string()]);
    }

    #[test]
    fn leading_details_end_up_in_letter() {
        let (outcome, _, sink) = run(
            "Ada\nada@example.com\n\nfirst\n\nsecond\n\n",
            DetailsStep::Leading,
        );

        assert!(outcome.letter.is_some());
        let saved = sink.saved.lock().unwrap();
        assert!(saved[0].1.contains("From: Ada\nEmail: ada@example.com\n\nFirst question?"));
    }
}
