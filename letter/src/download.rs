use std::{
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::{
    details::PersonalDetails, format::format_letter, prompts::PromptSet, responses::ResponseMap,
};

/// `legacy-letter-2024-01-15T15-04-05-123Z.txt` for a letter made at that
/// UTC instant.
pub fn file_name<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    let iso = timestamp
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    format!("legacy-letter-{}.txt", iso.replace([':', '.'], "-"))
}

/// Where a finished letter goes.
pub trait LetterSink {
    fn save(&self, file_name: &str, contents: &str) -> anyhow::Result<PathBuf>;
}

/// Saves letters as UTF-8 text files in one directory.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl LetterSink for DirectorySink {
    fn save(&self, file_name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Creating {}", self.dir.display()))?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents).with_context(|| format!("Writing {}", path.display()))?;
        Ok(path)
    }
}

pub struct DownloadEmitter {
    sink: Box<dyn LetterSink + Send + Sync>,
}

impl DownloadEmitter {
    pub fn new(sink: impl LetterSink + Send + Sync + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Builds the letter and saves it once. No retry.
    pub fn emit<Tz>(
        &self,
        prompts: &PromptSet,
        responses: &ResponseMap,
        details: Option<&PersonalDetails>,
        timestamp: &DateTime<Tz>,
    ) -> anyhow::Result<PathBuf>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let letter = format_letter(prompts, responses, timestamp, details);
        let name = file_name(timestamp);
        let path = self.sink.save(&name, &letter)?;
        log::info!("Letter saved to {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::{Arc, Mutex};

    use chrono::{FixedOffset, NaiveDate};

    use super::*;

    /// Keeps saved letters in memory.
    #[derive(Clone, Default)]
    pub struct MemorySink {
        pub saved: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MemorySink {
        pub fn count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }
    }

    impl LetterSink for MemorySink {
        fn save(&self, file_name: &str, contents: &str) -> anyhow::Result<PathBuf> {
            self.saved
                .lock()
                .unwrap()
                .push((file_name.to_string(), contents.to_string()));
            Ok(PathBuf::from(file_name))
        }
    }

    #[test]
    fn file_name_from_utc_instant() {
        let naive = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_milli_opt(15, 4, 5, 123)
            .unwrap();
        let timestamp = Utc.from_utc_datetime(&naive);
        assert_eq!(
            file_name(&timestamp),
            "legacy-letter-2024-01-15T15-04-05-123Z.txt"
        );

        let local = timestamp.with_timezone(&FixedOffset::west_opt(5 * 3600).unwrap());
        assert_eq!(file_name(&local), file_name(&timestamp));
    }

    #[test]
    fn emits_once_into_sink() {
        let prompts = PromptSet::builtin();
        let responses = ResponseMap::new(&prompts);
        let sink = MemorySink::default();
        let emitter = DownloadEmitter::new(sink.clone());
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 15, 15, 4, 5).unwrap();

        let path = emitter.emit(&prompts, &responses, None, &timestamp).unwrap();
        assert_eq!(path, PathBuf::from("legacy-letter-2024-01-15T15-04-05-000Z.txt"));
        assert_eq!(sink.count(), 1);

        let saved = sink.saved.lock().unwrap();
        assert!(saved[0].1.starts_with("Legacy Letter\nCreated on: Monday, January 15, 2024"));
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("legacy-letter-test-{}", std::process::id()));
        let sink = DirectorySink::new(&dir);

        let path = sink.save("letter.txt", "Legacy Letter\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Legacy Letter\n");

        fs::remove_dir_all(&dir).unwrap();
    }
}
