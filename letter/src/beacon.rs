use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;
use once_cell::sync::OnceCell;
use rand::Rng;
use reqwest::Url;

/// Sink for analytics events. Implementations must never fail or block
/// the caller.
pub trait Tracker: Send + Sync {
    fn track(&self, event: &str, extra: Option<&str>);
}

/// Drops every event.
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, event: &str, _extra: Option<&str>) {
        log::trace!("Tracking disabled, dropping {}", event);
    }
}

pub trait IdentityProvider: Send + Sync {
    /// Opaque id of this client, stable across runs.
    fn anonymous_id(&self) -> anyhow::Result<String>;
}

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// Random base-36 token followed by the base-36 creation time in
/// milliseconds. Not meant to be unguessable.
pub fn generate_anonymous_id() -> String {
    let mut rng = rand::thread_rng();
    let token: String = (0..11)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
    format!("{}{}", token, to_base36(millis))
}

/// Keeps the anonymous id in a small file, created on first use and read
/// once per instance.
pub struct FileIdentity {
    path: PathBuf,
    cached: OnceCell<String>,
}

impl FileIdentity {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cached: OnceCell::new(),
        }
    }

    fn load_or_create(&self) -> anyhow::Result<String> {
        if let Ok(existing) = fs::read_to_string(&self.path) {
            let existing = existing.trim();
            if !existing.is_empty() {
                return Ok(existing.to_string());
            }
        }

        let id = generate_anonymous_id();
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &id)
            .with_context(|| format!("Writing anonymous id to {}", self.path.display()))?;
        Ok(id)
    }
}

impl IdentityProvider for FileIdentity {
    fn anonymous_id(&self) -> anyhow::Result<String> {
        self.cached
            .get_or_try_init(|| self.load_or_create())
            .cloned()
    }
}

/// Fire-and-forget event tracking: every event becomes one GET to the
/// collection endpoint, sent on the tokio runtime and never awaited.
pub struct Beacon {
    endpoint: Url,
    client: reqwest::Client,
    identity: Arc<dyn IdentityProvider>,
}

impl Beacon {
    pub fn new(endpoint: &str, identity: Arc<dyn IdentityProvider>) -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: Url::parse(endpoint).context("Invalid tracking url")?,
            client: reqwest::Client::new(),
            identity,
        })
    }

    pub fn event_url(
        &self,
        event: &str,
        anon_id: &str,
        timestamp: i64,
        extra: Option<&str>,
    ) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("event", event)
                .append_pair("anon_id", anon_id)
                .append_pair("ts", &timestamp.to_string());
            if let Some(extra) = extra.filter(|extra| !extra.is_empty()) {
                query.append_pair("extra", extra);
            }
        }
        url
    }

    fn dispatch(&self, event: &str, extra: Option<&str>) -> anyhow::Result<()> {
        let anon_id = self.identity.anonymous_id()?;
        let url = self.event_url(
            event,
            &anon_id,
            chrono::Utc::now().timestamp_millis(),
            extra,
        );
        let runtime = tokio::runtime::Handle::try_current()?;
        let client = self.client.clone();

        runtime.spawn(async move {
            if let Err(err) = client.get(url).send().await {
                log::debug!("Tracking request failed: {}", err);
            }
        });
        Ok(())
    }
}

impl Tracker for Beacon {
    fn track(&self, event: &str, extra: Option<&str>) {
        if let Err(err) = self.dispatch(event, extra) {
            log::debug!("Dropping tracking event {}: {:#}", event, err);
        }
    }
}
