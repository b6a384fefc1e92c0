//! Link liveness probes.
//!
//! A URL is live when its final status is in `200..400`. Each URL gets one
//! HEAD request; servers that reject HEAD (any status `>= 400`, notably 405)
//! get one GET. Redirects are followed. Transport failures (DNS, timeout,
//! refused connection, TLS) make the URL not live and are never fatal.

use std::time::Duration;

use serde_json::Value;

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on redirects followed by one request.
pub const DEFAULT_MAX_REDIRECTS: u32 = 10;

/// Probe settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub timeout: Duration,
    pub max_redirects: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Decides whether a URL currently resolves.
pub trait Probe {
    fn is_live(&self, url: &str) -> bool;
}

/// `true` for success and redirect statuses.
pub fn is_live_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// `true` when a HEAD answer should be retried with GET.
pub fn needs_get_retry(status: u16) -> bool {
    status >= 400 || status == 405
}

// ---------------------------------------------------------------------------
// HttpProbe
// ---------------------------------------------------------------------------

/// Blocking HTTP probe backed by a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    agent: ureq::Agent,
}

impl HttpProbe {
    pub fn new(config: &ProbeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .redirects(config.max_redirects)
            .user_agent(concat!("registry-validator/", env!("CARGO_PKG_VERSION")))
            .build();
        HttpProbe { agent }
    }

    /// Status of the final response, or `None` on transport failure.
    pub fn final_status(&self, url: &str) -> Option<u16> {
        let head = self.status_of(self.agent.head(url), url)?;
        if !needs_get_retry(head) {
            return Some(head);
        }
        tracing::debug!(url, status = head, "HEAD rejected, retrying with GET");
        self.status_of(self.agent.get(url), url)
    }

    fn status_of(&self, request: ureq::Request, url: &str) -> Option<u16> {
        match request.call() {
            Ok(response) => Some(response.status()),
            Err(ureq::Error::Status(code, _)) => Some(code),
            Err(ureq::Error::Transport(transport)) => {
                tracing::warn!(url, error = %transport, "link probe transport failure");
                None
            }
        }
    }
}

impl Default for HttpProbe {
    fn default() -> Self {
        Self::new(&ProbeConfig::default())
    }
}

impl Probe for HttpProbe {
    fn is_live(&self, url: &str) -> bool {
        self.final_status(url).is_some_and(is_live_status)
    }
}

// ---------------------------------------------------------------------------
// Link targets
// ---------------------------------------------------------------------------

/// Document field a checked URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkField {
    Url,
    ApiRest,
    OaiPmh,
    Repo,
}

impl LinkField {
    /// Platform-level fields, in the order they are checked.
    pub const PLATFORM: [LinkField; 3] = [LinkField::Url, LinkField::ApiRest, LinkField::OaiPmh];

    /// Key of the field in the YAML document.
    pub fn key(&self) -> &'static str {
        match self {
            LinkField::Url => "url",
            LinkField::ApiRest => "api_rest",
            LinkField::OaiPmh => "oai_pmh",
            LinkField::Repo => "repo",
        }
    }

    /// Label printed in the report.
    pub fn label(&self) -> &'static str {
        match self {
            LinkField::Repo => "Repo",
            other => other.key(),
        }
    }
}

/// One URL to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    pub field: LinkField,
    pub url: String,
}

/// Every URL of a raw document, in document order.
///
/// Platform endpoint fields are checked whenever present; a linked code
/// `repo` only when non-empty. Works on documents that failed the schema.
pub fn link_targets(document: &Value) -> Vec<LinkTarget> {
    let Some(platforms) = document.get("repositories").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut targets = Vec::new();
    for platform in platforms.iter().filter_map(Value::as_object) {
        for field in LinkField::PLATFORM {
            if let Some(value) = platform.get(field.key()) {
                targets.push(LinkTarget {
                    field,
                    url: value_text(value),
                });
            }
        }
        let code = platform.get("code").and_then(Value::as_array);
        for record in code.into_iter().flatten().filter_map(Value::as_object) {
            match record.get("repo").map(value_text) {
                Some(repo) if !repo.is_empty() => targets.push(LinkTarget {
                    field: LinkField::Repo,
                    url: repo,
                }),
                _ => {}
            }
        }
    }
    targets
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
