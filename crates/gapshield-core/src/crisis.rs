//! Crisis-resource URL matching.
//!
//! The detector only needs a yes/no answer from a [`CrisisUrlPredicate`].
//! [`CrisisAllowlist`] is a host-suffix matcher over a domain list, with a
//! bundled fallback for when no synced list is available. Keeping the list
//! current is the job of whatever feeds it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use url::Url;

/// Decides whether a URL belongs to a crisis or safety resource.
pub trait CrisisUrlPredicate: Send + Sync {
    fn is_crisis_url(&self, url: &str) -> bool;
}

impl<F> CrisisUrlPredicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_crisis_url(&self, url: &str) -> bool {
        self(url)
    }
}

/// Domains shipped with the binary, used when no other list is configured.
pub const BUNDLED_CRISIS_DOMAINS: &[&str] = &[
    "988lifeline.org",
    "suicidepreventionlifeline.org",
    "crisistextline.org",
    "thetrevorproject.org",
    "thehotline.org",
    "rainn.org",
    "childhelp.org",
    "loveisrespect.org",
    "samaritans.org",
    "childline.org.uk",
    "kidshelpphone.ca",
    "befrienders.org",
];

/// `[crisis]` section of the application config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisSettings {
    /// Extra domains, matched on the host and any subdomain.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Include [`BUNDLED_CRISIS_DOMAINS`].
    #[serde(default = "default_true")]
    pub use_bundled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CrisisSettings {
    fn default() -> Self {
        Self {
            domains: Vec::new(),
            use_bundled: true,
        }
    }
}

/// Host-suffix allowlist of crisis resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrisisAllowlist {
    domains: BTreeSet<String>,
}

impl CrisisAllowlist {
    /// Allowlist over exactly the given domains.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .filter_map(|d| normalize_domain(d.as_ref()))
            .collect();
        Self { domains }
    }

    /// The bundled fallback list.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_CRISIS_DOMAINS)
    }

    pub fn from_settings(settings: &CrisisSettings) -> Self {
        let mut list = Self::new(&settings.domains);
        if settings.use_bundled {
            list.extend(BUNDLED_CRISIS_DOMAINS);
        }
        list
    }

    pub fn extend<I, S>(&mut self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains
            .extend(domains.into_iter().filter_map(|d| normalize_domain(d.as_ref())));
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    fn matches_host(&self, host: &str) -> bool {
        // Walk "a.b.example.org" -> "b.example.org" -> "example.org" -> "org".
        let mut candidate = host;
        loop {
            if self.domains.contains(candidate) {
                return true;
            }
            match candidate.split_once('.') {
                Some((_, rest)) => candidate = rest,
                None => return false,
            }
        }
    }
}

impl CrisisUrlPredicate for CrisisAllowlist {
    fn is_crisis_url(&self, url: &str) -> bool {
        url_host(url).is_some_and(|host| self.matches_host(&host))
    }
}

fn normalize_domain(domain: &str) -> Option<String> {
    let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.strip_prefix("www.").unwrap_or(&domain);
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

fn url_host(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = match Url::parse(raw) {
        Ok(url) if url.has_host() => url,
        _ => Url::parse(&format!("https://{raw}")).ok()?,
    };
    parsed.host_str().and_then(normalize_domain)
}
