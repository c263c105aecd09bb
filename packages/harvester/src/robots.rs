//! robots.txt parsing and per-origin permission caching.
//!
//! Permission checks are fail-open: any failure to fetch or parse a
//! host's robots.txt resolves to "allowed" and is cached so the host
//! is not asked again within the run.

use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Parsed robots.txt rules for one origin.
///
/// The default value carries no rules and therefore allows every
/// path, which doubles as the fail-open sentinel.
#[derive(Debug, Clone, Default)]
pub struct RobotsTxt {
    /// Rule groups in file order
    groups: Vec<RuleGroup>,
}

/// One `User-agent` block and its path rules.
#[derive(Debug, Clone, Default)]
struct RuleGroup {
    /// Agent tokens this group applies to (lowercase; "*" for default)
    agents: Vec<String>,

    /// Allowed path prefixes (take precedence over disallow)
    allow: Vec<String>,

    /// Disallowed path prefixes
    disallow: Vec<String>,
}

impl RobotsTxt {
    /// Parse robots.txt content.
    ///
    /// Unknown directives (including `Crawl-delay` and `Sitemap`) are
    /// ignored; pacing is governed by the configured request delay.
    pub fn parse(content: &str) -> Self {
        let mut groups: Vec<RuleGroup> = Vec::new();
        let mut current = RuleGroup::default();
        let mut in_agent_run = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((directive, value)) = line.split_once(':') else {
                continue;
            };
            let directive = directive.trim().to_lowercase();
            let value = value.trim();

            match directive.as_str() {
                "user-agent" => {
                    // Consecutive user-agent lines share one group; a
                    // user-agent line after rules starts a new group.
                    if !in_agent_run && !current.agents.is_empty() {
                        groups.push(std::mem::take(&mut current));
                    }
                    current.agents.push(value.to_lowercase());
                    in_agent_run = true;
                }
                "allow" => {
                    in_agent_run = false;
                    if !value.is_empty() {
                        current.allow.push(value.to_string());
                    }
                }
                "disallow" => {
                    in_agent_run = false;
                    // An empty Disallow value allows everything
                    if !value.is_empty() {
                        current.disallow.push(value.to_string());
                    }
                }
                _ => {
                    in_agent_run = false;
                }
            }
        }

        if !current.agents.is_empty() {
            groups.push(current);
        }

        Self { groups }
    }

    /// Check whether a path is allowed for an agent identity.
    ///
    /// Agent matching is a case-insensitive substring test against the
    /// group's tokens; a specific match wins over the `*` group. Allow
    /// rules take precedence over disallow rules within a group.
    pub fn is_allowed(&self, user_agent: &str, path: &str) -> bool {
        let agent = user_agent.to_lowercase();

        let group = self
            .groups
            .iter()
            .find(|g| g.agents.iter().any(|a| a != "*" && agent.contains(a.as_str())))
            .or_else(|| self.groups.iter().find(|g| g.agents.iter().any(|a| a == "*")));

        let Some(group) = group else {
            return true;
        };

        for prefix in &group.allow {
            if path.starts_with(prefix) {
                return true;
            }
        }
        for prefix in &group.disallow {
            if prefix == "/" || path.starts_with(prefix) {
                return false;
            }
        }

        true
    }

    /// Check whether the rules block every path for an agent.
    pub fn disallows_all(&self, user_agent: &str) -> bool {
        !self.is_allowed(user_agent, "/")
    }
}

/// Per-origin robots.txt cache for one harvest run.
///
/// Keyed by scheme + host, so every path on a host shares one cached
/// entry. Entries live for the run and are never refreshed.
pub struct RobotsCache {
    client: reqwest::Client,
    entries: HashMap<String, RobotsTxt>,
}

impl RobotsCache {
    /// Create a cache whose robots fetches are bounded by `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            entries: HashMap::new(),
        }
    }

    /// Preload rules for an origin (e.g., "https://example.com").
    ///
    /// Seeded entries are consulted like fetched ones, which lets
    /// offline runs and tests avoid any network traffic.
    pub fn seed(&mut self, origin: impl Into<String>, rules: RobotsTxt) {
        self.entries.insert(origin.into(), rules);
    }

    /// Check whether the agent may fetch the URL. Never errors.
    ///
    /// Resolution failures of any kind (bad URL, network error,
    /// timeout, non-2xx, unparseable body) resolve to allowed, and
    /// the fail-open entry is cached for the origin.
    pub async fn allowed(&mut self, url: &str, user_agent: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            // The fetch step will classify the bad URL properly
            return true;
        };
        let Some(host) = parsed.host_str() else {
            return true;
        };
        let origin = match parsed.port() {
            Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
            None => format!("{}://{}", parsed.scheme(), host),
        };

        if !self.entries.contains_key(&origin) {
            let rules = self.resolve(&origin, user_agent).await;
            self.entries.insert(origin.clone(), rules);
        }

        self.entries
            .get(&origin)
            .map(|rules| rules.is_allowed(user_agent, parsed.path()))
            .unwrap_or(true)
    }

    /// Fetch and parse robots.txt for an origin, failing open.
    async fn resolve(&self, origin: &str, user_agent: &str) -> RobotsTxt {
        let robots_url = format!("{}/robots.txt", origin);
        debug!(url = %robots_url, "Resolving robots.txt");

        match self
            .client
            .get(&robots_url)
            .header("User-Agent", user_agent)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(body) => RobotsTxt::parse(&body),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "robots.txt body unreadable - allowing all");
                    RobotsTxt::default()
                }
            },
            Ok(response) => {
                debug!(
                    origin = %origin,
                    status = %response.status(),
                    "No robots.txt - allowing all"
                );
                RobotsTxt::default()
            }
            Err(e) => {
                warn!(origin = %origin, error = %e, "robots.txt fetch failed - allowing all");
                RobotsTxt::default()
            }
        }
    }
}
