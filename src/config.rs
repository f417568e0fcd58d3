//! Client configuration

use crate::anchoring::bitcoin::DEFAULT_BITCOIN_EXPLORERS;
use crate::anchoring::cache::DEFAULT_CACHE_CAPACITY;
use crate::anchoring::calendar::DEFAULT_MAX_RESPONSE_BYTES;

/// Public calendars used when none are given
pub const DEFAULT_CALENDARS: &[&str] = &[
    "https://alice.btc.calendar.opentimestamps.org",
    "https://bob.btc.calendar.opentimestamps.org",
    "https://finney.calendar.eternitywall.com",
];

/// Calendar responses required when stamping against the default calendars
pub const DEFAULT_QUORUM: usize = 2;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// OpenTimestamps client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtsConfig {
    /// Calendar server URLs, all contacted when stamping
    pub calendar_urls: Vec<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Bitcoin Esplora base URLs (tried in order)
    pub explorer_urls: Vec<String>,

    /// Litecoin Esplora base URLs; empty disables Litecoin verification
    pub litecoin_explorer_urls: Vec<String>,

    /// Entries per block cache
    pub cache_capacity: usize,

    /// Calendar responses required for a stamp (`None` = derive from calendar count)
    pub quorum: Option<usize>,

    /// Maximum calendar response size in bytes
    pub max_response_bytes: usize,
}

impl Default for OtsConfig {
    fn default() -> Self {
        Self {
            calendar_urls: to_strings(DEFAULT_CALENDARS),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            explorer_urls: to_strings(DEFAULT_BITCOIN_EXPLORERS),
            litecoin_explorer_urls: Vec::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            quorum: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

fn to_strings(urls: &[&str]) -> Vec<String> {
    urls.iter().map(|s| (*s).to_string()).collect()
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl OtsConfig {
    /// Create with custom calendar URLs
    #[must_use]
    pub fn with_calendars(urls: Vec<String>) -> Self {
        Self {
            calendar_urls: urls,
            ..Self::default()
        }
    }

    /// Create config from environment variables
    ///
    /// Environment variables:
    /// - `OTS_CALENDAR_URLS`: Comma-separated list of calendar URLs
    /// - `OTS_TIMEOUT_SECS`: HTTP timeout in seconds (default: 30)
    /// - `OTS_EXPLORER_URLS`: Comma-separated Bitcoin Esplora base URLs
    /// - `OTS_LITECOIN_EXPLORER_URLS`: Comma-separated Litecoin Esplora base URLs
    /// - `OTS_CACHE_CAPACITY`: Block cache entries (default: 100)
    /// - `OTS_QUORUM`: Calendar responses required when stamping
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let list = |name: &str, fallback: Vec<String>| {
            std::env::var(name)
                .ok()
                .map(|s| parse_list(&s))
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
        };

        let calendar_urls = list("OTS_CALENDAR_URLS", defaults.calendar_urls);
        let explorer_urls = list("OTS_EXPLORER_URLS", defaults.explorer_urls);
        let litecoin_explorer_urls =
            list("OTS_LITECOIN_EXPLORER_URLS", defaults.litecoin_explorer_urls);

        let timeout_secs = std::env::var("OTS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        let cache_capacity = std::env::var("OTS_CACHE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.cache_capacity);

        let quorum = std::env::var("OTS_QUORUM")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0);

        Self {
            calendar_urls,
            timeout_secs,
            explorer_urls,
            litecoin_explorer_urls,
            cache_capacity,
            quorum,
            max_response_bytes: defaults.max_response_bytes,
        }
    }

    /// Calendars to stamp against: `requested`, or the configured list when empty
    #[must_use]
    pub fn resolve_calendars(&self, requested: &[String]) -> Vec<String> {
        if requested.is_empty() {
            self.calendar_urls.clone()
        } else {
            requested.to_vec()
        }
    }

    /// Responses required out of `calendar_count` calendars
    ///
    /// An explicit quorum wins. Otherwise a single calendar needs 1, the
    /// default calendar set needs [`DEFAULT_QUORUM`] and a custom set needs
    /// every calendar.
    #[must_use]
    pub fn resolve_quorum(&self, calendar_count: usize, using_defaults: bool) -> usize {
        match self.quorum {
            Some(m) => m,
            None if calendar_count <= 1 => calendar_count,
            None if using_defaults => DEFAULT_QUORUM.min(calendar_count),
            None => calendar_count,
        }
    }
}
