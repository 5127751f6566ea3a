//! Markdown link formatting with a deployment-wide switch to hide link targets.

use std::sync::{LazyLock, OnceLock};

use regex::Regex;

pub const HIDE_LINKS_ENV: &str = "HIDE_AWS_LINKS";

static TRUTHY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)true|1").unwrap());

static GLOBAL: OnceLock<LinkFormatter> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkFormatter {
    show_links: bool,
}

impl Default for LinkFormatter {
    fn default() -> Self {
        Self { show_links: true }
    }
}

impl LinkFormatter {
    pub fn new(show_links: bool) -> Self {
        Self { show_links }
    }

    /// Read the suppression flag from `HIDE_AWS_LINKS`.
    pub fn from_env() -> Self {
        let hide = std::env::var(HIDE_LINKS_ENV)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
        Self::new(!hide)
    }

    pub fn format(&self, url: &str, text: &str) -> String {
        if !self.show_links {
            return text.to_string();
        }
        format!("[{text}]({url})")
    }
}

/// Install the process-wide formatter. The first value installed wins and is
/// returned to every later caller.
pub fn install(formatter: LinkFormatter) -> LinkFormatter {
    *GLOBAL.get_or_init(|| formatter)
}

fn is_truthy(value: &str) -> bool {
    TRUTHY.is_match(value)
}
