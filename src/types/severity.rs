use std::fmt;
use std::str::FromStr;

/// Alert levels the upstream parsers attach as the attachment color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Warning,
    Ok,
}

impl Severity {
    /// Get the label used on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Ok => "ok",
        }
    }

    /// Adaptive Card text color for this level.
    pub fn card_color(self) -> &'static str {
        match self {
            Severity::Critical => "attention",
            Severity::Warning => "warning",
            Severity::Ok => "good",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(Severity::Critical),
            "warning" => Ok(Severity::Warning),
            "ok" => Ok(Severity::Ok),
            _ => Err(()),
        }
    }
}

/// Map a severity name to its card color; anything else passes through.
pub fn card_color(color: &str) -> String {
    color
        .parse::<Severity>()
        .map(|s| s.card_color().to_string())
        .unwrap_or_else(|_| color.to_string())
}
