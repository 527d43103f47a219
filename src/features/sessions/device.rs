//! Display-only device and browser labels derived from a stored user-agent.
//! Matching is case-insensitive substring search in a fixed priority order;
//! unusual agents will be misclassified, so never base decisions on these.

use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceKind {
    /// Mobile markers win over tablet markers; everything else is a desktop.
    #[must_use]
    pub fn classify(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ["mobile", "android", "iphone"].iter().any(|m| ua.contains(m)) {
            DeviceKind::Mobile
        } else if ["tablet", "ipad"].iter().any(|m| ua.contains(m)) {
            DeviceKind::Tablet
        } else {
            DeviceKind::Desktop
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DeviceKind::Desktop => "Desktop",
            DeviceKind::Mobile => "Mobile",
            DeviceKind::Tablet => "Tablet",
        };
        formatter.write_str(label)
    }
}

pub const UNKNOWN_BROWSER: &str = "Unknown Browser";

/// First match of Chrome, Firefox, Safari (unless Chrome), Edge.
#[must_use]
pub fn browser_label(user_agent: &str) -> &'static str {
    let ua = user_agent.to_lowercase();

    if ua.contains("chrome") {
        "Chrome"
    } else if ua.contains("firefox") {
        "Firefox"
    } else if ua.contains("safari") {
        "Safari"
    } else if ua.contains("edge") {
        "Edge"
    } else {
        UNKNOWN_BROWSER
    }
}
