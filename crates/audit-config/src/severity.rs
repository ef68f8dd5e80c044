//! Advisory severity levels.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::UnknownKeyword;

/// Qualitative CVSS severity, ordered `none < low < medium < high < critical`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Accepted spellings, in ascending order.
    pub const VARIANTS: &'static [&'static str] = &["none", "low", "medium", "high", "critical"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Map a CVSS v3 base score onto its qualitative band.
    pub fn from_cvss_score(score: f64) -> Self {
        if score.is_nan() || score <= 0.0 {
            Severity::None
        } else if score < 4.0 {
            Severity::Low
        } else if score < 7.0 {
            Severity::Medium
        } else if score < 9.0 {
            Severity::High
        } else {
            Severity::Critical
        }
    }

    /// Parse the severity column of an audit text report.
    ///
    /// Accepts `"6.8 (medium)"`, a bare keyword like `"medium"`, or a bare score like `"6.8"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();

        if let Some((_, rest)) = label.split_once('(') {
            if let Some((inner, _)) = rest.split_once(')') {
                return inner.trim().parse().ok();
            }
        }

        if let Ok(severity) = label.parse() {
            return Some(severity);
        }

        label.parse::<f64>().ok().map(Self::from_cvss_score)
    }
}

impl FromStr for Severity {
    type Err = UnknownKeyword;

    // case-sensitive, only the lowercase spelling is accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Severity::None),
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::None < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!("low".parse::<Severity>(), Ok(Severity::Low));
        assert!("Low".parse::<Severity>().is_err());
        assert!("extreme".parse::<Severity>().is_err());
    }

    #[test]
    fn test_variants_round_trip() {
        for name in Severity::VARIANTS {
            let severity: Severity = name.parse().unwrap();
            assert_eq!(severity.as_str(), *name);
        }
    }

    #[test]
    fn test_from_cvss_score() {
        assert_eq!(Severity::from_cvss_score(0.0), Severity::None);
        assert_eq!(Severity::from_cvss_score(3.9), Severity::Low);
        assert_eq!(Severity::from_cvss_score(4.0), Severity::Medium);
        assert_eq!(Severity::from_cvss_score(8.9), Severity::High);
        assert_eq!(Severity::from_cvss_score(9.8), Severity::Critical);
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Severity::from_label("6.8 (medium)"), Some(Severity::Medium));
        assert_eq!(Severity::from_label("critical"), Some(Severity::Critical));
        assert_eq!(Severity::from_label("7.5"), Some(Severity::High));
        assert_eq!(Severity::from_label("n/a"), None);
    }
}
