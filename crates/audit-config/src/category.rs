//! Keyword enumerations accepted by the `[advisories]` and `[output]` sections.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::UnknownKeyword;

/// Kind of informational advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Security notice that is not a vulnerability
    Notice,
    /// The crate is no longer maintained
    Unmaintained,
    /// The crate exposes unsound APIs
    Unsound,
    /// The locked version was yanked from its registry
    Yanked,
}

impl Category {
    pub const VARIANTS: &'static [&'static str] = &["notice", "unmaintained", "unsound", "yanked"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Notice => "notice",
            Category::Unmaintained => "unmaintained",
            Category::Unsound => "unsound",
            Category::Yanked => "yanked",
        }
    }

    /// Map the `Warning:` column of an audit text report to a category.
    pub fn from_warning(warning: &str) -> Option<Self> {
        warning.trim().parse().ok()
    }
}

impl FromStr for Category {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notice" => Ok(Category::Notice),
            "unmaintained" => Ok(Category::Unmaintained),
            "unsound" => Ok(Category::Unsound),
            "yanked" => Ok(Category::Yanked),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of `output.deny`: either every warning, or one warning kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DenyOption {
    Warnings,
    Unmaintained,
    Unsound,
    Yanked,
}

impl DenyOption {
    pub const VARIANTS: &'static [&'static str] = &["warnings", "unmaintained", "unsound", "yanked"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DenyOption::Warnings => "warnings",
            DenyOption::Unmaintained => "unmaintained",
            DenyOption::Unsound => "unsound",
            DenyOption::Yanked => "yanked",
        }
    }

    /// The option naming exactly this category. Notices have none.
    pub fn for_category(category: Category) -> Option<Self> {
        match category {
            Category::Notice => None,
            Category::Unmaintained => Some(DenyOption::Unmaintained),
            Category::Unsound => Some(DenyOption::Unsound),
            Category::Yanked => Some(DenyOption::Yanked),
        }
    }
}

impl FromStr for DenyOption {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warnings" => Ok(DenyOption::Warnings),
            "unmaintained" => Ok(DenyOption::Unmaintained),
            "unsound" => Ok(DenyOption::Unsound),
            "yanked" => Ok(DenyOption::Yanked),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

impl fmt::Display for DenyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report rendering requested from the audit tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl OutputFormat {
    pub const VARIANTS: &'static [&'static str] = &["terminal", "json"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Terminal => "terminal",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(UnknownKeyword(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_warning() {
        assert_eq!(Category::from_warning(" unsound "), Some(Category::Unsound));
        assert_eq!(Category::from_warning("yanked"), Some(Category::Yanked));
        assert_eq!(Category::from_warning("Unsound"), None);
    }

    #[test]
    fn test_deny_option() {
        assert_eq!("warnings".parse::<DenyOption>(), Ok(DenyOption::Warnings));
        assert!("notice".parse::<DenyOption>().is_err());
        assert_eq!(DenyOption::for_category(Category::Yanked), Some(DenyOption::Yanked));
        assert_eq!(DenyOption::for_category(Category::Notice), None);
    }

    #[test]
    fn test_output_format() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::default(), OutputFormat::Terminal);
        assert!("html".parse::<OutputFormat>().is_err());
    }
}
