use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted theme preference.
///
/// `System` defers to the host's color scheme at resolution time; the
/// preference itself is what gets stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    pub fn resolve(&self, system_prefers_dark: bool) -> ResolvedTheme {
        match self {
            ThemePreference::Light => ResolvedTheme::Light,
            ThemePreference::Dark => ResolvedTheme::Dark,
            ThemePreference::System => {
                if system_prefers_dark {
                    ResolvedTheme::Dark
                } else {
                    ResolvedTheme::Light
                }
            }
        }
    }

    pub fn parse(s: &str) -> Option<ThemePreference> {
        match s.to_lowercase().as_str() {
            "light" => Some(ThemePreference::Light),
            "dark" => Some(ThemePreference::Dark),
            "system" => Some(ThemePreference::System),
            _ => None,
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemePreference::Light => write!(f, "light"),
            ThemePreference::Dark => write!(f, "dark"),
            ThemePreference::System => write!(f, "system"),
        }
    }
}

/// A preference resolved against the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_follows_host_preference() {
        assert_eq!(ThemePreference::System.resolve(true), ResolvedTheme::Dark);
        assert_eq!(ThemePreference::System.resolve(false), ResolvedTheme::Light);
        assert_eq!(ThemePreference::Dark.resolve(false), ResolvedTheme::Dark);
    }

    #[test]
    fn parse_accepts_any_case() {
        assert_eq!(ThemePreference::parse("Dark"), Some(ThemePreference::Dark));
        assert_eq!(ThemePreference::parse("SYSTEM"), Some(ThemePreference::System));
        assert_eq!(ThemePreference::parse("sepia"), None);
    }
}
