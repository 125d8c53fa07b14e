//! Theme-aware chart chrome.

use eegview_core::models::ResolvedTheme;
use serde::Serialize;

/// Foreground/background pair applied to chart axes, legends, and tooltips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartChrome {
    pub background: &'static str,
    pub text: &'static str,
    /// Grid lines: the text color with an alpha suffix
    pub grid: String,
}

pub fn chart_chrome(theme: ResolvedTheme) -> ChartChrome {
    let (background, text) = match theme {
        ResolvedTheme::Dark => ("#1F2937", "#F3F4F6"),
        ResolvedTheme::Light => ("#FFFFFF", "#1F2937"),
    };
    ChartChrome {
        background,
        text,
        grid: format!("{}20", text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::text_color_for;

    #[test]
    fn chrome_pairs_follow_the_theme() {
        let dark = chart_chrome(ResolvedTheme::Dark);
        assert_eq!(dark.background, "#1F2937");
        assert_eq!(dark.grid, "#F3F4F620");

        let light = chart_chrome(ResolvedTheme::Light);
        assert_eq!(light.text, "#1F2937");
    }

    #[test]
    fn text_contrast_matches_the_background() {
        for theme in [ResolvedTheme::Dark, ResolvedTheme::Light] {
            let chrome = chart_chrome(theme);
            // Dark backgrounds must get light fallback text and vice versa.
            let fallback = text_color_for(chrome.background).unwrap();
            match theme {
                ResolvedTheme::Dark => assert_eq!(fallback, "#ffffff"),
                ResolvedTheme::Light => assert_eq!(fallback, "#000000"),
            }
        }
    }
}
