/// A newsletter section as configured, before any stories are assigned.
#[derive(Debug, Clone, Copy)]
pub struct SectionSpec {
    pub key: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub sub_themes: &'static [&'static str],
    pub prompt_focus: &'static str,
}

impl SectionSpec {
    pub fn has_sub_themes(&self) -> bool {
        !self.sub_themes.is_empty()
    }

    /// Case-insensitive match against the configured sub-themes. Unknown or
    /// missing labels land in the first sub-theme.
    pub fn resolve_sub_theme(&self, label: Option<&str>) -> Option<String> {
        let first = self.sub_themes.first()?;
        let matched = label.and_then(|l| {
            let l = l.trim();
            self.sub_themes
                .iter()
                .find(|t| t.eq_ignore_ascii_case(l))
        });
        Some(matched.unwrap_or(first).to_string())
    }
}

pub const SECTIONS: &[SectionSpec] = &[
    SectionSpec {
        key: "market_signals",
        title: "Market Signals",
        icon: "📊",
        description: "Strategic trends, market movements, and industry analysis",
        sub_themes: &["Macro Economy", "Consumer Trends"],
        prompt_focus: "Focus on strategic market movements, industry trends, new ventures, \
            partnerships, venue developments, format innovations, and market analysis. \
            IMPORTANT: Organize stories under two sub-themes: (1) MACRO ECONOMY - economic \
            conditions affecting the industry like recession fears, interest rates, corporate \
            spending trends, and (2) CONSUMER TRENDS - attendee behavior, visitor patterns, \
            audience preferences, and demand shifts. Label each story with its sub-theme.",
    },
    SectionSpec {
        key: "deals",
        title: "Deals",
        icon: "🤝",
        description: "Mergers, acquisitions, investments, and divestitures",
        sub_themes: &[],
        prompt_focus: "Focus on M&A activity, private equity moves, strategic investments, and \
            divestitures. Include deal values where known, and analyze strategic rationale and \
            market implications.",
    },
    SectionSpec {
        key: "hires_fires",
        title: "Hires & Fires",
        icon: "👔",
        description: "Executive appointments, departures, and restructuring",
        sub_themes: &[],
        prompt_focus: "Focus on senior executive movements (C-suite, MD, VP level and above). \
            Analyze what appointments signal about company strategy. Note patterns in hiring \
            (e.g., digital expertise, international expansion).",
    },
];
