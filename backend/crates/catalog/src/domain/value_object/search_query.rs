//! Free-text search query
//!
//! Terms are the maximal runs of alphanumeric characters, lowercased and
//! deduplicated. A product matches when any term matches (OR semantics).

/// Most terms considered from one query
pub const MAX_SEARCH_TERMS: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    terms: Vec<String>,
}

impl SearchQuery {
    /// `None` for a missing or blank query
    ///
    /// Text without any alphanumeric run yields a query with no terms,
    /// which matches nothing.
    pub fn parse(input: Option<&str>) -> Option<Self> {
        let input = input?.trim();
        if input.is_empty() {
            return None;
        }

        let mut terms: Vec<String> = Vec::new();
        for term in tokenize(input) {
            if terms.len() == MAX_SEARCH_TERMS {
                break;
            }
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        Some(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn has_terms(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Postgres `to_tsquery` input: terms joined with `|`
    ///
    /// Terms are alphanumeric only, so no tsquery operator can leak in.
    pub fn to_tsquery(&self) -> String {
        self.terms.join(" | ")
    }

    /// Weighted term-frequency score; name hits count 2.5x description hits
    ///
    /// Mirrors the `A`/`B` weights (1.0 / 0.4) used by `ts_rank`. Zero means
    /// no match.
    pub fn score(&self, name: &str, description: Option<&str>) -> u32 {
        const NAME_WEIGHT: u32 = 5;
        const DESCRIPTION_WEIGHT: u32 = 2;

        let hits = |text: &str| -> u32 {
            tokenize(text)
                .filter(|token| self.terms.iter().any(|term| term == token))
                .count() as u32
        };

        NAME_WEIGHT * hits(name) + DESCRIPTION_WEIGHT * description.map(hits).unwrap_or(0)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}
