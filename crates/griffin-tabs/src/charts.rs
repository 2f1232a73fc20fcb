//! Saved chart shortcuts and bulk URL import.

use std::collections::HashSet;
use std::sync::LazyLock;

use griffin_common::new_id;
use regex::Regex;
use serde::{Deserialize, Serialize};

static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"https?://[^\s]+").unwrap());

static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"symbol=([\w%:]+)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedChart {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// A chart parsed from free text, not yet saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDraft {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartCatalog {
    charts: Vec<SavedChart>,
}

impl ChartCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[SavedChart] {
        &self.charts
    }

    pub fn get(&self, id: &str) -> Option<&SavedChart> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn add(&mut self, title: &str, url: &str) -> String {
        let chart = SavedChart {
            id: new_id(),
            title: title.to_string(),
            url: url.to_string(),
        };
        let id = chart.id.clone();
        self.charts.push(chart);
        id
    }

    pub fn update(&mut self, id: &str, title: &str, url: &str) -> bool {
        match self.charts.iter_mut().find(|c| c.id == id) {
            Some(chart) => {
                chart.title = title.to_string();
                chart.url = url.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.charts.len();
        self.charts.retain(|c| c.id != id);
        self.charts.len() != before
    }

    /// Save every URL found in `text`; returns the new ids.
    pub fn import(&mut self, text: &str) -> Vec<String> {
        parse_urls_to_charts(text)
            .into_iter()
            .map(|draft| self.add(&draft.title, &draft.url))
            .collect()
    }
}

/// Extract every http(s) URL from free text, de-duplicated in first-seen
/// order, each with a derived title.
pub fn parse_urls_to_charts(text: &str) -> Vec<ChartDraft> {
    let mut seen = HashSet::new();
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|url| seen.insert(*url))
        .map(|url| ChartDraft {
            title: title_from_url(url),
            url: url.to_string(),
        })
        .collect()
}

/// TradingView symbol (`FX%3AEURNZD` → `FX:EURNZD`), else the capitalized
/// first label of the host, else the URL itself.
fn title_from_url(url: &str) -> String {
    if let Some(symbol) = SYMBOL_RE.captures(url).and_then(|c| c.get(1)) {
        if let Ok(decoded) = urlencoding::decode(symbol.as_str()) {
            return decoded.into_owned();
        }
    }

    let host = match url::Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(e) => {
            tracing::debug!(url, error = %e, "Could not parse title from URL");
            None
        }
    };

    host.as_deref()
        .map(|h| h.strip_prefix("www.").unwrap_or(h))
        .and_then(|h| h.split('.').next())
        .filter(|label| !label.is_empty())
        .map(capitalize)
        .unwrap_or_else(|| url.to_string())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
