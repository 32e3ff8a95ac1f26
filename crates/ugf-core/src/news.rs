// News feed entries produced by engine actions.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::save::{NewsItem, SaveData};

impl NewsItem {
    /// Build an item stamped at `now`, with id `news_<kind>_<unix-millis>`.
    pub fn stamped(
        kind: &str,
        headline: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("news_{kind}_{}", now.timestamp_millis()),
            headline: headline.into(),
            description: description.into(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            cta: None,
        }
    }

    pub fn with_cta(mut self, cta: impl Into<String>) -> Self {
        self.cta = Some(cta.into());
        self
    }
}

/// Put `item` at the top of the feed (newest first).
pub fn push_news(save: &mut SaveData, item: NewsItem) {
    save.news.insert(0, item);
}
