use chrono::{DateTime, Utc};

/// A headline selected for the digest
#[derive(Debug, Clone)]
pub struct Headline {
    /// Cleaned display title, unique within its section (case-insensitive)
    pub title: String,
    /// Optional one-line summary snippet, cut at sentence boundaries
    pub summary: Option<String>,
    pub published_at: DateTime<Utc>,
}

/// One rendered block of the digest: a category and its headlines
#[derive(Debug, Clone)]
pub struct Section {
    pub category: String,
    pub headlines: Vec<Headline>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }
}

/// The full output of one run. Carries no state to the next run.
#[derive(Debug, Clone)]
pub struct Digest {
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
}
