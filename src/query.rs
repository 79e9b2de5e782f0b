use crate::prelude::*;
use regex::Regex;

/// The user's pattern, compiled once at startup
#[derive(Debug, Clone)]
pub struct Query {
    source: String,
    pattern: Regex,
}

impl Query {
    pub fn new(source: &str) -> Result<Self> {
        let pattern =
            Regex::new(source).with_context(|| format!("invalid pattern: {source:?}"))?;
        Ok(Self {
            source: source.to_owned(),
            pattern,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}
