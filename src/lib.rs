pub mod config;
pub mod error;
pub mod pipeline;
pub mod scrape;
pub mod summarize;
pub mod youtube;

use url::Url;

use crate::error::Error;

/// Which fetch branch handles a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    YouTube,
    Website,
}

impl std::fmt::Display for UrlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlKind::YouTube => write!(f, "youtube"),
            UrlKind::Website => write!(f, "website"),
        }
    }
}

/// A single blob of extracted text, ready to summarize.
///
/// Created fresh per request and dropped once the summary exists; it carries
/// no metadata beyond the raw text.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
}

/// Check that the input is a syntactically valid http(s) URL with a host.
///
/// Scheme-less input fails rather than being completed with a guessed scheme.
pub fn validate_url(input: &str) -> Result<Url, Error> {
    let url = Url::parse(input).map_err(|_| Error::InvalidUrl(input.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::InvalidUrl(input.to_string()));
    }
    Ok(url)
}

/// Decide which fetch branch handles the input.
///
/// A plain substring test, total over any string: mentions of youtube.com or
/// youtu.be go to the transcript branch, everything else gets scraped.
pub fn classify(url: &str) -> UrlKind {
    if url.contains("youtube.com") || url.contains("youtu.be") {
        UrlKind::YouTube
    } else {
        UrlKind::Website
    }
}
