use log::debug;

use crate::error::Error;
use crate::summarize::Summarizer;
use crate::{Document, UrlKind, classify, scrape, validate_url, youtube};

/// UI-visible stages of one run, in order. A failure in any stage aborts the
/// rest; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Fetching,
    Summarizing,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Validating => write!(f, "Validating input"),
            Stage::Fetching => write!(f, "Fetching content"),
            Stage::Summarizing => write!(f, "Summarizing"),
        }
    }
}

/// What a successful run yields: the summary and which branch produced it.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: UrlKind,
    pub summary: String,
}

/// One-shot run of the whole request: validate, branch on URL kind, fetch,
/// summarize. Holds everything a request needs so `run` itself stays free of
/// environment access.
pub struct Pipeline {
    client: reqwest::Client,
    summarizer: Summarizer,
    lang: String,
}

impl Pipeline {
    pub fn new(client: reqwest::Client, summarizer: Summarizer, lang: impl Into<String>) -> Self {
        Self {
            client,
            summarizer,
            lang: lang.into(),
        }
    }

    /// Run the full pipeline for one URL. `on_stage` fires at each stage
    /// entry so the caller can drive its progress display. The output carries
    /// the source kind the run branched on, so callers never reclassify.
    pub async fn run(&self, input: &str, mut on_stage: impl FnMut(Stage)) -> Result<RunOutput, Error> {
        on_stage(Stage::Validating);
        let input = input.trim();
        if !self.summarizer.has_credential() || input.is_empty() {
            return Err(Error::MissingConfiguration);
        }
        let url = validate_url(input)?;

        on_stage(Stage::Fetching);
        let kind = classify(input);
        debug!("{url} classified as {kind}");
        let doc = self.fetch(kind, &url).await?;
        debug!("fetched document: {} chars", doc.text.chars().count());

        on_stage(Stage::Summarizing);
        let summary = self.summarizer.summarize(&self.client, &doc).await?;
        Ok(RunOutput { source: kind, summary })
    }

    async fn fetch(&self, kind: UrlKind, url: &url::Url) -> Result<Document, Error> {
        match kind {
            UrlKind::YouTube => {
                let id = youtube::video_id(url)?;
                debug!("resolved video ID {id}");
                youtube::fetch_transcript(&self.client, &id, &self.lang).await
            }
            UrlKind::Website => {
                let client = scrape::build_client()?;
                scrape::fetch_page_text(&client, url).await
            }
        }
    }
}
