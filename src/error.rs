use thiserror::Error;

/// Failure taxonomy for a single summarization run.
///
/// Fetch and summarize operations return these typed values so callers handle
/// both outcomes explicitly. The `Display` form carries internal detail for
/// the log file; `user_message` is the only text that reaches the terminal.
#[derive(Debug, Error)]
pub enum Error {
    /// Blank API credential or blank URL input. Nothing downstream runs.
    #[error("missing API key or URL input")]
    MissingConfiguration,

    /// The input failed the generic URL syntax check (scheme + host).
    #[error("not a valid URL: {0}")]
    InvalidUrl(String),

    /// The URL looks like YouTube but no video ID could be derived from it.
    #[error("no video ID in YouTube URL: {0}")]
    InvalidYouTubeUrl(String),

    /// Captions are private, disabled, or the transcript service failed.
    #[error("transcript unavailable: {reason}")]
    TranscriptUnavailable { reason: String },

    /// The site blocked the request or returned no extractable text.
    #[error("page content unavailable: {reason}")]
    ContentUnavailable { reason: String },

    /// The completion call failed (auth, rate limit, network, bad payload).
    #[error("summarization failed: {0}")]
    Summarization(String),
}

impl Error {
    /// The presentation string for this failure.
    ///
    /// Collaborator failures collapse to fixed text: no video ID, reason, or
    /// fetched content appears in the panel. Summarization is the one variant
    /// that appends the underlying error.
    pub fn user_message(&self) -> String {
        match self {
            Error::MissingConfiguration => {
                "Please provide the information to get started.".to_string()
            }
            Error::InvalidUrl(_) => {
                "Please enter a valid URL. It can be a YouTube video or website URL.".to_string()
            }
            Error::InvalidYouTubeUrl(_) => {
                "Could not find a video ID in this YouTube URL. Supported formats: \
                 watch, youtu.be, embed, and /v/ links."
                    .to_string()
            }
            Error::TranscriptUnavailable { .. } => {
                "The transcript of this YouTube video is private or not available.".to_string()
            }
            Error::ContentUnavailable { .. } => {
                "The content of this website is private or cannot be accessed without permission."
                    .to_string()
            }
            Error::Summarization(detail) => format!("An unexpected error occurred: {detail}"),
        }
    }
}
