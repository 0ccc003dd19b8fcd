use std::io::Cursor;

use log::debug;
use url::Url;

use crate::Document;
use crate::error::Error;

/// Browser-like identity presented to scraped sites in place of the default
/// client UA.
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X) AppleWebKit/537.36 (KHTML, like Gecko) Chrome Safari";

/// Render width handed to html2text.
const TEXT_WIDTH: usize = 120;

fn unavailable(reason: impl std::fmt::Display) -> Error {
    Error::ContentUnavailable {
        reason: reason.to_string(),
    }
}

/// Build the website-branch HTTP client.
///
/// TLS verification is permissive and every request carries the browser
/// User-Agent. This client is only ever pointed at the page being
/// summarized; the YouTube and completion calls use a normally verified one.
pub fn build_client() -> Result<reqwest::Client, Error> {
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .user_agent(USER_AGENT)
        .build()
        .map_err(unavailable)
}

/// Fetch a page and reduce it to the visible text a reader would see.
///
/// Non-success status, transport failure, and blank extraction all report as
/// `ContentUnavailable`.
pub async fn fetch_page_text(client: &reqwest::Client, url: &Url) -> Result<Document, Error> {
    debug!("fetching page: {url}");

    let resp = client.get(url.as_str()).send().await.map_err(unavailable)?;
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = resp.text().await.map_err(unavailable)?;

    let doc = document_from_response(url, status, &content_type, &body)?;
    debug!("extracted {} chars of page text", doc.text.chars().count());
    Ok(doc)
}

/// Reduce one fetched response to a document, or the reason there is none.
fn document_from_response(
    url: &Url,
    status: reqwest::StatusCode,
    content_type: &str,
    body: &str,
) -> Result<Document, Error> {
    if !status.is_success() {
        return Err(unavailable(format!("{url} returned {status}")));
    }

    let text = if is_html(content_type, body) {
        html_to_text(body)?
    } else {
        body.trim().to_string()
    };

    if text.trim().is_empty() {
        return Err(unavailable(format!("{url} yielded no extractable text")));
    }

    Ok(Document { text })
}

/// Reduce an HTML body to its visible text.
fn html_to_text(html: &str) -> Result<String, Error> {
    html2text::from_read(Cursor::new(html.as_bytes()), TEXT_WIDTH).map_err(unavailable)
}

/// Content-Type header first, then a conservative sniff of the body prefix.
fn is_html(content_type: &str, body: &str) -> bool {
    if content_type.contains("html") {
        return true;
    }
    let head = body.trim_start();
    ["<!doctype", "<html", "<head", "<body"]
        .iter()
        .any(|prefix| head.get(..prefix.len()).is_some_and(|h| h.eq_ignore_ascii_case(prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_html_by_header() {
        assert!(is_html("text/html; charset=utf-8", "plain stuff"));
        assert!(is_html("application/xhtml+xml", ""));
    }

    #[test]
    fn test_is_html_by_sniff() {
        assert!(is_html("", "<!DOCTYPE html><html><body>hi</body></html>"));
        assert!(is_html("text/plain", "  <html lang=\"en\"><p>hi</p></html>"));
    }

    #[test]
    fn test_is_html_negative() {
        assert!(!is_html("text/plain", "just some words"));
        assert!(!is_html("application/json", "{\"a\": 1}"));
        assert!(!is_html("", ""));
    }

    #[test]
    fn test_html_to_text_strips_markup() {
        let text = html_to_text("<html><body><h1>Title</h1><p>Hello world</p></body></html>").unwrap();
        assert!(text.contains("Title"));
        assert!(text.contains("Hello world"));
        assert!(!text.contains("<p>"));
    }

    #[test]
    fn test_html_to_text_drops_scripts() {
        let text =
            html_to_text("<html><head><script>var x = 1;</script></head><body><p>Visible</p></body></html>")
                .unwrap();
        assert!(text.contains("Visible"));
        assert!(!text.contains("var x"));
    }

    fn page_url() -> Url {
        Url::parse("https://example.com/article").unwrap()
    }

    #[test]
    fn test_response_with_text_yields_document() {
        let doc = document_from_response(
            &page_url(),
            reqwest::StatusCode::OK,
            "text/html; charset=utf-8",
            "<html><body><p>Some readable article text.</p></body></html>",
        )
        .unwrap();
        assert!(doc.text.contains("Some readable article text."));
    }

    #[test]
    fn test_blank_extraction_is_content_unavailable() {
        // All markup, no visible text
        let err = document_from_response(
            &page_url(),
            reqwest::StatusCode::OK,
            "text/html",
            "<html><head><script>var x = 1;</script></head><body></body></html>",
        )
        .unwrap_err();
        assert!(matches!(err, Error::ContentUnavailable { .. }));

        let err = document_from_response(&page_url(), reqwest::StatusCode::OK, "text/plain", "  \n\t ")
            .unwrap_err();
        assert!(matches!(err, Error::ContentUnavailable { .. }));
    }

    #[test]
    fn test_error_status_is_content_unavailable() {
        // The body does not rescue a non-success status.
        let err = document_from_response(
            &page_url(),
            reqwest::StatusCode::FORBIDDEN,
            "text/html",
            "<html><body>Access denied</body></html>",
        )
        .unwrap_err();
        assert!(matches!(err, Error::ContentUnavailable { .. }));
    }
}
