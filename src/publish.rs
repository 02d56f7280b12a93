//! Publishing a compiled document as the description of a course assignment.
//!
//! The compile pipeline never depends on this module; it only consumes the
//! finished HTML.
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::Config;

const DESCRIPTION_FIELD: &str = "assignment[description]";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("environment variable `{0}` is not set")]
    MissingCredential(String),

    #[error("invalid resource URL `{url}`: {reason}")]
    InvalidUrl {
        url: String,
        reason: String,
    },

    #[error("could not set up the HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{method} {url}: network error: {source}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url}: HTTP {status}\n{body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    #[error("{method} {url}: could not parse JSON response: {source}")]
    Decode {
        method: &'static str,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

///////////////////////////////////////////////////////////////////////////////
// RESOURCE URLS
///////////////////////////////////////////////////////////////////////////////

/// An assignment addressed as `.../courses/<id>/assignments/<id>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUrl {
    /// `scheme://host[:port]`
    pub base: String,
    pub collection_id: u64,
    pub item_id: u64,
}

impl ResourceUrl {
    pub fn parse(raw: &str) -> Result<ResourceUrl, PublishError> {
        let invalid = |reason: &str| PublishError::InvalidUrl {
            url: raw.to_owned(),
            reason: reason.to_owned(),
        };
        let url = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
        let host = url.host_str().ok_or_else(|| invalid("missing host"))?;
        let base = match url.port() {
            Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
            None => format!("{}://{}", url.scheme(), host),
        };
        let segments = url
            .path_segments()
            .map(|segments| segments.filter(|segment| !segment.is_empty()).collect::<Vec<_>>())
            .unwrap_or_default();
        let id_after = |marker: &str| -> Result<u64, PublishError> {
            let position = segments
                .iter()
                .position(|segment| *segment == marker)
                .ok_or_else(|| invalid("path must look like /courses/<id>/assignments/<id>"))?;
            segments
                .get(position + 1)
                .and_then(|id| id.parse().ok())
                .ok_or_else(|| invalid(&format!("expected a numeric id after `{}`", marker)))
        };
        Ok(ResourceUrl {
            collection_id: id_after("courses")?,
            item_id: id_after("assignments")?,
            base,
        })
    }

    pub fn api_endpoint(&self) -> String {
        format!(
            "{}/api/v1/courses/{}/assignments/{}",
            self.base, self.collection_id, self.item_id,
        )
    }
}

impl fmt::Display for ResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/courses/{}/assignments/{}", self.base, self.collection_id, self.item_id)
    }
}

///////////////////////////////////////////////////////////////////////////////
// BODY EXTRACTION
///////////////////////////////////////////////////////////////////////////////

lazy_static! {
    static ref BODY_OPEN: Regex = Regex::new(r"(?i)<body\b[^>]*>").unwrap();
    static ref BODY_CLOSE: Regex = Regex::new(r"(?i)</body\s*>").unwrap();
}

/// The inner HTML of `<body>` and `true`, or the whole input and `false` when
/// there is no body element.
pub fn extract_body_html(html: &str) -> (String, bool) {
    let open = match BODY_OPEN.find(html) {
        Some(open) => open,
        None => return (html.to_owned(), false),
    };
    let inner = &html[open.end()..];
    let end = BODY_CLOSE
        .find_iter(inner)
        .last()
        .map(|close| close.start())
        .unwrap_or(inner.len());
    (inner[..end].trim().to_owned(), true)
}

///////////////////////////////////////////////////////////////////////////////
// CLIENT
///////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Assignment {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PublishReport {
    pub endpoint: String,
    /// Name of the assignment as fetched before the update.
    pub name: Option<String>,
    pub used_body: bool,
    /// Characters sent (or that would be sent) as the description.
    pub length: usize,
    /// Description length reported back, `None` on a dry run.
    pub updated_length: Option<usize>,
}

pub struct Publisher {
    client: Client,
    token: String,
}

impl Publisher {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Publisher, PublishError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PublishError::Client)?;
        Ok(Publisher {client, token: token.into()})
    }

    /// Reads the access token from the configured environment variable.
    pub fn from_config(config: &Config) -> Result<Publisher, PublishError> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| PublishError::MissingCredential(config.token_env.clone()))?;
        Publisher::new(token, Duration::from_secs(config.timeout_secs))
    }

    /// Replaces the assignment description with the body of `html`. On a dry
    /// run the assignment is fetched but not updated.
    pub fn publish(&self, html: &str, target: &ResourceUrl, dry_run: bool) -> Result<PublishReport, PublishError> {
        let (description, used_body) = extract_body_html(html);
        let endpoint = target.api_endpoint();
        let current = self.send("GET", &endpoint, self.client.get(&endpoint))?;
        info!("assignment: {}", current.name.as_deref().unwrap_or("(no name)"));
        let mut report = PublishReport {
            name: current.name,
            used_body,
            length: description.chars().count(),
            updated_length: None,
            endpoint,
        };
        if dry_run {
            debug!("dry run: not updating {}", report.endpoint);
            return Ok(report)
        }
        let request = self.client
            .put(&report.endpoint)
            .form(&[(DESCRIPTION_FIELD, description.as_str())]);
        let updated = self.send("PUT", &report.endpoint, request)?;
        report.updated_length = Some(updated.description.map(|text| text.chars().count()).unwrap_or(0));
        Ok(report)
    }

    fn send(&self, method: &'static str, url: &str, request: RequestBuilder) -> Result<Assignment, PublishError> {
        debug!("{} {}", method, url);
        let response = request
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| PublishError::Transport {method, url: url.to_owned(), source})?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|source| PublishError::Transport {method, url: url.to_owned(), source})?;
        if !status.is_success() {
            return Err(PublishError::Status {
                method,
                url: url.to_owned(),
                status: status.as_u16(),
                body,
            })
        }
        decode(&body).map_err(|source| PublishError::Decode {method, url: url.to_owned(), source})
    }
}

/// An empty response body counts as an empty object.
fn decode(body: &str) -> Result<Assignment, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Assignment::default())
    }
    serde_json::from_str(body)
}
