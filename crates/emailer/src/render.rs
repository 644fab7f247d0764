//! Digest body and subject rendering.
//!
//! Entry titles and content are interpolated verbatim. Feed content is
//! already HTML and is trusted as delivered by the feed reader, so the HTML
//! body performs no escaping.

use std::fmt::Write;

use chrono::{Local, NaiveDate};
use feed::EntryResultSet;

use crate::config::ContentType;

/// Separator line around each entry's content in plain-text bodies.
const PLAIN_RULE: &str = "--------------";

/// Render the digest body for `entries` in the given format.
///
/// Entries appear in batch order. An empty batch renders an empty body.
#[must_use]
pub fn format_body(content_type: ContentType, entries: &EntryResultSet) -> String {
    let mut body = String::new();

    match content_type {
        ContentType::Html => {
            for entry in entries {
                let _ = write!(
                    body,
                    r#"<h2><a href="{url}">{title}</a></h2><br/><div>{content}</div><hr>"#,
                    url = entry.url,
                    title = entry.title,
                    content = entry.content,
                );
            }
        }
        ContentType::Plain => {
            for entry in entries {
                let _ = write!(
                    body,
                    "{url} - {title}\n{PLAIN_RULE}\n{content}\n{PLAIN_RULE}\n",
                    url = entry.url,
                    title = entry.title,
                    content = entry.content,
                );
            }
        }
    }

    body
}

/// Subject line for a digest sent on `date`.
#[must_use]
pub fn subject_for(date: NaiveDate) -> String {
    format!("📰 RSS Updates - {}", date.format("%Y-%m-%d"))
}

/// Subject line for a digest sent today (local clock).
#[must_use]
pub fn subject() -> String {
    subject_for(Local::now().date_naive())
}
