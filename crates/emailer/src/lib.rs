//! RSS digest mailer.
//!
//! Renders a batch of feed entries into an HTML or plain-text email and
//! sends it through an SMTP relay.
//!
//! # Usage
//!
//! ```no_run
//! use emailer::{ContentType, Mailer, SmtpNotifier};
//! use feed::{Entry, EntryResultSet};
//!
//! # async fn run() -> Result<(), emailer::EmailerError> {
//! // Resolve SMTP settings from environment variables
//! let notifier = SmtpNotifier::from_env(ContentType::Html);
//!
//! let entries = EntryResultSet::new(vec![Entry::new(
//!     "https://blog.rust-lang.org/",
//!     "Rust Blog",
//!     "<p>New release</p>",
//! )]);
//!
//! notifier.send_email("reader@example.com", &entries).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! - `SMTP_EMAIL`: sender address and SMTP username (falls back to `GMAIL_EMAIL`)
//! - `SMTP_PASSWORD`: SMTP password (falls back to `GMAIL_PASSWORD`)
//! - `SMTP_SERVER`: SMTP host (default: `smtp.gmail.com`)
//! - `SMTP_PORT`: SMTP port (default: 587)
//! - `SMTP_SECURITY`: `starttls` (default), `tls` or `none`

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod config;
pub mod error;
pub mod render;

pub use adapter::{Mailer, SmtpNotifier};
pub use config::{ContentType, NotifierConfig, TransportSecurity};
pub use error::EmailerError;
