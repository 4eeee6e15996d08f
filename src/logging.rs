//! Log output with credentials masked
//!
//! Every formatted line passes through [`Redactor`] before it reaches stderr,
//! so the bot token and the API keys never end up in the logs even when an
//! error message quotes a request URL or header.

use regex::Regex;
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Ordered list of secret patterns and their replacements
pub struct Redactor {
    rules: Vec<(Regex, &'static str)>,
}

impl Redactor {
    /// Compile the masking rules
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern does not compile.
    pub fn new() -> Result<Self, regex::Error> {
        let rules = [
            // Bot API URLs: https://api.telegram.org/bot<token>/method
            (
                r"(https?://[^/]+/bot)([0-9]+:[A-Za-z0-9_-]+)(/['\s]*)",
                "$1[TELEGRAM_TOKEN]$3",
            ),
            (r"bot([0-9]{8,10}:)[A-Za-z0-9_-]+", "bot$1[TELEGRAM_TOKEN]"),
            (r"[0-9]{8,10}:[A-Za-z0-9_-]{35}", "[TELEGRAM_TOKEN]"),
            // OpenWeatherMap key in the query string
            (r"appid=[^\s&]+", "appid=[MASKED]"),
            // API Ninjas header
            (r#"(?i)(x-api-key"?:\s*"?)[^\s",}]+"#, "${1}[MASKED]"),
        ];

        let rules = rules
            .into_iter()
            .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, replacement)))
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { rules })
    }

    /// Mask every secret found in `input`
    #[must_use]
    pub fn redact(&self, input: &str) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |text, (re, replacement)| {
                re.replace_all(&text, *replacement).into_owned()
            })
    }
}

/// Writer that masks each buffer before forwarding it
pub struct RedactingWriter<W: Write> {
    inner: W,
    redactor: Arc<Redactor>,
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let masked = self.redactor.redact(&String::from_utf8_lossy(buf));
        self.inner.write_all(masked.as_bytes())?;
        // The caller's buffer is consumed in full
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// `MakeWriter` handing out [`RedactingWriter`]s over stderr
#[derive(Clone)]
pub struct RedactedStderr {
    redactor: Arc<Redactor>,
}

impl RedactedStderr {
    #[must_use]
    pub const fn new(redactor: Arc<Redactor>) -> Self {
        Self { redactor }
    }
}

impl<'a> MakeWriter<'a> for RedactedStderr {
    type Writer = RedactingWriter<io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: io::stderr(),
            redactor: Arc::clone(&self.redactor),
        }
    }
}

/// Install the global subscriber: `RUST_LOG` filter (default `info`), masked stderr.
pub fn init(redactor: Arc<Redactor>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(RedactedStderr::new(redactor)))
        .init();
}
