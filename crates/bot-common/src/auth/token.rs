//! Bot token
//!
//! The token authenticates both the gateway Identify and every REST request.
//! It must never reach a log line, so `Debug` and `Display` are redacted.

use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// Opaque bot credential
#[derive(Clone, PartialEq, Eq, Default)]
pub struct BotToken(String);

impl BotToken {
    /// Wrap a raw token, trimming surrounding whitespace
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self(raw.trim().to_string())
    }

    /// Check whether a token is actually configured
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw token, for placing on the wire only
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for the HTTP `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Bot {}", self.0)
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BotToken").field(&REDACTED).finish()
    }
}

impl fmt::Display for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<String> for BotToken {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for BotToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
