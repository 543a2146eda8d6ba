use serde::Deserialize;
use serde_json::Value;

use super::error::InsightError;

/// Shortest trimmed answer worth analysing, in UTF-16 code units.
pub const MIN_ANSWER_LEN: usize = 10;

/// Browser `trim()` whitespace: Unicode white space plus the BOM, minus NEL.
fn is_trimmed(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// `answer` stays untyped so a wrong type is a validation failure, not a parse failure.
#[derive(Deserialize, Debug, Default)]
pub struct InsightRequest {
    #[serde(default)]
    pub answer: Option<Value>,
}

impl InsightRequest {
    /// Anything that is not a JSON object counts as a request without an answer.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Returns the trimmed answer when it is a string long enough to analyse.
    pub fn validate(&self) -> Result<&str, InsightError> {
        let answer: &str = match &self.answer {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return Err(InsightError::InvalidAnswer),
        };

        let trimmed: &str = answer.trim_matches(is_trimmed);
        if trimmed.encode_utf16().count() < MIN_ANSWER_LEN {
            return Err(InsightError::AnswerTooShort);
        }

        Ok(trimmed)
    }
}
