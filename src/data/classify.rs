use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref WORD_REGEX: Regex = Regex::new(r"^[A-Za-z]+$").unwrap();
    static ref NUMBER_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref LINK_REGEX: Regex = Regex::new(r"^(https?|ftp)://[^\s/$.?#][^\s]*$").unwrap();
}

// ---------------------------------------------------------------------------
// ContentType – what every cell of a row must look like
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentType {
    /// ASCII letters only.
    Word,
    /// ASCII digits only.
    Number,
    /// Absolute http / https / ftp URL.
    Link,
    /// No restriction.
    #[default]
    All,
}

impl ContentType {
    pub const ALL: [ContentType; 4] = [
        ContentType::Word,
        ContentType::Number,
        ContentType::Link,
        ContentType::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Word => "word",
            ContentType::Number => "number",
            ContentType::Link => "link",
            ContentType::All => "all",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown content type '{0}' (expected word, number, link or all)")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(ContentType::Word),
            "number" => Ok(ContentType::Number),
            "link" => Ok(ContentType::Link),
            "all" => Ok(ContentType::All),
            _ => Err(UnknownContentType(s.to_string())),
        }
    }
}

/// Does a single field value match the content type?
pub fn classify(value: &str, content_type: ContentType) -> bool {
    match content_type {
        ContentType::Word => WORD_REGEX.is_match(value),
        ContentType::Number => NUMBER_REGEX.is_match(value),
        ContentType::Link => LINK_REGEX.is_match(value),
        ContentType::All => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_accepts_anything() {
        for v in ["", " ", "abc", "123", "http://x.y", "ünïcödé", "\n"] {
            assert!(classify(v, ContentType::All), "{v:?}");
        }
    }

    #[test]
    fn number() {
        assert!(classify("123", ContentType::Number));
        assert!(classify("0", ContentType::Number));
        assert!(!classify("12a", ContentType::Number));
        assert!(!classify("", ContentType::Number));
        assert!(!classify("-1", ContentType::Number));
        assert!(!classify("1.5", ContentType::Number));
        // Non-ASCII digits are not numbers here.
        assert!(!classify("١٢٣", ContentType::Number));
    }

    #[test]
    fn word() {
        assert!(classify("abc", ContentType::Word));
        assert!(classify("Alice", ContentType::Word));
        assert!(!classify("abc1", ContentType::Word));
        assert!(!classify("two words", ContentType::Word));
        assert!(!classify("", ContentType::Word));
    }

    #[test]
    fn link() {
        assert!(classify("http://example.com", ContentType::Link));
        assert!(classify("https://example.org/a?b=c", ContentType::Link));
        assert!(classify("ftp://files.example.net", ContentType::Link));
        assert!(!classify("not a url", ContentType::Link));
        assert!(!classify("mailto:someone@example.com", ContentType::Link));
        assert!(!classify("http://", ContentType::Link));
        assert!(!classify("http://.example.com", ContentType::Link));
        assert!(!classify("http://exa mple.com", ContentType::Link));
        assert!(!classify("", ContentType::Link));
    }

    #[test]
    fn parse_content_type() {
        assert_eq!("number".parse(), Ok(ContentType::Number));
        assert_eq!(" Link ".parse(), Ok(ContentType::Link));
        assert!("date".parse::<ContentType>().is_err());
    }
}
