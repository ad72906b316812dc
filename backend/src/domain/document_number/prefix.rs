//! Document categories and the prefixes that tag their numbers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Maximum prefix length accepted for custom prefixes.
pub const PREFIX_MAX_LEN: usize = 16;

/// Validation errors for [`DocumentPrefix`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentPrefixError {
    /// The prefix was empty.
    #[error("prefix must not be empty")]
    Empty,
    /// The prefix exceeded [`PREFIX_MAX_LEN`] characters.
    #[error("prefix must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The prefix contained something other than ASCII letters and digits.
    #[error("prefix may only contain ASCII letters and digits")]
    InvalidCharacters,
}

/// Short alphanumeric tag that leads every document number.
///
/// ## Invariants
/// - 1 to [`PREFIX_MAX_LEN`] ASCII alphanumeric characters, so it can never
///   contain the `-` separator or the `_` counter-key delimiter.
///
/// # Examples
/// ```
/// use docket::domain::DocumentPrefix;
///
/// assert_eq!(DocumentPrefix::new("INV").expect("valid").as_str(), "INV");
/// assert!(DocumentPrefix::new("IN-V").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPrefix(String);

impl DocumentPrefix {
    /// Validate and construct a prefix.
    pub fn new(raw: impl Into<String>) -> Result<Self, DocumentPrefixError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DocumentPrefixError::Empty);
        }
        if raw.len() > PREFIX_MAX_LEN {
            return Err(DocumentPrefixError::TooLong {
                max: PREFIX_MAX_LEN,
            });
        }
        if !raw.bytes().all(|byte| byte.is_ascii_alphanumeric()) {
            return Err(DocumentPrefixError::InvalidCharacters);
        }
        Ok(Self(raw))
    }

    /// Borrow the prefix text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DocumentPrefix> for String {
    fn from(value: DocumentPrefix) -> Self {
        value.0
    }
}

impl TryFrom<String> for DocumentPrefix {
    type Error = DocumentPrefixError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for DocumentPrefix {
    type Err = DocumentPrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Kind of document a number is issued for.
///
/// Parsing never fails: unrecognised names fall back to [`DocumentType::Other`]
/// and therefore to the generic `DOC` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case", from = "String", into = "String")]
pub enum DocumentType {
    /// Delivery note, prefixed `DN`.
    Delivery,
    /// Warranty card, prefixed `WR`.
    Warranty,
    /// Any other document, prefixed `DOC`.
    Other,
}

impl DocumentType {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Warranty => "warranty",
            Self::Other => "other",
        }
    }

    /// Prefix derived from the document type.
    ///
    /// # Examples
    /// ```
    /// use docket::domain::DocumentType;
    ///
    /// assert_eq!(DocumentType::Delivery.prefix().as_str(), "DN");
    /// assert_eq!("invoice".parse::<DocumentType>().map(|t| t.prefix().to_string()), Ok("DOC".to_owned()));
    /// ```
    pub fn prefix(self) -> DocumentPrefix {
        let tag = match self {
            Self::Delivery => "DN",
            Self::Warranty => "WR",
            Self::Other => "DOC",
        };
        DocumentPrefix(tag.to_owned())
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "delivery" => Self::Delivery,
            "warranty" => Self::Warranty,
            _ => Self::Other,
        })
    }
}

impl From<String> for DocumentType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        }
    }
}

impl From<DocumentType> for String {
    fn from(value: DocumentType) -> Self {
        value.as_str().to_owned()
    }
}
