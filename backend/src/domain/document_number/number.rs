//! Formatted document numbers: `{prefix}-{YYMMDD}{sequence}`.

use std::fmt;
use std::str::FromStr;

use super::prefix::{DocumentPrefix, DocumentPrefixError};
use super::serial_date::{SERIAL_DATE_LEN, SerialDate, SerialDateError};

/// Separator between the prefix and the date.
pub const NUMBER_SEPARATOR: char = '-';

/// Minimum width of the zero-padded sequence suffix. Wider values are never
/// truncated.
pub const SEQUENCE_MIN_WIDTH: usize = 2;

/// Reasons a candidate string is not a document number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentNumberParseError {
    /// The candidate did not split into exactly two `-` separated parts.
    #[error("document number must contain exactly one '-' separator")]
    Separator,
    /// The prefix part was not a valid prefix.
    #[error("invalid prefix: {0}")]
    Prefix(#[from] DocumentPrefixError),
    /// The six characters after the separator were not a calendar date.
    #[error(transparent)]
    Date(#[from] SerialDateError),
    /// Nothing or a non-integer followed the date.
    #[error("document number must end with a numeric sequence")]
    Sequence,
}

/// A document number issued from a counter.
///
/// # Examples
/// ```
/// use docket::domain::DocumentNumber;
///
/// let number: DocumentNumber = "DN-25101007".parse().expect("valid number");
/// assert_eq!(number.sequence(), 7);
/// assert_eq!(number.to_string(), "DN-25101007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentNumber {
    prefix: DocumentPrefix,
    date: SerialDate,
    sequence: u64,
}

impl DocumentNumber {
    /// Assemble a number from its parts.
    pub fn new(prefix: DocumentPrefix, date: SerialDate, sequence: u64) -> Self {
        Self {
            prefix,
            date,
            sequence,
        }
    }

    /// Prefix component.
    pub fn prefix(&self) -> &DocumentPrefix {
        &self.prefix
    }

    /// Date component.
    pub fn date(&self) -> SerialDate {
        self.date
    }

    /// Sequence component.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

impl fmt::Display for DocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{NUMBER_SEPARATOR}{}{:0width$}",
            self.prefix,
            self.date,
            self.sequence,
            width = SEQUENCE_MIN_WIDTH
        )
    }
}

impl FromStr for DocumentNumber {
    type Err = DocumentNumberParseError;

    /// Split the candidate, then require a valid prefix and a real
    /// calendar date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = CandidateNumber::split(s)?;
        let prefix = DocumentPrefix::new(candidate.prefix())?;
        let date: SerialDate = candidate.date().parse()?;
        Ok(Self::new(prefix, date, candidate.sequence()))
    }
}

/// A candidate number split into its raw parts.
///
/// Only the shape is checked: exactly one separator, six characters where
/// the date belongs, then an integer sequence. The prefix and date are not
/// validated, so the parts may name a counter that can never exist.
///
/// # Examples
/// ```
/// use docket::domain::CandidateNumber;
///
/// let candidate = CandidateNumber::split("D_N-99999901").expect("well shaped");
/// assert_eq!(candidate.prefix(), "D_N");
/// assert_eq!(candidate.sequence(), 1);
/// assert!(candidate.counter_parts().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateNumber<'a> {
    prefix: &'a str,
    date: &'a str,
    sequence: u64,
}

impl<'a> CandidateNumber<'a> {
    /// Split on the single separator, take six date characters, then parse
    /// the remainder as the sequence.
    pub fn split(raw: &'a str) -> Result<Self, DocumentNumberParseError> {
        let mut parts = raw.split(NUMBER_SEPARATOR);
        let (Some(prefix), Some(rest), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DocumentNumberParseError::Separator);
        };
        let Some((date, sequence)) = rest.split_at_checked(SERIAL_DATE_LEN) else {
            return Err(DocumentNumberParseError::Sequence);
        };
        if sequence.is_empty() || !sequence.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(DocumentNumberParseError::Sequence);
        }
        let sequence = sequence
            .parse::<u64>()
            .map_err(|_| DocumentNumberParseError::Sequence)?;

        Ok(Self {
            prefix,
            date,
            sequence,
        })
    }

    /// Raw prefix text.
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Raw date text; always six characters.
    pub fn date(&self) -> &'a str {
        self.date
    }

    /// Parsed sequence.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Prefix and date of the counter that could have issued this
    /// candidate, or `None` when no counter can carry them.
    pub fn counter_parts(&self) -> Option<(DocumentPrefix, SerialDate)> {
        let prefix = DocumentPrefix::new(self.prefix).ok()?;
        let date = self.date.parse().ok()?;
        Some((prefix, date))
    }
}

/// Manually composed number: `{prefix}-{YYMMDD}{suffix}`.
///
/// Not backed by any counter, so nothing guarantees it is unique. The
/// prefix and suffix are written exactly as entered.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use docket::domain::{CustomDocumentNumber, SerialDate};
///
/// let date = SerialDate::from_naive(NaiveDate::from_ymd_opt(2025, 10, 10).expect("date"));
/// let number = CustomDocumentNumber::new("WR", date, Some("001".to_owned()));
/// assert_eq!(number.to_string(), "WR-251010001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomDocumentNumber {
    prefix: String,
    date: SerialDate,
    suffix: Option<String>,
}

impl CustomDocumentNumber {
    /// Compose a custom number; an empty suffix is treated as absent.
    pub fn new(prefix: impl Into<String>, date: SerialDate, suffix: Option<String>) -> Self {
        Self {
            prefix: prefix.into(),
            date,
            suffix: suffix.filter(|value| !value.is_empty()),
        }
    }
}

impl fmt::Display for CustomDocumentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{NUMBER_SEPARATOR}{}", self.prefix, self.date)?;
        match &self.suffix {
            Some(suffix) => f.write_str(suffix),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    #[fixture]
    fn new_year() -> SerialDate {
        SerialDate::from_naive(NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"))
    }

    fn dn() -> DocumentPrefix {
        DocumentPrefix::new("DN").expect("valid prefix")
    }

    #[rstest]
    #[case(1, "DN-25010101")]
    #[case(9, "DN-25010109")]
    #[case(10, "DN-25010110")]
    #[case(42, "DN-25010142")]
    #[case(100, "DN-250101100")]
    #[case(137, "DN-250101137")]
    fn pads_sequence_to_two_digits_without_truncating(
        new_year: SerialDate,
        #[case] sequence: u64,
        #[case] expected: &str,
    ) {
        assert_eq!(DocumentNumber::new(dn(), new_year, sequence).to_string(), expected);
    }

    #[rstest]
    #[case("DN-25010103", 3)]
    #[case("DN-2501011", 1)]
    #[case("DN-250101137", 137)]
    #[case("DN-25010100", 0)]
    fn parses_well_formed_numbers(new_year: SerialDate, #[case] raw: &str, #[case] sequence: u64) {
        let parsed: DocumentNumber = raw.parse().expect("valid number");
        assert_eq!(parsed, DocumentNumber::new(dn(), new_year, sequence));
    }

    #[rstest]
    #[case("DN25010103", DocumentNumberParseError::Separator)]
    #[case("DN-250101-03", DocumentNumberParseError::Separator)]
    #[case("DN-250101", DocumentNumberParseError::Sequence)]
    #[case("DN-25010", DocumentNumberParseError::Sequence)]
    #[case("DN-250101ab", DocumentNumberParseError::Sequence)]
    #[case("DN-250101+3", DocumentNumberParseError::Sequence)]
    #[case("DN-2501010 3", DocumentNumberParseError::Sequence)]
    #[case("-25010103", DocumentNumberParseError::Prefix(DocumentPrefixError::Empty))]
    fn rejects_malformed_candidates(
        #[case] raw: &str,
        #[case] expected: DocumentNumberParseError,
    ) {
        assert_eq!(raw.parse::<DocumentNumber>(), Err(expected));
    }

    #[rstest]
    fn rejects_impossible_dates() {
        let result = "DN-25133101".parse::<DocumentNumber>();
        assert!(matches!(result, Err(DocumentNumberParseError::Date(_))));
    }

    #[rstest]
    fn rejects_sequences_beyond_u64() {
        let result = "DN-25010199999999999999999999".parse::<DocumentNumber>();
        assert_eq!(result, Err(DocumentNumberParseError::Sequence));
    }

    #[rstest]
    fn rejects_multibyte_text_where_date_belongs() {
        let result = "DN-2501é0103".parse::<DocumentNumber>();
        assert!(result.is_err());
    }

    #[rstest]
    #[case(Some("001"), "WR-250101001")]
    #[case(None, "WR-250101")]
    #[case(Some(""), "WR-250101")]
    fn custom_numbers_append_optional_suffix(
        new_year: SerialDate,
        #[case] suffix: Option<&str>,
        #[case] expected: &str,
    ) {
        let number = CustomDocumentNumber::new("WR", new_year, suffix.map(str::to_owned));
        assert_eq!(number.to_string(), expected);
    }

    #[rstest]
    #[case("D_N-99999901", "D_N", "999999", 1)]
    #[case("DN-25133107", "DN", "251331", 7)]
    #[case("DN-2501011", "DN", "250101", 1)]
    fn splits_candidates_without_validating_parts(
        #[case] raw: &str,
        #[case] prefix: &str,
        #[case] date: &str,
        #[case] sequence: u64,
    ) {
        let candidate = CandidateNumber::split(raw).expect("well shaped candidate");
        assert_eq!(candidate.prefix(), prefix);
        assert_eq!(candidate.date(), date);
        assert_eq!(candidate.sequence(), sequence);
    }

    #[rstest]
    #[case("D_N-25010101")]
    #[case("DN-99999901")]
    #[case("DN-25133101")]
    fn candidates_without_a_possible_counter_have_no_counter_parts(#[case] raw: &str) {
        let candidate = CandidateNumber::split(raw).expect("well shaped candidate");
        assert!(candidate.counter_parts().is_none());
    }

    #[rstest]
    fn counter_parts_match_the_issued_number(new_year: SerialDate) {
        let candidate = CandidateNumber::split("DN-25010104").expect("well shaped candidate");
        assert_eq!(candidate.counter_parts(), Some((dn(), new_year)));
    }
}
