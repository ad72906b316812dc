//! Sequential document numbers: `{prefix}-{YYMMDD}{sequence}`.
//!
//! Numbers are issued per owner, per prefix, per local calendar day. The
//! counter behind each (owner, prefix, day) triple lives in a
//! [`CounterStore`](crate::domain::ports::CounterStore) and only changes
//! through atomic [`CounterMutation`]s.

mod counter;
mod error;
mod number;
mod prefix;
mod serial_date;
mod service;

pub use counter::{
    CounterKey, CounterMutation, CounterTransition, DocumentNumberCounter, MAX_SEQUENCE,
};
pub use error::DocumentNumberError;
pub use number::{
    CandidateNumber, CustomDocumentNumber, DocumentNumber, DocumentNumberParseError, NUMBER_SEPARATOR,
    SEQUENCE_MIN_WIDTH,
};
pub use prefix::{DocumentPrefix, DocumentPrefixError, DocumentType, PREFIX_MAX_LEN};
pub use serial_date::{SERIAL_DATE_LEN, SerialDate, SerialDateError};
pub use service::DocumentNumberService;
