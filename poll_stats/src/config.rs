// ********* Errors ***********

use snafu::Snafu;
use std::fmt::Display;

/// Errors raised while loading a poll table or querying it.
///
/// Loading failures (`OpeningFile`, `ReadingFile`, `ReadingRecord` and the parse variants) are raised by
/// `PollTable::load` only. `EmptyData` and `InsufficientData` are only raised by the queries.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PollError {
    #[snafu(display("Error opening poll file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading poll file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading line {lineno} of poll file {path}"))]
    ReadingRecord {
        source: csv::Error,
        path: String,
        lineno: u64,
    },

    #[snafu(display("Line {lineno}: expected 5 fields but found {found}: {line:?}"))]
    WrongFieldCount {
        lineno: u64,
        line: String,
        found: usize,
    },
    #[snafu(display("Line {lineno}: the sample field is empty: {line:?}"))]
    MissingSampleSize { lineno: u64, line: String },
    #[snafu(display("Line {lineno}: could not read {field} {value:?} as an integer: {line:?}"))]
    ParsingInteger {
        source: std::num::ParseIntError,
        lineno: u64,
        line: String,
        field: &'static str,
        value: String,
    },
    #[snafu(display("Line {lineno}: could not read {field} {value:?} as a number: {line:?}"))]
    ParsingFloat {
        source: std::num::ParseFloatError,
        lineno: u64,
        line: String,
        field: &'static str,
        value: String,
    },
    #[snafu(display("Line {lineno}: {field} {value} is not between 0 and 1: {line:?}"))]
    ResultOutOfRange {
        lineno: u64,
        line: String,
        field: &'static str,
        value: f64,
    },

    #[snafu(display("Column {column} has {found} entries, expected {expected}"))]
    MisalignedColumns {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[snafu(display("The poll table is empty"))]
    EmptyData {},
    #[snafu(display("Not enough polls to compare two windows ({rows} rows)"))]
    InsufficientData { rows: usize },
}

impl PollError {
    /// True for the errors caused by a malformed data row.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            PollError::WrongFieldCount { .. }
                | PollError::MissingSampleSize { .. }
                | PollError::ParsingInteger { .. }
                | PollError::ParsingFloat { .. }
                | PollError::ResultOutOfRange { .. }
        )
    }
}

pub type PollResult<T> = Result<T, PollError>;

// ******** Output data structures *********

pub const HARRIS: &str = "Harris";
pub const TRUMP: &str = "Trump";

/// The candidate with the single highest polling result.
///
/// The maxima of both candidates are taken independently, so they may come from different polls.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Leader {
    Harris(f64),
    Trump(f64),
    /// Both maxima are equal.
    Even(f64),
}

impl Leader {
    pub fn result(&self) -> f64 {
        match self {
            Leader::Harris(x) | Leader::Trump(x) | Leader::Even(x) => *x,
        }
    }
}

impl Display for Leader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Leader::Harris(_) => HARRIS,
            Leader::Trump(_) => TRUMP,
            Leader::Even(_) => "EVEN",
        };
        write!(f, "{} {:.1}%", name, self.result() * 100.0)
    }
}

/// A pair of values, one per candidate. Depending on the query these are averages (in 0..1)
/// or differences of averages.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct CandidatePair {
    pub harris: f64,
    pub trump: f64,
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PollRules {
    /// The sample type selected by the likely voter average.
    pub likely_voter_tag: String,
    /// The number of polls at each end of the table compared by the history change.
    /// Tables with fewer than twice this number of rows fall back to half the table.
    pub history_window: usize,
}

impl PollRules {
    pub const LIKELY_VOTER: &'static str = "LV";
    pub const HISTORY_WINDOW: usize = 30;
}

impl Default for PollRules {
    fn default() -> Self {
        PollRules {
            likely_voter_tag: PollRules::LIKELY_VOTER.to_string(),
            history_window: PollRules::HISTORY_WINDOW,
        }
    }
}

/// A single poll, as read from one line of the input.
#[derive(PartialEq, Debug, Clone)]
pub struct PollRow {
    pub month: String,
    pub date: u32,
    pub sample_size: u32,
    pub sample_type: String,
    pub harris_result: f64,
    pub trump_result: f64,
}
