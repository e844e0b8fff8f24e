mod config;
use log::{debug, info, warn};
use snafu::{ensure, OptionExt, ResultExt};

use std::fs::File;
use std::io::Read;
use std::path::Path;

pub use crate::config::*;
use crate::builder::Builder;

pub mod builder;
pub mod manual;

/// A table of polls, stored column by column.
///
/// All the columns have the same length and are aligned by index. The order is the order of the
/// source, which is reverse-chronological: index 0 is the most recent poll.
/// A table cannot be modified once built.
#[derive(PartialEq, Debug, Clone)]
pub struct PollTable {
    month: Vec<String>,
    date: Vec<u32>,
    sample_size: Vec<u32>,
    sample_type: Vec<String>,
    harris_result: Vec<f64>,
    trump_result: Vec<f64>,
}

impl PollTable {
    /// Reads a poll file.
    ///
    /// The first line is a header and is ignored, as are blank lines. Every other line must have
    /// the form `month,day,size type,harris,trump`, for example `October,28,1880 LV,0.49,0.46`.
    pub fn load<P: AsRef<Path>>(path: P) -> PollResult<PollTable> {
        let path_s = path.as_ref().display().to_string();
        info!("Attempting to read poll file {:?}", path_s);
        let file = File::open(path.as_ref()).context(OpeningFileSnafu {
            path: path_s.clone(),
        })?;
        PollTable::from_reader(file, &path_s)
    }

    /// Reads polls from any source, using the same format as `load`.
    /// `source_name` is only used in the error messages.
    pub fn from_reader<R: Read>(mut reader: R, source_name: &str) -> PollResult<PollTable> {
        let mut contents = String::new();
        reader
            .read_to_string(&mut contents)
            .context(ReadingFileSnafu { path: source_name })?;

        // Lines are split one at a time so that errors report physical line numbers.
        let fields_reader = {
            let mut b = csv::ReaderBuilder::new();
            b.has_headers(false)
                .flexible(true)
                .quoting(false)
                .terminator(csv::Terminator::Any(b'\n'))
                .trim(csv::Trim::All);
            b
        };

        let mut lines = contents.lines();
        // The first physical line is the header, whatever it holds.
        if let Some(header) = lines.next() {
            debug!("from_reader: header: {:?}", header);
        }

        let mut builder = Builder::new();
        for (idx, line) in lines.enumerate() {
            let lineno = idx as u64 + 2;
            if line.trim().is_empty() {
                continue;
            }
            let record = match fields_reader.from_reader(line.as_bytes()).records().next() {
                Some(record_r) => record_r.context(ReadingRecordSnafu {
                    path: source_name,
                    lineno,
                })?,
                None => continue,
            };
            let fields: Vec<&str> = record.iter().collect();
            let row = parse_line(&fields, lineno)?;
            debug!("from_reader: lineno: {:?} row: {:?}", lineno, row);
            builder.add_row(row)?;
        }
        let table = builder.build()?;
        info!("Read {} polls from {:?}", table.len(), source_name);
        Ok(table)
    }

    /// Assembles a table from its columns. All the columns must have the same length.
    pub fn from_columns(
        month: Vec<String>,
        date: Vec<u32>,
        sample_size: Vec<u32>,
        sample_type: Vec<String>,
        harris_result: Vec<f64>,
        trump_result: Vec<f64>,
    ) -> PollResult<PollTable> {
        let expected = month.len();
        let lengths = [
            ("date", date.len()),
            ("sample_size", sample_size.len()),
            ("sample_type", sample_type.len()),
            ("harris_result", harris_result.len()),
            ("trump_result", trump_result.len()),
        ];
        for (column, found) in lengths {
            ensure!(
                found == expected,
                MisalignedColumnsSnafu {
                    column,
                    expected,
                    found
                }
            );
        }
        Ok(PollTable {
            month,
            date,
            sample_size,
            sample_type,
            harris_result,
            trump_result,
        })
    }

    pub fn len(&self) -> usize {
        self.month.len()
    }

    pub fn is_empty(&self) -> bool {
        self.month.is_empty()
    }

    pub fn months(&self) -> &[String] {
        &self.month
    }

    pub fn dates(&self) -> &[u32] {
        &self.date
    }

    pub fn sample_sizes(&self) -> &[u32] {
        &self.sample_size
    }

    pub fn sample_types(&self) -> &[String] {
        &self.sample_type
    }

    pub fn harris_results(&self) -> &[f64] {
        &self.harris_result
    }

    pub fn trump_results(&self) -> &[f64] {
        &self.trump_result
    }

    /// The polls, one at a time, in table order.
    pub fn rows(&self) -> impl Iterator<Item = PollRow> + '_ {
        (0..self.len()).map(move |idx| PollRow {
            month: self.month[idx].clone(),
            date: self.date[idx],
            sample_size: self.sample_size[idx],
            sample_type: self.sample_type[idx].clone(),
            harris_result: self.harris_result[idx],
            trump_result: self.trump_result[idx],
        })
    }

    /// Number of polls with exactly this sample type (case-sensitive).
    pub fn count_sample_type(&self, tag: &str) -> usize {
        self.sample_type.iter().filter(|st| *st == tag).count()
    }
}

// The line as it is reported in the error messages.
fn line_text(fields: &[&str]) -> String {
    fields.join(",")
}

fn parse_line(fields: &[&str], lineno: u64) -> PollResult<PollRow> {
    let (month, date_s, sample_field, harris_s, trump_s) = match fields {
        [month, date, sample, harris, trump] => (*month, *date, *sample, *harris, *trump),
        _ => {
            return WrongFieldCountSnafu {
                lineno,
                line: line_text(fields),
                found: fields.len(),
            }
            .fail()
        }
    };

    let date = date_s.parse::<u32>().context(ParsingIntegerSnafu {
        lineno,
        line: line_text(fields),
        field: "date",
        value: date_s,
    })?;

    // The sample field looks like "1880 LV": the size comes first and the type last.
    let mut tokens = sample_field.split_whitespace();
    let size_s = tokens.next().context(MissingSampleSizeSnafu {
        lineno,
        line: line_text(fields),
    })?;
    let sample_type = tokens.last().unwrap_or(size_s);
    let sample_size = size_s.parse::<u32>().context(ParsingIntegerSnafu {
        lineno,
        line: line_text(fields),
        field: "sample size",
        value: size_s,
    })?;

    let harris_result = parse_result(harris_s, "Harris result", fields, lineno)?;
    let trump_result = parse_result(trump_s, "Trump result", fields, lineno)?;

    Ok(PollRow {
        month: month.to_string(),
        date,
        sample_size,
        sample_type: sample_type.to_string(),
        harris_result,
        trump_result,
    })
}

fn parse_result(value: &str, field: &'static str, fields: &[&str], lineno: u64) -> PollResult<f64> {
    let x = value.parse::<f64>().context(ParsingFloatSnafu {
        lineno,
        line: line_text(fields),
        field,
        value,
    })?;
    ensure!(
        x.is_finite() && (0.0..=1.0).contains(&x),
        ResultOutOfRangeSnafu {
            lineno,
            line: line_text(fields),
            field,
            value: x,
        }
    );
    Ok(x)
}

fn max_result(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

// Callers make sure that the slice is not empty.
fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Finds the candidate with the single highest polling result.
///
/// Fails with `EmptyData` if the table has no polls.
pub fn highest_polling_candidate(table: &PollTable) -> PollResult<Leader> {
    let h_max = max_result(table.harris_results()).context(EmptyDataSnafu {})?;
    let t_max = max_result(table.trump_results()).context(EmptyDataSnafu {})?;
    let leader = if h_max > t_max {
        Leader::Harris(h_max)
    } else if t_max > h_max {
        Leader::Trump(t_max)
    } else {
        Leader::Even(h_max)
    };
    info!("highest_polling_candidate: {}", leader);
    Ok(leader)
}

/// The average results among the polls of likely voters.
///
/// Both averages are 0 when no poll has the likely voter tag.
pub fn likely_voter_average(table: &PollTable, rules: &PollRules) -> CandidatePair {
    let (harris, trump): (Vec<f64>, Vec<f64>) = table
        .sample_types()
        .iter()
        .enumerate()
        .filter(|(_, st)| **st == rules.likely_voter_tag)
        .map(|(idx, _)| (table.harris_results()[idx], table.trump_results()[idx]))
        .unzip();
    if harris.is_empty() {
        warn!(
            "likely_voter_average: no poll with sample type {:?}",
            rules.likely_voter_tag
        );
        return CandidatePair::default();
    }
    let res = CandidatePair {
        harris: mean(&harris),
        trump: mean(&trump),
    };
    info!(
        "likely_voter_average: {} polls: {:?}",
        harris.len(),
        res
    );
    res
}

/// The change of the average results between the most recent polls and the earliest polls.
///
/// The table is expected in reverse-chronological order. Both windows hold
/// `rules.history_window` polls when the table has at least twice as many rows, and half the
/// table (rounded down) otherwise. With an odd number of rows, the middle row is then left out.
///
/// Fails with `InsufficientData` when the windows would be empty (fewer than 2 rows).
pub fn polling_history_change(table: &PollTable, rules: &PollRules) -> PollResult<CandidatePair> {
    let n = table.len();
    let size = if n / 2 >= rules.history_window {
        rules.history_window
    } else {
        n / 2
    };
    ensure!(size > 0, InsufficientDataSnafu { rows: n });
    debug!(
        "polling_history_change: {} rows, latest: 0..{}, earliest: {}..{}",
        n,
        size,
        n - size,
        n
    );

    let h = table.harris_results();
    let t = table.trump_results();
    let res = CandidatePair {
        harris: mean(&h[..size]) - mean(&h[n - size..]),
        trump: mean(&t[..size]) - mean(&t[n - size..]),
    };
    info!("polling_history_change: {:?}", res);
    Ok(res)
}
