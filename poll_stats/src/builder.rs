pub use crate::config::*;
use crate::PollTable;

/// A builder for assembling a poll table one row at a time.
///
/// Rows are kept in the order they are added. The loader adds them in file order, which means
/// the most recent poll comes first.
///
/// ```
/// use poll_stats::builder::Builder;
/// use poll_stats::{PollRow, PollError};
///
/// let mut builder = Builder::new();
/// builder.add_row(PollRow {
///     month: "October".to_string(),
///     date: 28,
///     sample_size: 1880,
///     sample_type: "LV".to_string(),
///     harris_result: 0.49,
///     trump_result: 0.46,
/// })?;
/// let table = builder.build()?;
/// assert_eq!(table.len(), 1);
///
/// # Ok::<(), PollError>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    _months: Vec<String>,
    _dates: Vec<u32>,
    _sample_sizes: Vec<u32>,
    _sample_types: Vec<String>,
    _harris_results: Vec<f64>,
    _trump_results: Vec<f64>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Adds a poll at the end of the table.
    pub fn add_row(&mut self, row: PollRow) -> PollResult<()> {
        self._months.push(row.month);
        self._dates.push(row.date);
        self._sample_sizes.push(row.sample_size);
        self._sample_types.push(row.sample_type);
        self._harris_results.push(row.harris_result);
        self._trump_results.push(row.trump_result);
        Ok(())
    }

    /// Adds a poll with only the two results filled in. The other fields get placeholder
    /// values, which is enough for the aggregations.
    pub fn add_results(&mut self, sample_type: &str, harris: f64, trump: f64) -> PollResult<()> {
        self.add_row(PollRow {
            month: "".to_string(),
            date: 0,
            sample_size: 0,
            sample_type: sample_type.to_string(),
            harris_result: harris,
            trump_result: trump,
        })
    }

    pub fn len(&self) -> usize {
        self._months.len()
    }

    pub fn is_empty(&self) -> bool {
        self._months.is_empty()
    }

    pub fn build(self) -> PollResult<PollTable> {
        PollTable::from_columns(
            self._months,
            self._dates,
            self._sample_sizes,
            self._sample_types,
            self._harris_results,
            self._trump_results,
        )
    }
}
