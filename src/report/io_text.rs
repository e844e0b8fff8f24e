// Human-readable rendering of a report.

use crate::report::PollReport;

/// A fraction as a percentage with 2 decimals: 0.4934 -> "49.34%".
pub fn format_percent(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

/// Same as `format_percent`, always with a sign: 0.0153 -> "+1.53%".
pub fn format_change(x: f64) -> String {
    format!("{:+.2}%", x * 100.0)
}

pub fn format_report(report: &PollReport) -> String {
    let lines = vec![
        format!("Highest Polling Candidate: {}", report.highest),
        "Likely Voter Polling Average:".to_string(),
        format!("  Harris: {}", format_percent(report.likely_voter_average.harris)),
        format!("  Trump: {}", format_percent(report.likely_voter_average.trump)),
        "Polling History Change:".to_string(),
        format!("  Harris: {}", format_change(report.history_change.harris)),
        format!("  Trump: {}", format_change(report.history_change.trump)),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use poll_stats::{CandidatePair, Leader};

    #[test]
    fn percentages() {
        assert_eq!(format_percent(0.4934000000000001), "49.34%");
        assert_eq!(format_percent(0.0), "0.00%");
        assert_eq!(format_change(0.015333333333333254), "+1.53%");
        assert_eq!(format_change(-0.0207), "-2.07%");
        assert_eq!(format_change(0.0), "+0.00%");
    }

    #[test]
    fn report_lines() {
        let report = PollReport {
            polls: 90,
            likely_voter_polls: 50,
            highest: Leader::Harris(0.57),
            likely_voter_average: CandidatePair {
                harris: 0.4934000000000001,
                trump: 0.4604,
            },
            history_change: CandidatePair {
                harris: 0.015333333333333254,
                trump: -0.020666666666666444,
            },
        };
        assert_eq!(
            format_report(&report),
            "Highest Polling Candidate: Harris 57.0%\n\
             Likely Voter Polling Average:\n  \
             Harris: 49.34%\n  \
             Trump: 46.04%\n\
             Polling History Change:\n  \
             Harris: +1.53%\n  \
             Trump: -2.07%"
        );
    }
}
