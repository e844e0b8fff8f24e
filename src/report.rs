use log::{debug, info, warn};

use poll_stats::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::report::config_reader::*;
use crate::report::io_text::*;

pub mod config_reader;
pub mod io_text;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReportError {
    #[snafu(display("Error reading polls: {source}"))]
    ReadingPolls { source: PollError },
    #[snafu(display("Error computing the {statistic}: {source}"))]
    Computing {
        source: PollError,
        statistic: &'static str,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON file {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the summary: {source}"))]
    SerializingJson { source: serde_json::Error },
    #[snafu(display("Expected a number for {key}, got {value}"))]
    ParsingJsonNumber { key: &'static str, value: String },
    #[snafu(display("historyWindow must be at least 1"))]
    ZeroHistoryWindow {},
    #[snafu(display("Could not find the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("No poll file given: use --input or --config"))]
    MissingInput {},
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary {path}"))]
    ReferenceMismatch { path: String },
}

pub type ReportResult<T> = Result<T, ReportError>;

/// Where the polls come from and what to do with the results, once the command line and the
/// configuration file have been merged.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ReportSettings {
    pub contest: String,
    /// The poll file as written by the user.
    pub source: String,
    /// The poll file, resolved against the directory of the configuration file.
    pub source_path: PathBuf,
    pub out: Option<String>,
    pub rules: PollRules,
}

/// The three statistics, along with the counts they were computed from.
#[derive(PartialEq, Debug, Clone)]
pub struct PollReport {
    pub polls: usize,
    pub likely_voter_polls: usize,
    pub highest: Leader,
    pub likely_voter_average: CandidatePair,
    pub history_change: CandidatePair,
}

fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn resolve_settings(args: &Args) -> ReportResult<ReportSettings> {
    let config = match args.config.as_deref() {
        Some(config_path) => Some((config_path, read_config(config_path)?)),
        None => None,
    };
    debug!("resolve_settings: config: {:?}", config);

    let (source, source_path) = match (args.input.as_deref(), config.as_ref()) {
        (Some(input), _) => (input.to_string(), PathBuf::from(input)),
        (None, Some((config_path, config))) => {
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?;
            let file_path = config.poll_source.file_path.clone();
            let p = root_p.join(&file_path);
            (file_path, p)
        }
        (None, None) => return MissingInputSnafu {}.fail(),
    };

    let mut rules = match config.as_ref().and_then(|(_, c)| c.rules.as_ref()) {
        Some(r) => r.poll_rules()?,
        None => PollRules::default(),
    };
    if let Some(tag) = args.likely_voter_tag.clone() {
        rules.likely_voter_tag = tag;
    }

    let contest = match config.as_ref() {
        Some((_, c)) => c.output_settings.contest_name.clone(),
        None => simplify_file_name(&source),
    };
    let out = args.out.clone().or_else(|| {
        config
            .as_ref()
            .and_then(|(_, c)| c.output_settings.output_file.clone())
    });

    Ok(ReportSettings {
        contest,
        source,
        source_path,
        out,
        rules,
    })
}

pub fn compute_report(table: &PollTable, rules: &PollRules) -> ReportResult<PollReport> {
    let highest = highest_polling_candidate(table).context(ComputingSnafu {
        statistic: "highest polling candidate",
    })?;
    let likely_voter_average = likely_voter_average(table, rules);
    let history_change = polling_history_change(table, rules).context(ComputingSnafu {
        statistic: "polling history change",
    })?;
    Ok(PollReport {
        polls: table.len(),
        likely_voter_polls: table.count_sample_type(&rules.likely_voter_tag),
        highest,
        likely_voter_average,
        history_change,
    })
}

fn pair_to_json(pair: &CandidatePair, fmt: fn(f64) -> String) -> JSValue {
    json!({
        "harris": fmt(pair.harris),
        "trump": fmt(pair.trump),
    })
}

pub fn build_summary_js(settings: &ReportSettings, report: &PollReport) -> JSValue {
    json!({
        "config": {
            "contest": settings.contest,
            "source": settings.source,
            "likelyVoterTag": settings.rules.likely_voter_tag,
            "historyWindow": settings.rules.history_window.to_string(),
        },
        "results": {
            "polls": report.polls.to_string(),
            "likelyVoterPolls": report.likely_voter_polls.to_string(),
            "highestPollingCandidate": report.highest.to_string(),
            "likelyVoterAverage": pair_to_json(&report.likely_voter_average, format_percent),
            "pollingHistoryChange": pair_to_json(&report.history_change, format_change),
        }
    })
}

fn write_summary(out: &str, pretty_js: &str) -> ReportResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })?;
    }
    Ok(())
}

fn check_reference(summary_p: &str, pretty_js_stats: &str) -> ReportResult<()> {
    let summary_ref = read_summary(summary_p)?;
    info!("summary: {:?}", summary_ref);
    let pretty_js_summary_ref =
        serde_json::to_string_pretty(&summary_ref).context(SerializingJsonSnafu {})?;
    if pretty_js_summary_ref != pretty_js_stats {
        warn!("Found differences with the reference string");
        print_diff(pretty_js_summary_ref.as_str(), pretty_js_stats, "\n");
        return ReferenceMismatchSnafu { path: summary_p }.fail();
    }
    Ok(())
}

/// Reads the polls, prints the statistics and writes or checks the summary.
pub fn run(args: &Args) -> ReportResult<()> {
    let settings = resolve_settings(args)?;
    info!("settings: {:?}", settings);

    let table = PollTable::load(&settings.source_path).context(ReadingPollsSnafu {})?;
    let report = compute_report(&table, &settings.rules)?;
    info!("report: {:?}", report);
    println!("{}", format_report(&report));

    let result_js = build_summary_js(&settings, &report);
    let pretty_js_stats =
        serde_json::to_string_pretty(&result_js).context(SerializingJsonSnafu {})?;

    if let Some(out) = settings.out.as_deref() {
        write_summary(out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = args.reference.as_deref() {
        check_reference(summary_p, &pretty_js_stats)?;
    }

    Ok(())
}

#[cfg(test)]
fn test_dir() -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "tests", "data"].iter().collect()
}

#[cfg(test)]
fn run_report_test(config_lpath: &str, summary_lpath: &str) -> ReportResult<()> {
    let dir = test_dir();
    info!("Running test {}", config_lpath);
    let args = Args {
        config: Some(dir.join(config_lpath).display().to_string()),
        reference: Some(dir.join(summary_lpath).display().to_string()),
        ..Args::default()
    };
    run(&args)
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) -> ReportResult<()> {
    run_report_test(
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    )
}
