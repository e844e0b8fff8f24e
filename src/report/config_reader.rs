use crate::report::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: String,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ReportRules {
    #[serde(rename = "likelyVoterTag")]
    pub likely_voter_tag: Option<String>,
    // Either a number or a string holding a number.
    #[serde(rename = "historyWindow")]
    pub history_window: Option<JSValue>,
}

impl ReportRules {
    pub fn poll_rules(&self) -> ReportResult<PollRules> {
        let defaults = PollRules::default();
        let history_window = match &self.history_window {
            Some(js) => read_js_int(js, "historyWindow")?,
            None => defaults.history_window,
        };
        ensure!(history_window > 0, ZeroHistoryWindowSnafu {});
        Ok(PollRules {
            likely_voter_tag: self
                .likely_voter_tag
                .clone()
                .unwrap_or(defaults.likely_voter_tag),
            history_window,
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "pollSource")]
    pub poll_source: PollSource,
    pub rules: Option<ReportRules>,
}

pub fn read_config(path: &str) -> ReportResult<PollConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: PollConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    info!("config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> ReportResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

fn read_js_int(x: &JSValue, key: &'static str) -> ReportResult<usize> {
    let res = match x {
        JSValue::Number(n) => n.as_u64().map(|x| x as usize),
        JSValue::String(s) => s.trim().parse::<usize>().ok(),
        _ => None,
    };
    res.context(ParsingJsonNumberSnafu {
        key,
        value: x.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_rules(s: &str) -> ReportResult<PollRules> {
        let rules: ReportRules = serde_json::from_str(s).unwrap();
        rules.poll_rules()
    }

    #[test]
    fn rules_defaults() {
        assert_eq!(parse_rules("{}").unwrap(), PollRules::default());
    }

    #[test]
    fn rules_window_as_number_or_string() {
        let r = parse_rules(r#"{"historyWindow": 10, "likelyVoterTag": "RV"}"#).unwrap();
        assert_eq!(r.history_window, 10);
        assert_eq!(r.likely_voter_tag, "RV");
        let r = parse_rules(r#"{"historyWindow": "12"}"#).unwrap();
        assert_eq!(r.history_window, 12);
        assert_eq!(r.likely_voter_tag, "LV");
    }

    #[test]
    fn rules_bad_window() {
        assert!(matches!(
            parse_rules(r#"{"historyWindow": 0}"#),
            Err(ReportError::ZeroHistoryWindow {})
        ));
        assert!(matches!(
            parse_rules(r#"{"historyWindow": -3}"#),
            Err(ReportError::ParsingJsonNumber {
                key: "historyWindow",
                ..
            })
        ));
        assert!(matches!(
            parse_rules(r#"{"historyWindow": "thirty"}"#),
            Err(ReportError::ParsingJsonNumber { .. })
        ));
    }

    #[test]
    fn config_without_rules() {
        let config: PollConfig = serde_json::from_str(
            r#"{
                "outputSettings": {"contestName": "test"},
                "pollSource": {"filePath": "polls.csv"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.rules, None);
        assert_eq!(config.output_settings.output_file, None);
        assert_eq!(config.poll_source.file_path, "polls.csv");
    }

    #[test]
    fn config_missing_file() {
        assert!(matches!(
            read_config("/this/file/does/not/exist.json"),
            Err(ReportError::OpeningJson { .. })
        ));
    }
}
