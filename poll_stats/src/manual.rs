/*!

This is the long-form manual for `poll_stats` and `pollreader`.

## Input format

Polls are read from a comma separated text file, one poll per line, most recent poll first:

```text
month,date,sample,Harris result,Trump result
October,28,1880 LV,0.49,0.46
October,27,2027 A,0.50,0.44
```

* The first line is a header. Its content is ignored, even when it is blank.
* Blank lines are ignored.
* Every field is trimmed of surrounding whitespace. Quotes have no special meaning, so a field
  cannot contain a comma.
* The `sample` field holds the size of the sample and its type, separated by whitespace. Only
  the first token (the size) and the last token (the type) are used: `900 likely LV` has a size of
  900 and a type of `LV`. Common types are `LV` (likely voters), `RV` (registered voters) and `A`
  (adults).
* The results are fractions between 0 and 1: `0.49` is 49%.

Any other line stops the reading with an error that names the line number and the line.

## Statistics

### Highest polling candidate

The highest result of each candidate, taken over all the polls. The candidate with the larger
maximum is reported with that maximum, for example `Harris 57.0%`. When both maxima are equal,
the result is `EVEN` followed by the shared maximum.

### Likely voter polling average

The average result of each candidate over the polls whose sample type is exactly `LV`. Both
averages are 0 when there is no such poll.

### Polling history change

The average of the 30 most recent polls minus the average of the 30 earliest polls, for each
candidate. When there are fewer than 60 polls, the two windows hold half of the polls (rounded
down) each. At least 2 polls are required.

## Command line

```bash
pollreader -i polling_data.csv
```

```text
Highest Polling Candidate: Harris 57.0%
Likely Voter Polling Average:
  Harris: 49.34%
  Trump: 46.04%
Polling History Change:
  Harris: +1.53%
  Trump: +2.07%
```

The options are:

* `--input` the poll file
* `--config` a configuration file in JSON (see below). Either `--input` or `--config` is required.
* `--out` writes a summary in JSON to this file, or to the standard output with `stdout`
* `--reference` compares the summary with a reference summary in JSON, and fails if they differ
* `--likely-voter-tag` the sample type used for the likely voter average (default `LV`)
* `--verbose` turns on the debug logs. The logs can otherwise be controlled with `RUST_LOG`.

## Configuration

```json
{
  "outputSettings": {
    "contestName": "2024 presidential election",
    "outputFile": "summary.json"
  },
  "pollSource": { "filePath": "polling_data.csv" },
  "rules": { "likelyVoterTag": "LV", "historyWindow": 30 }
}
```

The path of the poll file is relative to the directory of the configuration file. The `rules`
section and the `outputFile` entry are optional. Options passed on the command line take
precedence over the configuration file.

*/
