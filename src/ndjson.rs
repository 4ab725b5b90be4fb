//! Converts the head of a CSV file to newline-delimited JSON.

use std::{
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
    sync::Arc,
};

use anyhow::{Context, Result};
use arrow::{
    csv::{reader::Format, ReaderBuilder},
    json::{writer::LineDelimited, WriterBuilder},
};
use regex::Regex;

/// Cell values read as missing, the same set pandas treats as NA by default.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn null_regex() -> Result<Regex> {
    let alternatives: Vec<String> = NULL_TOKENS.iter().map(|t| regex::escape(t)).collect();

    Ok(Regex::new(&format!("^(?:{})$", alternatives.join("|")))?)
}

/// Writes the first `limit` records of `csv_path` to `json_path`, one object per line.
///
/// Keys follow the CSV column order and missing cells are written as `null`.
/// Column types are inferred from the kept records only, so an integer column
/// whose first missing cell lies past `limit` stays integer (`5`, not `5.0`).
/// Returns the number of records written.
pub fn csv_head_to_ndjson(csv_path: &Path, json_path: &Path, limit: usize) -> Result<usize> {
    let format = Format::default()
        .with_header(true)
        .with_null_regex(null_regex()?);

    let mut file = File::open(csv_path).with_context(|| format!("opening {}", csv_path.display()))?;
    let (schema, _) = format
        .infer_schema(&mut file, Some(limit))
        .with_context(|| format!("inferring schema of {}", csv_path.display()))?;
    file.rewind()?;

    // One batch holds exactly the kept records, so rows past the limit are never parsed
    let mut reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .with_batch_size(limit.max(1))
        .build(file)?;

    let out = BufWriter::new(
        File::create(json_path).with_context(|| format!("creating {}", json_path.display()))?,
    );
    let mut writer = WriterBuilder::new()
        .with_explicit_nulls(true)
        .build::<_, LineDelimited>(out);

    let mut written = 0;
    while written < limit {
        let Some(batch) = reader.next() else {
            break;
        };
        let batch = batch.with_context(|| format!("reading {}", csv_path.display()))?;
        let take = (limit - written).min(batch.num_rows());
        writer.write(&batch.slice(0, take))?;
        written += take;
    }

    writer.finish()?;
    writer.into_inner().flush()?;

    Ok(written)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn should_keep_only_first_records_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let csv = temp_dir.path().join("1990.csv");
        let json = temp_dir.path().join("1990.json");
        let mut body = String::from("Row,Origin\n");
        for i in 0..25 {
            body.push_str(&format!("{},EWR\n", i));
        }
        fs::write(&csv, body).unwrap();

        let written = csv_head_to_ndjson(&csv, &json, 10).unwrap();

        let lines = lines(&json);
        assert_eq!(written, 10);
        assert_eq!(lines.len(), 10);
        for (i, line) in lines.iter().enumerate() {
            let v: Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["Row"], Value::from(i as i64));
            assert_eq!(v["Origin"], Value::from("EWR"));
        }
    }

    #[test]
    fn should_keep_column_order() {
        let temp_dir = TempDir::new().unwrap();
        let csv = temp_dir.path().join("f.csv");
        let json = temp_dir.path().join("f.json");
        fs::write(&csv, "Year,Month,DayofMonth,Dest\n1990,1,3,LAX\n").unwrap();

        csv_head_to_ndjson(&csv, &json, 10).unwrap();

        assert_eq!(
            lines(&json),
            vec![r#"{"Year":1990,"Month":1,"DayofMonth":3,"Dest":"LAX"}"#.to_string()]
        );
    }

    #[test]
    fn should_write_missing_cells_as_null() {
        let temp_dir = TempDir::new().unwrap();
        let csv = temp_dir.path().join("f.csv");
        let json = temp_dir.path().join("f.json");
        fs::write(&csv, "DepDelay,TailNum\n5,N1\nNA,\n").unwrap();

        csv_head_to_ndjson(&csv, &json, 10).unwrap();

        let lines = lines(&json);
        let second: Value = serde_json::from_str(&lines[1]).unwrap();
        assert_eq!(second["DepDelay"], Value::Null);
        assert_eq!(second["TailNum"], Value::Null);
        let first: Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["DepDelay"], Value::from(5));
    }

    #[test]
    fn should_treat_every_na_token_as_null() {
        let temp_dir = TempDir::new().unwrap();
        let csv = temp_dir.path().join("f.csv");
        let json = temp_dir.path().join("f.json");
        let mut body = String::from("TailNum\n");
        for token in NULL_TOKENS.iter().filter(|t| !t.is_empty()) {
            body.push_str(token);
            body.push('\n');
        }
        body.push_str("N123\n");
        fs::write(&csv, body).unwrap();

        csv_head_to_ndjson(&csv, &json, 100).unwrap();

        let lines = lines(&json);
        assert_eq!(lines.len(), NULL_TOKENS.len());
        for line in &lines[..lines.len() - 1] {
            let v: Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["TailNum"], Value::Null, "{}", line);
        }
        let last: Value = serde_json::from_str(lines.last().unwrap()).unwrap();
        assert_eq!(last["TailNum"], Value::from("N123"));
    }

    #[test]
    fn should_not_match_tokens_partially() {
        let re = null_regex().unwrap();

        assert!(re.is_match("NA"));
        assert!(re.is_match("1.#IND"));
        assert!(!re.is_match("NAN"));
        assert!(!re.is_match("1x#IND"));
        assert!(!re.is_match("NAS"));
    }

    #[test]
    fn should_infer_types_from_kept_records_only() {
        let temp_dir = TempDir::new().unwrap();
        let csv = temp_dir.path().join("f.csv");
        let json = temp_dir.path().join("f.json");
        fs::write(&csv, "DepDelay\n5\n7\nNA\n2.5\n").unwrap();

        csv_head_to_ndjson(&csv, &json, 2).unwrap();

        assert_eq!(lines(&json), vec![r#"{"DepDelay":5}"#, r#"{"DepDelay":7}"#]);
    }

    #[test]
    fn should_ignore_unparsable_rows_past_limit() {
        let temp_dir = TempDir::new().unwrap();
        let csv = temp_dir.path().join("f.csv");
        let json = temp_dir.path().join("f.json");
        fs::write(&csv, "Delay\n1\n2\nnot-a-number\n").unwrap();

        assert_eq!(csv_head_to_ndjson(&csv, &json, 2).unwrap(), 2);
    }
}
