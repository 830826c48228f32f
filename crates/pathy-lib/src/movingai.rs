//! Readers for the MovingAI benchmark formats.
//!
//! Map files (`*.map`):
//!
//! ```text
//! type octile
//! height 4
//! width 6
//! map
//! ......
//! .@@...
//! ......
//! ......
//! ```
//!
//! Scenario files (`*.map.scen`) start with `version 1` followed by one
//! problem per line: bucket, map name, map width, map height, start x,
//! start y, goal x, goal y and the optimal length.
//!
//! See <https://movingai.com/benchmarks/formats.html>.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::{Grid, Node};

/// Load and parse a MovingAI map file.
pub fn load_map(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path)?;
    let grid = parse_map(&text)?;
    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        blocked = grid.blocked_count(),
        "loaded map"
    );
    Ok(grid)
}

/// Parse the contents of a MovingAI map file.
pub fn parse_map(text: &str) -> Result<Grid> {
    let mut lines = text.lines().map(|line| line.trim_end_matches('\r')).enumerate();
    let mut header = |expected: &str| -> Result<(usize, String)> {
        match lines.next() {
            Some((idx, line)) => Ok((idx + 1, line.trim().to_string())),
            None => Err(map_error(0, format!("missing \"{expected}\" header line"))),
        }
    };

    let (line_no, line) = header("type")?;
    if line != "type octile" {
        return Err(map_error(line_no, format!("expected \"type octile\", found \"{line}\"")));
    }
    let (line_no, line) = header("height")?;
    let height = header_value(&line, "height").ok_or_else(|| {
        map_error(line_no, format!("expected \"height <rows>\", found \"{line}\""))
    })?;
    let (line_no, line) = header("width")?;
    let width = header_value(&line, "width").ok_or_else(|| {
        map_error(line_no, format!("expected \"width <columns>\", found \"{line}\""))
    })?;
    let (line_no, line) = header("map")?;
    if line != "map" {
        return Err(map_error(line_no, format!("expected \"map\", found \"{line}\"")));
    }

    // Header values are untrusted; rows are only allocated as they are read.
    let mut rows = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if rows.len() == height {
            return Err(map_error(line_no, format!("more than the declared {height} rows")));
        }
        let row = line
            .chars()
            .map(|c| cell_blocked(c).ok_or_else(|| map_error(line_no, format!("unknown terrain '{c}'"))))
            .collect::<Result<Vec<_>>>()?;
        if row.len() != width {
            return Err(map_error(
                line_no,
                format!("row has {} cells, expected {width}", row.len()),
            ));
        }
        rows.push(row);
    }
    if rows.len() != height {
        return Err(map_error(
            0,
            format!("found {} rows, expected {height}", rows.len()),
        ));
    }

    if rows.is_empty() {
        return Ok(Grid::new(width, 0));
    }
    Grid::from_rows(rows)
}

fn header_value(line: &str, key: &str) -> Option<usize> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(k), Some(value), None) if k == key => value.parse().ok(),
        _ => None,
    }
}

fn cell_blocked(c: char) -> Option<bool> {
    match c {
        '.' | 'G' | 'S' => Some(false),
        '@' | 'O' | 'T' | 'W' => Some(true),
        _ => None,
    }
}

fn map_error(line: usize, message: String) -> Error {
    Error::MapParse { line, message }
}

/// A single benchmark problem from a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub bucket: u32,
    /// Map file name, relative to the scenario file's directory.
    pub map_name: String,
    pub map_width: usize,
    pub map_height: usize,
    pub start: Node,
    pub goal: Node,
    pub optimal_length: f64,
}

impl Scenario {
    /// Location of this scenario's map, resolved next to `scenario_file`.
    pub fn map_path(&self, scenario_file: &Path) -> PathBuf {
        scenario_file
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(&self.map_name)
    }
}

/// Load and parse a MovingAI scenario file.
pub fn load_scenarios(path: &Path) -> Result<Vec<Scenario>> {
    let text = fs::read_to_string(path)?;
    let scenarios = parse_scenarios(&text)?;
    debug!(path = %path.display(), count = scenarios.len(), "loaded scenarios");
    Ok(scenarios)
}

/// Parse the contents of a MovingAI scenario file.
///
/// Fails with [`Error::EmptyScenarioFile`] if the file holds no problems.
pub fn parse_scenarios(text: &str) -> Result<Vec<Scenario>> {
    let mut lines = text.lines().map(|line| line.trim_end_matches('\r'));
    let version = lines.next().map(str::trim).unwrap_or_default();
    if version != "version 1" && version != "version 1.0" {
        return Err(Error::ScenarioParse {
            line: 1,
            message: format!("expected \"version 1\", found \"{version}\""),
        });
    }

    let mut scenarios = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        if line.trim().is_empty() {
            continue;
        }
        scenarios.push(parse_scenario_line(line, line_no)?);
    }

    if scenarios.is_empty() {
        return Err(Error::EmptyScenarioFile);
    }
    Ok(scenarios)
}

fn parse_scenario_line(line: &str, line_no: usize) -> Result<Scenario> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 9 {
        return Err(Error::ScenarioParse {
            line: line_no,
            message: format!("expected 9 fields, found {}", fields.len()),
        });
    }

    fn field<T: FromStr>(fields: &[&str], idx: usize, what: &str, line_no: usize) -> Result<T> {
        fields[idx].parse().map_err(|_| Error::ScenarioParse {
            line: line_no,
            message: format!("invalid {what} \"{}\"", fields[idx]),
        })
    }

    Ok(Scenario {
        bucket: field(&fields, 0, "bucket", line_no)?,
        map_name: fields[1].to_string(),
        map_width: field(&fields, 2, "map width", line_no)?,
        map_height: field(&fields, 3, "map height", line_no)?,
        start: Node::new(
            field(&fields, 4, "start x-coordinate", line_no)?,
            field(&fields, 5, "start y-coordinate", line_no)?,
        ),
        goal: Node::new(
            field(&fields, 6, "goal x-coordinate", line_no)?,
            field(&fields, 7, "goal y-coordinate", line_no)?,
        ),
        optimal_length: field(&fields, 8, "optimal length", line_no)?,
    })
}

/// The one map every scenario refers to.
pub fn shared_map_name(scenarios: &[Scenario]) -> Result<&str> {
    let first = scenarios.first().ok_or(Error::EmptyScenarioFile)?;
    if let Some(other) = scenarios.iter().find(|s| s.map_name != first.map_name) {
        return Err(Error::MixedScenarioMaps {
            first: first.map_name.clone(),
            other: other.map_name.clone(),
        });
    }
    Ok(&first.map_name)
}

/// Pick `count` scenarios spread evenly over `scenarios`, first and last
/// included. Scenario files are ordered by bucket, so this samples the whole
/// range of problem sizes. Returns everything when `count` covers the file.
pub fn select_evenly(scenarios: &[Scenario], count: usize) -> Vec<&Scenario> {
    let len = scenarios.len();
    if count >= len {
        return scenarios.iter().collect();
    }
    match count {
        0 => Vec::new(),
        1 => vec![&scenarios[0]],
        _ => (0..count)
            .map(|k| &scenarios[k * (len - 1) / (count - 1)])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "type octile\nheight 3\nwidth 4\nmap\n....\n.@T.\nGSW.\n";

    #[test]
    fn parses_terrain() {
        let grid = parse_map(MAP).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert!(grid.is_blocked(1, 1));
        assert!(grid.is_blocked(2, 1));
        assert!(grid.is_open(0, 2));
        assert!(grid.is_open(1, 2));
        assert!(grid.is_blocked(2, 2));
        assert_eq!(grid.blocked_count(), 3);
    }

    #[test]
    fn tolerates_crlf_and_trailing_blank_lines() {
        let text = MAP.replace('\n', "\r\n") + "\r\n\r\n";
        assert!(parse_map(&text).is_ok());
    }

    #[test]
    fn rejects_bad_headers() {
        let err = parse_map("type hex\nheight 1\nwidth 1\nmap\n.\n").unwrap_err();
        assert!(matches!(err, Error::MapParse { line: 1, .. }));
        let err = parse_map("type octile\nheight x\nwidth 1\nmap\n.\n").unwrap_err();
        assert!(matches!(err, Error::MapParse { line: 2, .. }));
        let err = parse_map("type octile\nheight 1\n").unwrap_err();
        assert!(matches!(err, Error::MapParse { .. }));
    }

    #[test]
    fn rejects_dimension_mismatches() {
        let err = parse_map("type octile\nheight 2\nwidth 2\nmap\n..\n...\n").unwrap_err();
        assert!(matches!(err, Error::MapParse { line: 6, .. }));
        let err = parse_map("type octile\nheight 2\nwidth 2\nmap\n..\n").unwrap_err();
        assert!(matches!(err, Error::MapParse { .. }));
        let err = parse_map("type octile\nheight 1\nwidth 2\nmap\n..\n..\n").unwrap_err();
        assert!(matches!(err, Error::MapParse { line: 6, .. }));
    }

    #[test]
    fn rejects_unknown_terrain() {
        let err = parse_map("type octile\nheight 1\nwidth 2\nmap\n.x\n").unwrap_err();
        match err {
            Error::MapParse { line, message } => {
                assert_eq!(line, 5);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    const SCEN: &str = "version 1\n\
        0\tarena.map\t49\t49\t1\t11\t1\t12\t1.00000000\n\
        \n\
        3\tarena.map\t49\t49\t4\t30\t13\t33\t10.24264069\n";

    #[test]
    fn parses_scenarios_and_skips_blank_lines() {
        let scenarios = parse_scenarios(SCEN).unwrap();
        assert_eq!(scenarios.len(), 2);
        let last = &scenarios[1];
        assert_eq!(last.bucket, 3);
        assert_eq!(last.map_name, "arena.map");
        assert_eq!((last.map_width, last.map_height), (49, 49));
        assert_eq!(last.start, Node::new(4, 30));
        assert_eq!(last.goal, Node::new(13, 33));
        assert!((last.optimal_length - 10.24264069).abs() < 1e-9);
    }

    #[test]
    fn scenario_errors_carry_line_numbers() {
        let err = parse_scenarios("version 2\n").unwrap_err();
        assert!(matches!(err, Error::ScenarioParse { line: 1, .. }));
        let err = parse_scenarios("version 1.0\n0 a.map 1 1 0 0 1\n").unwrap_err();
        assert!(matches!(err, Error::ScenarioParse { line: 2, .. }));
        let err = parse_scenarios("version 1\n\n0 a.map 1 1 0 zero 1 1 1.0\n").unwrap_err();
        match err {
            Error::ScenarioParse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("start y-coordinate"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            parse_scenarios("version 1\n").unwrap_err(),
            Error::EmptyScenarioFile
        ));
    }

    #[test]
    fn map_path_is_relative_to_scenario_file() {
        let scenario = &parse_scenarios(SCEN).unwrap()[0];
        assert_eq!(
            scenario.map_path(Path::new("bench/dao/arena.map.scen")),
            PathBuf::from("bench/dao/arena.map")
        );
        assert_eq!(
            scenario.map_path(Path::new("arena.map.scen")),
            PathBuf::from("arena.map")
        );
    }

    #[test]
    fn oversized_header_is_a_parse_error() {
        for text in [
            "type octile\nheight 4294967296\nwidth 4294967296\nmap\n",
            "type octile\nheight 18446744073709551615\nwidth 1\nmap\n.\n",
            "type octile\nheight 4294967296\nwidth 2\nmap\n..\n.@\n",
        ] {
            match parse_map(text) {
                Err(Error::MapParse { message, .. }) => {
                    assert!(message.contains("rows, expected"), "{message}");
                }
                other => panic!("expected map parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn shared_map_name_rejects_mixed_files() {
        let mut scenarios = parse_scenarios(SCEN).unwrap();
        assert_eq!(shared_map_name(&scenarios).unwrap(), "arena.map");
        scenarios[1].map_name = "den.map".to_string();
        assert!(matches!(
            shared_map_name(&scenarios).unwrap_err(),
            Error::MixedScenarioMaps { .. }
        ));
    }

    #[test]
    fn even_selection_spans_the_file() {
        let base = parse_scenarios(SCEN).unwrap().remove(0);
        let scenarios: Vec<Scenario> = (0..10)
            .map(|bucket| Scenario {
                bucket,
                ..base.clone()
            })
            .collect();
        let buckets = |picked: Vec<&Scenario>| picked.iter().map(|s| s.bucket).collect::<Vec<_>>();

        assert_eq!(buckets(select_evenly(&scenarios, 1)), vec![0]);
        assert_eq!(buckets(select_evenly(&scenarios, 2)), vec![0, 9]);
        assert_eq!(buckets(select_evenly(&scenarios, 4)), vec![0, 3, 6, 9]);
        assert_eq!(buckets(select_evenly(&scenarios, 50)).len(), 10);
        assert!(select_evenly(&scenarios, 0).is_empty());
    }
}
