//! Candidate input: whitespace text (file or stdin) or CSV via Polars.
//!
//! Text format
//! - Optional first data line with a single integer `n` (declared count).
//! - One candidate per line: `ax ay bx by cx cy dx dy`.
//! - Blank lines and lines starting with `#` are skipped.
//!
//! CSV format
//! - Header with columns `ax,ay,bx,by,cx,cy,dx,dy`; extra columns are ignored.
//!
//! Malformed rows are kept (with their line number) so the run can report
//! them; they never abort reading.

use anyhow::{Context, Result};
use polars::prelude::*;
use quadmax::Vec2;
use std::fmt;
use std::io::Read;
use std::path::Path;

pub const CSV_COLUMNS: [&str; 8] = ["ax", "ay", "bx", "by", "cx", "cy", "dx", "dy"];

/// Why an input row could not be turned into 4 points.
#[derive(Clone, Debug, PartialEq)]
pub enum Malformed {
    TokenCount { got: usize },
    NotANumber { token: String },
    NonFinite { token: String },
    MissingValue { column: &'static str },
}

impl fmt::Display for Malformed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenCount { got } => write!(f, "expected 8 numbers, got {got}"),
            Self::NotANumber { token } => write!(f, "not a number: {token:?}"),
            Self::NonFinite { token } => write!(f, "non-finite coordinate: {token:?}"),
            Self::MissingValue { column } => write!(f, "missing or non-numeric value in column {column}"),
        }
    }
}

impl std::error::Error for Malformed {}

/// One input row: 1-based line (text) or data row (CSV) number and its points.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    pub line: usize,
    pub points: Result<[Vec2<f64>; 4], Malformed>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    pub declared: Option<usize>,
    pub rows: Vec<Row>,
}

impl Batch {
    pub fn malformed(&self) -> usize {
        self.rows.iter().filter(|r| r.points.is_err()).count()
    }
}

/// Read `input`: `-` is stdin (text), `*.csv` goes through Polars, anything
/// else is read as text.
pub fn read_batch(input: &str) -> Result<Batch> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(parse_text(&buf));
    }
    let path = Path::new(input);
    let is_csv = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        read_csv(path)
    } else {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Ok(parse_text(&text))
    }
}

pub fn parse_text(text: &str) -> Batch {
    let mut batch = Batch::default();
    let mut seen_data = false;
    for (k, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !seen_data && tokens.len() == 1 {
            if let Ok(n) = tokens[0].parse::<usize>() {
                batch.declared = Some(n);
                seen_data = true;
                continue;
            }
        }
        seen_data = true;
        batch.rows.push(Row {
            line: k + 1,
            points: parse_tokens(&tokens),
        });
    }
    batch
}

fn parse_tokens(tokens: &[&str]) -> Result<[Vec2<f64>; 4], Malformed> {
    if tokens.len() != 8 {
        return Err(Malformed::TokenCount { got: tokens.len() });
    }
    let mut coords = [0.0f64; 8];
    for (slot, tok) in coords.iter_mut().zip(tokens) {
        let v: f64 = tok.parse().map_err(|_| Malformed::NotANumber {
            token: tok.to_string(),
        })?;
        if !v.is_finite() {
            return Err(Malformed::NonFinite {
                token: tok.to_string(),
            });
        }
        *slot = v;
    }
    Ok(points_from_coords(&coords))
}

fn points_from_coords(c: &[f64; 8]) -> [Vec2<f64>; 4] {
    [
        Vec2::new(c[0], c[1]),
        Vec2::new(c[2], c[3]),
        Vec2::new(c[4], c[5]),
        Vec2::new(c[6], c[7]),
    ]
}

pub fn read_csv(path: &Path) -> Result<Batch> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()
        .with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(CSV_COLUMNS.len());
    for name in CSV_COLUMNS {
        let series = df
            .column(name)
            .with_context(|| format!("{}: missing column {name}", path.display()))?
            .cast(&DataType::Float64)?;
        columns.push(series.f64()?.into_iter().collect());
    }

    let mut batch = Batch::default();
    for i in 0..df.height() {
        let mut coords = [0.0f64; 8];
        let mut missing = None;
        for (k, col) in columns.iter().enumerate() {
            match col[i] {
                Some(v) if v.is_finite() => coords[k] = v,
                _ => {
                    missing = Some(CSV_COLUMNS[k]);
                    break;
                }
            }
        }
        let points = match missing {
            Some(column) => Err(Malformed::MissingValue { column }),
            None => Ok(points_from_coords(&coords)),
        };
        batch.rows.push(Row { line: i + 1, points });
    }
    Ok(batch)
}
