//! Batch evaluation and result rendering.
//!
//! `evaluate` folds the parsed rows through a `quadmax::Selection` in input
//! order; `render` prints the human summary; the same `RunReport` is written
//! as JSON with `--out`.

use quadmax::{ConvexQuad, Orientation, QuadCfg, Selection, Summary};
use serde::Serialize;
use std::io::{self, Write};

use crate::input::Batch;

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Accepted {
        vertices: [[f64; 2]; 4],
        orientation: &'static str,
        perimeter: f64,
    },
    Rejected {
        reason: &'static str,
        message: String,
    },
    Malformed {
        message: String,
    },
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CandidateReport {
    /// Position among all rows, 1-based.
    pub number: usize,
    pub line: usize,
    #[serde(flatten)]
    pub status: Status,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WinnerReport {
    pub number: usize,
    pub line: usize,
    pub vertices: [[f64; 2]; 4],
    /// `ConvexQuad`'s `Display` line, `A(x, y), B(x, y), ...`.
    pub label: String,
    pub perimeter: f64,
}

/// Terminal state of a run.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Input held no rows at all.
    NoCandidates,
    /// Every row failed to parse.
    AllMalformed,
    /// Rows parsed, none formed a valid quadrilateral.
    NoValidQuadrilateral,
    Winner,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RunReport {
    pub eps: f64,
    pub declared: Option<usize>,
    pub accepted: usize,
    pub rejected: usize,
    pub malformed: usize,
    pub outcome: Outcome,
    pub winner: Option<WinnerReport>,
    pub candidates: Vec<CandidateReport>,
}

fn vertex_rows(q: &ConvexQuad) -> [[f64; 2]; 4] {
    q.vertices().map(|v| [v.x, v.y])
}

fn orientation_tag(o: Orientation) -> &'static str {
    match o {
        Orientation::CounterClockwise => "ccw",
        Orientation::Clockwise => "cw",
    }
}

pub fn evaluate(batch: &Batch, cfg: QuadCfg) -> RunReport {
    let mut sel = Selection::new(cfg);
    // Selection candidate index -> position in `candidates`.
    let mut positions: Vec<usize> = Vec::new();
    let mut candidates = Vec::with_capacity(batch.rows.len());
    for (k, row) in batch.rows.iter().enumerate() {
        let status = match &row.points {
            Err(m) => {
                tracing::warn!(line = row.line, reason = %m, "malformed_row");
                Status::Malformed {
                    message: m.to_string(),
                }
            }
            Ok(pts) => {
                positions.push(k);
                match sel.push(pts) {
                    Ok(q) => Status::Accepted {
                        vertices: vertex_rows(q),
                        orientation: orientation_tag(q.orientation()),
                        perimeter: q.perimeter(),
                    },
                    Err(e) => {
                        tracing::debug!(line = row.line, reason = e.kind(), "rejected");
                        Status::Rejected {
                            reason: e.kind(),
                            message: e.to_string(),
                        }
                    }
                }
            }
        };
        candidates.push(CandidateReport {
            number: k + 1,
            line: row.line,
            status,
        });
    }

    let malformed = batch.malformed();
    let (outcome, winner) = match sel.summary() {
        Summary::Winner {
            candidate,
            accepted_index,
            perimeter,
        } => {
            let k = positions[candidate];
            let q = &sel.accepted()[accepted_index];
            let w = WinnerReport {
                number: k + 1,
                line: batch.rows[k].line,
                vertices: vertex_rows(q),
                label: q.to_string(),
                perimeter,
            };
            (Outcome::Winner, Some(w))
        }
        Summary::Empty if malformed > 0 => (Outcome::AllMalformed, None),
        Summary::Empty => (Outcome::NoCandidates, None),
        Summary::NoneAccepted { .. } => (Outcome::NoValidQuadrilateral, None),
    };
    if let Some(declared) = batch.declared {
        if declared != batch.rows.len() {
            tracing::warn!(declared, rows = batch.rows.len(), "declared_count_mismatch");
        }
    }

    RunReport {
        eps: cfg.eps,
        declared: batch.declared,
        accepted: sel.accepted().len(),
        rejected: sel.rejected(),
        malformed,
        outcome,
        winner,
        candidates,
    }
}

/// Human-readable summary: one line per candidate, then the winner.
pub fn render<W: Write>(report: &RunReport, mut w: W) -> io::Result<()> {
    for c in &report.candidates {
        match &c.status {
            Status::Accepted { perimeter, .. } => {
                writeln!(w, "Perimeter of quadrilateral #{} = {:.2}", c.number, perimeter)?
            }
            Status::Rejected { message, .. } => {
                writeln!(w, "Quadrilateral #{} rejected: {}", c.number, message)?
            }
            Status::Malformed { message } => writeln!(
                w,
                "Quadrilateral #{} (line {}) malformed: {}",
                c.number, c.line, message
            )?,
        }
    }
    writeln!(w)?;
    match (&report.outcome, &report.winner) {
        (Outcome::Winner, Some(win)) => {
            writeln!(w, "Quadrilateral with the largest perimeter (#{}):", win.number)?;
            writeln!(w, "{}", win.label)?;
            writeln!(w, "Maximum perimeter = {:.2}", win.perimeter)?;
        }
        (Outcome::AllMalformed, _) => writeln!(w, "No well-formed candidates.")?,
        (Outcome::NoCandidates, _) => writeln!(w, "No candidates.")?,
        _ => writeln!(w, "No valid convex quadrilateral.")?,
    }
    Ok(())
}
