//! Max-perimeter selection over a batch of candidates.
//!
//! Model
//! - Candidates are validated one at a time in input order; a rejection is
//!   recorded and the fold continues.
//! - The winner is the first accepted quadrilateral with the strictly largest
//!   perimeter. Exact ties keep the earlier one.
//! - "No candidates" and "all rejected" are different outcomes (`Summary`).

use nalgebra::Vector2;

use crate::quad::{ConvexQuad, QuadCfg, QuadError};

/// First quadrilateral with the maximum perimeter, with its index in `quads`.
pub fn max_perimeter(quads: &[ConvexQuad]) -> Option<(usize, &ConvexQuad)> {
    let mut best: Option<(usize, &ConvexQuad)> = None;
    for (i, q) in quads.iter().enumerate() {
        match best {
            Some((_, b)) if q.perimeter() <= b.perimeter() => {}
            _ => best = Some((i, q)),
        }
    }
    best
}

/// End state of a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Summary {
    /// No candidates were pushed.
    Empty,
    /// Candidates were pushed but all were rejected.
    NoneAccepted { rejected: usize },
    /// `candidate` is the input position, `accepted_index` the position in
    /// `Selection::accepted`.
    Winner {
        candidate: usize,
        accepted_index: usize,
        perimeter: f64,
    },
}

/// Left-to-right fold over candidates, keeping accepted quads and outcomes.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    cfg: QuadCfg,
    accepted: Vec<ConvexQuad>,
    /// Per candidate: index into `accepted`, or the rejection.
    outcomes: Vec<Result<usize, QuadError>>,
    /// `(candidate, accepted_index)` of the running maximum.
    best: Option<(usize, usize)>,
}

impl Selection {
    pub fn new(cfg: QuadCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    pub fn from_candidates<I, C>(cfg: QuadCfg, candidates: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[Vector2<f64>]>,
    {
        let mut sel = Self::new(cfg);
        for c in candidates {
            // Outcome is kept in `outcomes`.
            let _ = sel.push(c.as_ref());
        }
        sel
    }

    /// Validate one candidate and fold it into the running maximum.
    pub fn push(&mut self, points: &[Vector2<f64>]) -> Result<&ConvexQuad, QuadError> {
        match ConvexQuad::from_points_with_cfg(points, self.cfg) {
            Ok(q) => Ok(self.push_quad(q)),
            Err(e) => {
                self.outcomes.push(Err(e));
                Err(e)
            }
        }
    }

    /// Record an already validated quadrilateral as the next candidate.
    pub fn push_quad(&mut self, quad: ConvexQuad) -> &ConvexQuad {
        let candidate = self.outcomes.len();
        let idx = self.accepted.len();
        let improves = match self.best {
            Some((_, b)) => quad.perimeter() > self.accepted[b].perimeter(),
            None => true,
        };
        if improves {
            self.best = Some((candidate, idx));
        }
        self.accepted.push(quad);
        self.outcomes.push(Ok(idx));
        &self.accepted[idx]
    }

    pub fn cfg(&self) -> QuadCfg {
        self.cfg
    }

    pub fn accepted(&self) -> &[ConvexQuad] {
        &self.accepted
    }

    pub fn outcomes(&self) -> &[Result<usize, QuadError>] {
        &self.outcomes
    }

    pub fn candidates(&self) -> usize {
        self.outcomes.len()
    }

    pub fn rejected(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_err()).count()
    }

    /// Winning quadrilateral and its candidate index.
    pub fn winner(&self) -> Option<(usize, &ConvexQuad)> {
        self.best.map(|(c, a)| (c, &self.accepted[a]))
    }

    pub fn summary(&self) -> Summary {
        match self.best {
            Some((candidate, accepted_index)) => Summary::Winner {
                candidate,
                accepted_index,
                perimeter: self.accepted[accepted_index].perimeter(),
            },
            None if self.outcomes.is_empty() => Summary::Empty,
            None => Summary::NoneAccepted {
                rejected: self.rejected(),
            },
        }
    }
}
