/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Run-length encoding of the per-tick occupant sequence.
//!
//! `[A, A, A, B, B, IDLE]` becomes `[0,3) A`, `[3,5) B`, `[5,6) IDLE`.
//! [`expand`] is the exact inverse of [`compress`].

use serde::Serialize;

/// A maximal run of identical occupants over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment<T> {
    pub start: u64,
    /// Exclusive.
    pub end: u64,
    pub occupant: T,
}

impl<T> Segment<T> {
    /// Number of ticks covered.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Replace the occupant, keeping the bounds.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Segment<U> {
        Segment {
            start: self.start,
            end: self.end,
            occupant: f(self.occupant),
        }
    }
}

/// Merge consecutive equal occupants into segments.  Empty input gives an
/// empty list.
pub fn compress<T: PartialEq + Clone>(ticks: &[T]) -> Vec<Segment<T>> {
    let mut segments: Vec<Segment<T>> = Vec::new();

    for (tick, occupant) in ticks.iter().enumerate() {
        let tick = tick as u64;
        match segments.last_mut() {
            Some(last) if last.occupant == *occupant => last.end = tick + 1,
            _ => segments.push(Segment {
                start: tick,
                end: tick + 1,
                occupant: occupant.clone(),
            }),
        }
    }

    segments
}

/// Expand segments back into one occupant per tick.
pub fn expand<T: Clone>(segments: &[Segment<T>]) -> Vec<T> {
    segments
        .iter()
        .flat_map(|s| std::iter::repeat(s.occupant.clone()).take(s.len() as usize))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
