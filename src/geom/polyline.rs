// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use super::Vec2;

/// Dot-product threshold used by [`Polyline::simplify`].
///
/// Slightly below 1 so float noise on straight runs still counts as colinear.
pub const COLINEAR_THRESHOLD: f32 = 0.99;

/// An ordered list of points describing consecutive line segments.
///
/// Fewer than two points is a degenerate (zero-length) line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline(Vec<Vec2>);

impl Polyline {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Vec2> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, point: Vec2) {
        self.0.push(point);
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self(self.0.iter().map(|p| *p + offset).collect())
    }

    pub fn scale(&self, factor: f32) -> Self {
        Self(self.0.iter().map(|p| p.mul(factor)).collect())
    }

    /// Euclidean length of all segments.
    pub fn length(&self) -> f32 {
        self.0.windows(2).map(|w| (w[1] - w[0]).length()).sum()
    }

    /// Drops NaN points and consecutive duplicates.
    pub fn fix(&self) -> Self {
        let mut out = Vec::<Vec2>::with_capacity(self.0.len());
        for p in self.0.iter().copied() {
            if p.is_nan() {
                continue;
            }
            if out.last() == Some(&p) {
                continue;
            }
            out.push(p);
        }
        Self(out)
    }

    pub fn simplify(&self) -> Self {
        self.simplify_with(COLINEAR_THRESHOLD)
    }

    /// Removes interior points whose incoming and outgoing directions have a dot
    /// product of at least `threshold`.
    pub fn simplify_with(&self, threshold: f32) -> Self {
        if self.0.len() <= 2 {
            return self.clone();
        }

        let mut out = Vec::with_capacity(self.0.len());
        out.push(self.0[0]);
        for w in self.0.windows(3) {
            let prev_dir = (w[1] - w[0]).normalized();
            let next_dir = (w[2] - w[1]).normalized();
            if prev_dir.dot(next_dir) < threshold {
                out.push(w[1]);
            }
        }
        out.push(self.0[self.0.len() - 1]);
        Self(out)
    }

    /// Splits every segment into `count` equal parts.
    pub fn subdivide(&self, count: usize) -> Self {
        if count <= 1 || self.0.len() < 2 {
            return self.clone();
        }

        let mut out = Vec::with_capacity((self.0.len() - 1) * count + 1);
        for w in self.0.windows(2) {
            for step in 0..count {
                out.push(w[0].lerp(w[1], step as f32 / count as f32));
            }
        }
        out.push(self.0[self.0.len() - 1]);
        Self(out)
    }

    /// Point at `t * length` along the line, `t` clamped to `[0, 1]`.
    ///
    /// Returns `None` for an empty line.
    pub fn interpolate(&self, t: f32) -> Option<Vec2> {
        let (i, j, t) = self.locate(t)?;
        if i == j {
            return Some(self.0[i]);
        }
        Some(self.0[i].lerp(self.0[j], t))
    }

    /// Splits the line at `t * length`.
    ///
    /// Both halves hold at least one point and the last point of the first half
    /// equals the first point of the second.
    pub fn split_at(&self, t: f32) -> Option<(Self, Self)> {
        let (i, j, t) = self.locate(t)?;

        let mut first = self.0[..=i].to_vec();
        let mut second = Vec::with_capacity(self.0.len() - j + 1);
        if i != j {
            let split = self.0[i].lerp(self.0[j], t);
            first.push(split);
            second.push(split);
        }
        second.extend_from_slice(&self.0[j..]);

        Some((Self(first), Self(second)))
    }

    /// Finds the segment `(i, j)` containing `t * length` and the local parameter
    /// along it.
    fn locate(&self, t: f32) -> Option<(usize, usize, f32)> {
        if self.0.is_empty() {
            return None;
        }
        if self.0.len() == 1 || t <= 0.0 {
            return Some((0, 0, 0.0));
        }
        let last = self.0.len() - 1;
        if t >= 1.0 {
            return Some((last, last, 1.0));
        }
        if self.0.len() == 2 {
            return Some((0, 1, t));
        }

        let target = self.length() * t;
        let mut travelled = 0.0f32;
        for i in 0..last {
            let seg_len = (self.0[i + 1] - self.0[i]).length();
            if seg_len == 0.0 {
                continue;
            }
            let next = travelled + seg_len;
            if next == target {
                return Some((i + 1, i + 1, 0.0));
            }
            if next > target {
                return Some((i, i + 1, (target - travelled) / seg_len));
            }
            travelled = next;
        }

        Some((last, last, 1.0))
    }
}

impl Deref for Polyline {
    type Target = [Vec2];

    fn deref(&self) -> &[Vec2] {
        &self.0
    }
}

impl From<Vec<Vec2>> for Polyline {
    fn from(points: Vec<Vec2>) -> Self {
        Self(points)
    }
}

impl FromIterator<Vec2> for Polyline {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
