// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geom::{Polyline, Vec2};
use crate::model::ids::LinkId;

/// An integer cell coordinate in the routing grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct GridPos {
    x: i32,
    y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    pub fn min(self, other: Self) -> Self {
        Self { x: self.x.min(other.x), y: self.y.min(other.y) }
    }

    pub fn max(self, other: Self) -> Self {
        Self { x: self.x.max(other.x), y: self.y.max(other.y) }
    }

    /// `max(|dx|, |dy|)`: the number of 8-connected steps between two cells.
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Cell containing a continuous point (nearest integer coordinates).
    pub fn from_vec2(v: Vec2) -> Self {
        Self { x: v.x.round() as i32, y: v.y.round() as i32 }
    }
}

impl From<[i32; 2]> for GridPos {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<GridPos> for [i32; 2] {
    fn from(p: GridPos) -> Self {
        [p.x, p.y]
    }
}

/// A half-open rectangle of cells: `min` inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: GridPos,
    pub max: GridPos,
}

impl CellRect {
    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains(&self, p: GridPos) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        (self.min.y..self.max.y)
            .flat_map(move |y| (self.min.x..self.max.x).map(move |x| GridPos::new(x, y)))
    }

    /// Cells on the outer ring, row-major, each once.
    pub fn boundary_cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.cells().filter(move |p| {
            p.x == self.min.x || p.x == self.max.x - 1 || p.y == self.min.y || p.y == self.max.y - 1
        })
    }

    /// Chebyshev distance from `p` to the nearest cell inside the rectangle.
    pub fn chebyshev_distance(&self, p: GridPos) -> i32 {
        let dx = (self.min.x - p.x).max(p.x - (self.max.x - 1)).max(0);
        let dy = (self.min.y - p.y).max(p.y - (self.max.y - 1)).max(0);
        dx.max(dy)
    }
}

/// Sparse cell map: absent keys are empty space, there are no bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseGrid<V> {
    cells: BTreeMap<GridPos, V>,
}

impl<V> Default for SparseGrid<V> {
    fn default() -> Self {
        Self { cells: BTreeMap::new() }
    }
}

impl<V> SparseGrid<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: GridPos) -> Option<&V> {
        self.cells.get(&pos)
    }

    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut V> {
        self.cells.get_mut(&pos)
    }

    pub fn set(&mut self, pos: GridPos, value: V) -> Option<V> {
        self.cells.insert(pos, value)
    }

    pub fn remove(&mut self, pos: GridPos) -> Option<V> {
        self.cells.remove(&pos)
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.cells.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, GridPos, V> {
        self.cells.iter()
    }
}

impl<A> SparseGrid<SmallVec<A>>
where
    A: smallvec::Array,
    A::Item: PartialEq,
{
    /// Appends `value` to the cell's list unless already present.
    pub fn push_unique(&mut self, pos: GridPos, value: A::Item) -> bool {
        let list = self.cells.entry(pos).or_default();
        if list.contains(&value) {
            return false;
        }
        list.push(value);
        true
    }

    /// Removes `value` from the cell's list, dropping the cell once empty.
    pub fn remove_value(&mut self, pos: GridPos, value: &A::Item) -> bool {
        let Some(list) = self.cells.get_mut(&pos) else {
            return false;
        };
        let before = list.len();
        list.retain(|v| *v != *value);
        let removed = list.len() != before;
        if list.is_empty() {
            self.cells.remove(&pos);
        }
        removed
    }
}

/// Links occupying a single cell. Most cells hold one or two.
pub type CellLinks = SmallVec<[LinkId; 4]>;

/// Every cell a route passes through, in order, possibly with repeats.
///
/// Each segment is stepped `max(|dx|, |dy|)` times so simplified routes still
/// claim the cells between their vertices.
pub fn route_cells(route: &Polyline) -> Vec<GridPos> {
    let mut cells = Vec::with_capacity(route.len());
    let Some(first) = route.first() else {
        return cells;
    };
    cells.push(GridPos::from_vec2(*first));

    for w in route.windows(2) {
        let (a, b) = (w[0], w[1]);
        let from = GridPos::from_vec2(a);
        let to = GridPos::from_vec2(b);
        let steps = from.chebyshev_distance(to);
        for step in 1..=steps {
            let p = a.lerp(b, step as f32 / steps as f32);
            cells.push(GridPos::from_vec2(p));
        }
    }

    cells
}
