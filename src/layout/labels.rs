// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, trace};

use super::direction::Direction;
use super::grid::{route_cells, GridPos, SparseGrid};
use crate::model::ids::NodeId;
use crate::model::topology::Topology;

const CARDINAL_COST: f32 = 50.0;
const DIAGONAL_COST: f32 = 100.0;
const SIDE_NEIGHBOUR_PENALTY: f32 = 50.0;
const NEIGHBOUR_PENALTY: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelSummary {
    /// Nodes that already had a label direction.
    pub preset: usize,
    pub placed: usize,
    /// Nodes with every neighbouring cell occupied.
    pub unplaced: usize,
}

/// Cells that labels may not take.
///
/// A multi-cell footprint blocks every node except its owner, whose label
/// may sit on any of its own cells next to the node position.
#[derive(Debug, Default)]
struct Occupancy {
    filled: SparseGrid<bool>,
    footprints: SparseGrid<NodeId>,
}

impl Occupancy {
    fn fill(&mut self, cell: GridPos) {
        self.filled.set(cell, true);
    }

    fn is_taken(&self, cell: GridPos, node: &NodeId) -> bool {
        self.filled.contains(cell) || self.footprints.get(cell).is_some_and(|owner| owner != node)
    }
}

/// Picks a label direction for every placed node that has none.
///
/// Candidates are the eight neighbouring cells not taken by a node, a label, a
/// routed link or another node's footprint. Each is scored by its direction's
/// base cost, the crowding of other nodes (`base / distance²` each) and the
/// occupied cells around it; the lowest score wins, with ties going to the
/// earlier direction clockwise from north.
pub fn place_labels(topo: &mut Topology) -> LabelSummary {
    let mut occupancy = Occupancy::default();
    let mut positions = Vec::<(NodeId, GridPos)>::with_capacity(topo.nodes().len());
    let mut todo = Vec::new();
    let mut summary = LabelSummary::default();

    for (id, node) in topo.nodes() {
        let Some(pos) = node.pos() else {
            continue;
        };
        occupancy.fill(pos);
        positions.push((id.clone(), pos));

        if let Some(rect) = node.footprint().filter(|_| node.is_multi_cell()) {
            for cell in rect.cells() {
                occupancy.footprints.set(cell, id.clone());
            }
        }

        if node.label_at().is_some() {
            summary.preset += 1;
            if let Some(cell) = node.label_cell() {
                occupancy.fill(cell);
            }
        } else {
            todo.push((id.clone(), pos));
        }
    }

    for link in topo.links().values() {
        for cell in route_cells(link.route()) {
            occupancy.fill(cell);
        }
    }

    for (id, pos) in todo {
        let mut best: Option<(Direction, f32)> = None;
        for dir in Direction::ALL {
            let candidate = dir.step(pos);
            if occupancy.is_taken(candidate, &id) {
                continue;
            }
            let score = score_candidate(candidate, dir, &id, &positions, &occupancy);
            if best.map_or(true, |(_, best_score)| score < best_score) {
                best = Some((dir, score));
            }
        }

        let Some((dir, score)) = best else {
            trace!(node = %id, "no free cell for label");
            summary.unplaced += 1;
            continue;
        };

        trace!(node = %id, dir = %dir, score, "label placed");
        occupancy.fill(dir.step(pos));
        if let Some(node) = topo.nodes_mut().get_mut(&id) {
            node.set_label_at(Some(dir.into()));
        }
        summary.placed += 1;
    }

    debug!(placed = summary.placed, unplaced = summary.unplaced, preset = summary.preset, "labels placed");
    summary
}

fn score_candidate(
    candidate: GridPos,
    dir: Direction,
    id: &NodeId,
    positions: &[(NodeId, GridPos)],
    occupancy: &Occupancy,
) -> f32 {
    let base = if dir.is_cardinal() { CARDINAL_COST } else { DIAGONAL_COST };
    let at = candidate.to_vec2();

    let crowding: f32 = positions
        .iter()
        .filter(|(other, _)| other != id)
        .map(|(_, pos)| {
            let dist = (at - pos.to_vec2()).length();
            base / (dist * dist)
        })
        .sum();

    // The cell back towards the node is always occupied; don't count it.
    let neighbours: f32 = Direction::ALL
        .into_iter()
        .filter(|&around| around != dir.opposite() && occupancy.is_taken(around.step(candidate), id))
        .map(|around| match around {
            Direction::E | Direction::W => SIDE_NEIGHBOUR_PENALTY,
            _ => NEIGHBOUR_PENALTY,
        })
        .sum();

    base + crowding + neighbours
}
