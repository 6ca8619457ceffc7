// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic benchmark topologies (no RNG).

use linkmap::geom::Polyline;
use linkmap::layout::GridPos;
use linkmap::model::{Link, LinkId, Node, NodeId, Topology};

fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

fn lid(value: &str) -> LinkId {
    LinkId::new(value).expect("link id")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Two nodes, two vias.
    Vias,
    /// 6x4 lattice with right/down links.
    Lattice,
    /// Hub with 16 spokes on a ring.
    Star,
    /// Two tall multi-cell nodes with 8 parallel links.
    MultiCell,
}

pub fn fixture(case: Case) -> Topology {
    match case {
        Case::Vias => vias(),
        Case::Lattice => lattice(6, 4, 3),
        Case::Star => star(16, 6),
        Case::MultiCell => multi_cell(8),
    }
}

fn vias() -> Topology {
    let mut topo = Topology::default();
    topo.nodes_mut().insert(nid("A"), Node::at(0, 0));
    topo.nodes_mut().insert(nid("B"), Node::at(10, 10));
    topo.links_mut().insert(
        lid("A-B"),
        Link::new(nid("A"), nid("B")).with_via([GridPos::new(0, 2), GridPos::new(2, 2)]),
    );
    topo
}

pub fn lattice(cols: i32, rows: i32, spacing: i32) -> Topology {
    let mut topo = Topology::default();
    let name = |x: i32, y: i32| format!("n{x:02}_{y:02}");

    for y in 0..rows {
        for x in 0..cols {
            topo.nodes_mut().insert(nid(&name(x, y)), Node::at(x * spacing, y * spacing));
        }
    }

    for y in 0..rows {
        for x in 0..cols {
            for (nx, ny) in [(x + 1, y), (x, y + 1)] {
                if nx >= cols || ny >= rows {
                    continue;
                }
                let (from, to) = (name(x, y), name(nx, ny));
                topo.links_mut().insert(lid(&format!("{from}-{to}")), Link::new(nid(&from), nid(&to)));
            }
        }
    }

    topo
}

/// Spokes sit on the square ring of the given radius around the hub.
pub fn star(spokes: usize, radius: i32) -> Topology {
    let mut topo = Topology::default();
    topo.nodes_mut().insert(nid("hub"), Node::at(0, 0));

    let ring = (-radius..radius)
        .map(|i| (i, -radius))
        .chain((-radius..radius).map(|i| (radius, i)))
        .chain((-radius..radius).map(|i| (-i, radius)))
        .chain((-radius..radius).map(|i| (-radius, -i)))
        .collect::<Vec<_>>();
    let step = (ring.len() / spokes.max(1)).max(1);

    for (n, &(x, y)) in ring.iter().step_by(step).take(spokes).enumerate() {
        let id = format!("s{n:02}");
        topo.nodes_mut().insert(nid(&id), Node::at(x, y));
        topo.links_mut().insert(lid(&format!("hub-{id}")), Link::new(nid("hub"), nid(&id)));
    }

    topo
}

fn multi_cell(links: usize) -> Topology {
    let mut topo = Topology::default();
    topo.nodes_mut().insert(nid("A"), Node::at(0, 0).with_extents(3.0, 10.0));
    topo.nodes_mut().insert(nid("B"), Node::at(12, 0).with_extents(3.0, 10.0));
    for n in 0..links {
        topo.links_mut().insert(lid(&format!("A-B-{n}")), Link::new(nid("A"), nid("B")));
    }
    topo
}

/// Order-sensitive fold over every routed point, for `black_box`.
pub fn checksum_routes(topo: &Topology) -> u64 {
    let mut acc = 0u64;
    for (id, link) in topo.links() {
        acc = acc.wrapping_mul(131).wrapping_add(id.as_str().len() as u64);
        acc = acc.wrapping_mul(131).wrapping_add(checksum_polyline(link.route()));
    }
    acc
}

fn checksum_polyline(line: &Polyline) -> u64 {
    line.iter().fold(line.len() as u64, |acc, p| {
        acc.wrapping_mul(131)
            .wrapping_add(p.x.to_bits() as u64)
            .wrapping_mul(131)
            .wrapping_add(p.y.to_bits() as u64)
    })
}
