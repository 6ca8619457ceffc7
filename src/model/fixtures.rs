// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{LinkId, NodeId};
use super::topology::{Link, Node, Topology};
use crate::layout::grid::GridPos;

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn lid(value: &str) -> LinkId {
    LinkId::new(value).expect("link id")
}

fn link(topo: &mut Topology, id: &str, from: &str, to: &str) {
    topo.links_mut().insert(lid(id), Link::new(nid(from), nid(to)));
}

pub(crate) fn triangle() -> Topology {
    let mut topo = Topology::default();
    topo.nodes_mut().insert(nid("a"), Node::at(0, 0));
    topo.nodes_mut().insert(nid("b"), Node::at(4, 0));
    topo.nodes_mut().insert(nid("c"), Node::at(2, 3));

    link(&mut topo, "a-b", "a", "b");
    link(&mut topo, "b-c", "b", "c");
    link(&mut topo, "c-a", "c", "a");

    topo
}

/// Two 3x3 nodes with five parallel links between them.
pub(crate) fn multi_cell_pair() -> Topology {
    let mut topo = Topology::default();
    topo.nodes_mut().insert(nid("left"), Node::at(0, 0).with_extents(3.0, 3.0));
    topo.nodes_mut().insert(nid("right"), Node::at(8, 0).with_extents(3.0, 3.0));

    for n in 1..=5 {
        link(&mut topo, &format!("l{n}"), "left", "right");
    }

    topo
}

/// A straight line of nodes with a blocker in the middle and a via detour.
pub(crate) fn via_detour() -> Topology {
    let mut topo = Topology::default();
    topo.nodes_mut().insert(nid("a"), Node::at(0, 0));
    topo.nodes_mut().insert(nid("blocker"), Node::at(3, 0));
    topo.nodes_mut().insert(nid("b"), Node::at(6, 0));

    topo.links_mut().insert(
        lid("a-b"),
        Link::new(nid("a"), nid("b")).with_via([GridPos::new(2, 3), GridPos::new(4, -3)]),
    );

    topo
}

/// A `cols x rows` lattice, two cells apart, linked to right and lower neighbours.
pub(crate) fn lattice(cols: i32, rows: i32) -> Topology {
    let mut topo = Topology::default();
    let name = |x: i32, y: i32| format!("n{x}_{y}");

    for y in 0..rows {
        for x in 0..cols {
            topo.nodes_mut().insert(nid(&name(x, y)), Node::at(x * 2, y * 2));
        }
    }
    for y in 0..rows {
        for x in 0..cols {
            if x + 1 < cols {
                let (from, to) = (name(x, y), name(x + 1, y));
                link(&mut topo, &format!("{from}-{to}"), &from, &to);
            }
            if y + 1 < rows {
                let (from, to) = (name(x, y), name(x, y + 1));
                link(&mut topo, &format!("{from}-{to}"), &from, &to);
            }
        }
    }

    topo
}
