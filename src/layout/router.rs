// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Multi-pass link routing over a shared occupancy grid.

use rayon::prelude::*;
use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace, warn};

use super::finder::{RouteFinder, RouteInvariantError, RouteRequest, RoutedLink};
use super::grid::{route_cells, CellLinks, CellRect, GridPos, SparseGrid};
use crate::config::RouterConfig;
use crate::geom::Polyline;
use crate::model::ids::{LinkId, NodeId};
use crate::model::topology::Topology;

/// Counters reported by [`LinkRouter::route_links`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoutingSummary {
    /// Links that already carried a route and were left alone.
    pub prerouted: usize,
    pub routed: usize,
    pub unrouted: usize,
    /// Routes replaced by a cheaper one during the fix-point pass.
    pub improved: usize,
    pub fixpoint_rounds: usize,
}

/// Owns the occupancy grids for one topology and routes its links.
///
/// Occupancy changes only through [`add_route`](Self::add_route),
/// [`remove_route`](Self::remove_route) and [`replace_route`](Self::replace_route);
/// route searches only read it.
#[derive(Debug, Clone)]
pub struct LinkRouter {
    config: RouterConfig,
    nodes: SparseGrid<NodeId>,
    node_labels: SparseGrid<bool>,
    links: SparseGrid<CellLinks>,
    extents: Option<CellRect>,
}

#[derive(Debug, Default)]
struct Bounds(Option<(GridPos, GridPos)>);

impl Bounds {
    fn include(&mut self, pos: GridPos) {
        self.0 = Some(match self.0 {
            Some((min, max)) => (min.min(pos), max.max(pos)),
            None => (pos, pos),
        });
    }

    fn into_rect(self) -> Option<CellRect> {
        self.0.map(|(min, max)| CellRect { min, max: max.offset(1, 1) })
    }
}

impl LinkRouter {
    /// Builds occupancy from `topo`: node cells (whole footprints for multi-cell
    /// nodes), fixed label cells, and link cells. Links that already have a route
    /// occupy it; the rest occupy their endpoints and vias so early routes keep
    /// clear of them.
    pub fn new(topo: &Topology, config: RouterConfig) -> Self {
        let mut router = Self {
            config,
            nodes: SparseGrid::new(),
            node_labels: SparseGrid::new(),
            links: SparseGrid::new(),
            extents: None,
        };
        let mut bounds = Bounds::default();

        for (id, node) in topo.nodes() {
            let Some(pos) = node.pos() else {
                continue;
            };
            router.nodes.set(pos, id.clone());
            bounds.include(pos);

            if node.is_multi_cell() {
                if let Some(rect) = node.footprint() {
                    for cell in rect.cells() {
                        router.nodes.set(cell, id.clone());
                    }
                    bounds.include(rect.min);
                    bounds.include(rect.max.offset(-1, -1));
                }
            }

            if let Some(cell) = node.label_cell() {
                router.node_labels.set(cell, true);
                bounds.include(cell);
            }
        }

        for (id, link) in topo.links() {
            if link.is_routed() {
                for cell in route_cells(link.route()) {
                    router.links.push_unique(cell, id.clone());
                    bounds.include(cell);
                }
                continue;
            }

            let endpoints = [link.from(), link.to()].into_iter().filter_map(|node| topo.node_pos(node));
            for cell in link.via().iter().copied().chain(endpoints) {
                router.links.push_unique(cell, id.clone());
                bounds.include(cell);
            }
        }

        router.extents = bounds.into_rect();
        router
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The searchable rectangle, `None` for a topology without positioned content.
    pub fn extents(&self) -> Option<CellRect> {
        self.extents
    }

    /// Overrides the derived extents. Links with an endpoint or via outside them
    /// will not route.
    pub fn set_extents(&mut self, extents: CellRect) {
        let min = extents.min.min(extents.max);
        let max = extents.min.max(extents.max);
        self.extents = Some(CellRect { min, max });
    }

    /// Grows the extents by `margin` cells on every side.
    pub fn expand_extents(&mut self, margin: i32) {
        if let Some(rect) = self.extents.as_mut() {
            rect.min = rect.min.offset(-margin, -margin);
            rect.max = rect.max.offset(margin, margin);
        }
    }

    pub fn in_extents(&self, pos: GridPos) -> bool {
        self.extents.is_some_and(|rect| rect.contains(pos))
    }

    pub fn node_at(&self, pos: GridPos) -> Option<&NodeId> {
        self.nodes.get(pos)
    }

    pub fn is_label_cell(&self, pos: GridPos) -> bool {
        self.node_labels.contains(pos)
    }

    pub fn links_at(&self, pos: GridPos) -> &[LinkId] {
        self.links.get(pos).map(|links| links.as_slice()).unwrap_or(&[])
    }

    pub fn add_route(&mut self, id: &LinkId, route: &Polyline) {
        for cell in route_cells(route) {
            self.links.push_unique(cell, id.clone());
        }
    }

    pub fn remove_route(&mut self, id: &LinkId, route: &Polyline) {
        for cell in route_cells(route) {
            self.links.remove_value(cell, id);
        }
    }

    pub fn replace_route(&mut self, id: &LinkId, old: &Polyline, new: &Polyline) {
        self.remove_route(id, old);
        self.add_route(id, new);
    }

    /// Searches a route for one link against the current occupancy.
    ///
    /// `Ok(None)` covers every ordinary failure: unknown link, missing or unplaced
    /// endpoint, endpoint or via outside the extents, or no path within the search
    /// limit.
    pub fn route_link(&self, topo: &Topology, id: &LinkId) -> Result<Option<RoutedLink>, RouteInvariantError> {
        let Some(link) = topo.link(id) else {
            return Ok(None);
        };
        let (Some(start), Some(goal)) = (topo.node(link.from()), topo.node(link.to())) else {
            trace!(link = %id, "skipping link with unknown endpoint");
            return Ok(None);
        };
        let (Some(start_pos), Some(goal_pos)) = (start.pos(), goal.pos()) else {
            trace!(link = %id, "skipping link with unplaced endpoint");
            return Ok(None);
        };

        let outside = [start_pos, goal_pos]
            .iter()
            .chain(link.via())
            .any(|&pos| !self.in_extents(pos));
        if outside {
            trace!(link = %id, "skipping link outside the routing extents");
            return Ok(None);
        }

        let starts: SmallVec<[GridPos; 8]> = match start.footprint().filter(|_| start.is_multi_cell()) {
            Some(rect) => rect.boundary_cells().collect(),
            None => smallvec![start_pos],
        };
        let goal_footprint = goal.footprint().filter(|_| goal.is_multi_cell());

        let request = RouteRequest {
            link: id,
            starts,
            goal: goal_pos,
            goal_node: link.to(),
            goal_footprint,
            vias: link.via(),
        };
        RouteFinder::new(self, request).run()
    }

    /// Routes every link of `topo` that has no route yet and writes the results
    /// back into the topology.
    ///
    /// 1. Each link is routed once, in id order, and registered immediately.
    /// 2. Routes are re-routed cheapest first, each replacing its own footprint.
    /// 3. Routes are re-routed (short-for-their-cost first) until a full round
    ///    finds no strictly cheaper route, up to `route_iter_limit` rounds.
    ///
    /// Returns [`RouteInvariantError`] when path reconstruction finds a broken
    /// parent chain. Callers must treat it as fatal: routing stops at the failing
    /// link and both `self` and `topo` are left half-updated.
    pub fn route_links(&mut self, topo: &mut Topology) -> Result<RoutingSummary, RouteInvariantError> {
        let mut summary = RoutingSummary::default();
        let mut pending = Vec::new();
        for (id, link) in topo.links() {
            if link.is_routed() {
                summary.prerouted += 1;
            } else {
                pending.push(id.clone());
            }
        }

        let mut routes = self.independent_pass(topo, &pending)?;
        summary.routed = routes.len();
        summary.unrouted = pending.len() - routes.len();
        debug!(
            routed = summary.routed,
            unrouted = summary.unrouted,
            prerouted = summary.prerouted,
            "independent routing pass done"
        );

        routes.sort_by(|a, b| a.weight.total_cmp(&b.weight));
        let mut routes = self.aware_pass(topo, routes)?;
        debug!(routes = routes.len(), "aware routing pass done");

        routes.sort_by(|a, b| length_ratio(a).total_cmp(&length_ratio(b)));
        let mut converged = false;
        for _ in 0..self.config.route_iter_limit {
            summary.fixpoint_rounds += 1;
            let improved = self.improve_round(topo, &mut routes)?;
            summary.improved += improved;
            if improved == 0 {
                converged = true;
                break;
            }
        }

        if converged {
            debug!(rounds = summary.fixpoint_rounds, improved = summary.improved, "fix-point pass converged");
        } else {
            warn!(
                rounds = summary.fixpoint_rounds,
                improved = summary.improved,
                "fix-point pass stopped at its round limit"
            );
        }

        Ok(summary)
    }

    fn independent_pass(
        &mut self,
        topo: &mut Topology,
        pending: &[LinkId],
    ) -> Result<Vec<RoutedLink>, RouteInvariantError> {
        let mut routes = Vec::with_capacity(pending.len());

        if self.config.parallel_first_pass {
            let snapshot = &*self;
            let shared = &*topo;
            let found = pending
                .par_iter()
                .map(|id| snapshot.route_link(shared, id))
                .collect::<Result<Vec<_>, _>>()?;
            for route in found.into_iter().flatten() {
                self.commit(topo, &route, None);
                routes.push(route);
            }
            return Ok(routes);
        }

        for id in pending {
            match self.route_link(topo, id)? {
                Some(route) => {
                    self.commit(topo, &route, None);
                    routes.push(route);
                }
                None => trace!(link = %id, "link not routed"),
            }
        }
        Ok(routes)
    }

    fn aware_pass(
        &mut self,
        topo: &mut Topology,
        routes: Vec<RoutedLink>,
    ) -> Result<Vec<RoutedLink>, RouteInvariantError> {
        let mut out = Vec::with_capacity(routes.len());
        for previous in routes {
            match self.route_link(topo, &previous.id)? {
                Some(route) => {
                    self.commit(topo, &route, Some(&previous.path));
                    out.push(route);
                }
                // Occupancy moved under it; keep the first-pass route.
                None => out.push(previous),
            }
        }
        Ok(out)
    }

    fn improve_round(
        &mut self,
        topo: &mut Topology,
        routes: &mut [RoutedLink],
    ) -> Result<usize, RouteInvariantError> {
        let mut improved = 0;
        for slot in routes.iter_mut() {
            let Some(route) = self.route_link(topo, &slot.id)? else {
                continue;
            };
            if route.weight < slot.weight {
                trace!(link = %route.id, old = slot.weight, new = route.weight, "cheaper route");
                self.commit(topo, &route, Some(&slot.path));
                *slot = route;
                improved += 1;
            }
        }
        Ok(improved)
    }

    fn commit(&mut self, topo: &mut Topology, route: &RoutedLink, previous: Option<&Polyline>) {
        match previous {
            Some(old) => self.replace_route(&route.id, old, &route.path),
            None => self.add_route(&route.id, &route.path),
        }
        if let Some(link) = topo.link_mut(&route.id) {
            link.set_route(route.path.clone());
        }
        trace!(link = %route.id, weight = route.weight, points = route.path.len(), "route registered");
    }
}

fn length_ratio(route: &RoutedLink) -> f32 {
    route.path.length() / route.weight
}
