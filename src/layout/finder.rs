// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Single-link A* search over the routing grid.
//!
//! The search graph is implicit. A state is a cell plus the heading the route
//! arrived with plus the number of vias still to visit, so the grid is effectively
//! stacked once per via and the layers only connect at via cells. Turning in place
//! is an edge of its own, which lets the cost model charge for bends.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

use super::grid::{CellRect, GridPos};
use super::queue::PriorityQueue;
use super::router::LinkRouter;
use crate::geom::Polyline;
use crate::model::ids::{LinkId, NodeId};

const TURN_COST: f32 = 2.0;
const DOUBLE_TURN_COST: f32 = 4.0;
const SPREAD_PENALTY_START: f32 = 16.0;
const PRIORITY_SCALE: f32 = 100.0;

/// Direction of travel; `(0, 0)` only for start states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Heading {
    pub dx: i32,
    pub dy: i32,
}

impl Heading {
    pub const NONE: Self = Self { dx: 0, dy: 0 };

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_none(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }
}

// Cardinals before diagonals gives a slight preference for leaving a node straight.
const START_CARDINALS: [Heading; 4] =
    [Heading::new(-1, 0), Heading::new(0, -1), Heading::new(0, 1), Heading::new(1, 0)];
const START_DIAGONALS: [Heading; 4] =
    [Heading::new(-1, -1), Heading::new(-1, 1), Heading::new(1, -1), Heading::new(1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchState {
    pub pos: GridPos,
    pub heading: Heading,
    /// Vias still to visit; counts down to zero.
    pub via: usize,
}

impl SearchState {
    pub fn start(pos: GridPos, vias: usize) -> Self {
        Self { pos, heading: Heading::NONE, via: vias }
    }

    fn advanced(self) -> Self {
        Self { pos: self.pos.offset(self.heading.dx, self.heading.dy), ..self }
    }

    fn turned(self, heading: Heading) -> Self {
        Self { heading, ..self }
    }

    fn moved(self, heading: Heading) -> Self {
        Self { pos: self.pos.offset(heading.dx, heading.dy), heading, via: self.via }
    }
}

/// A candidate route and the cost the search accumulated for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedLink {
    pub id: LinkId,
    pub path: Polyline,
    pub weight: f32,
}

/// Broken parent chain during path reconstruction.
///
/// This never means "no route": it means the search state is corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteInvariantError {
    #[error("route for link '{link}' loops back on itself at ({}, {})", pos.x(), pos.y())]
    ParentCycle { link: LinkId, pos: GridPos },
    #[error("route for link '{link}' did not reach a start cell within {steps} steps")]
    Unterminated { link: LinkId, steps: usize },
}

/// Everything the search needs to know about one link.
#[derive(Debug, Clone)]
pub struct RouteRequest<'a> {
    pub link: &'a LinkId,
    /// One cell for ordinary nodes, the boundary ring for multi-cell nodes.
    pub starts: SmallVec<[GridPos; 8]>,
    pub goal: GridPos,
    pub goal_node: &'a NodeId,
    /// Footprint of a multi-cell goal node.
    pub goal_footprint: Option<CellRect>,
    /// In visiting order.
    pub vias: &'a [GridPos],
}

pub struct RouteFinder<'a> {
    router: &'a LinkRouter,
    request: RouteRequest<'a>,
    came_from: FxHashMap<SearchState, SearchState>,
}

impl<'a> RouteFinder<'a> {
    pub fn new(router: &'a LinkRouter, request: RouteRequest<'a>) -> Self {
        Self { router, request, came_from: FxHashMap::default() }
    }

    /// Runs the search. `Ok(None)` means no route within the iteration limit.
    pub fn run(mut self) -> Result<Option<RoutedLink>, RouteInvariantError> {
        let Some(&first) = self.request.starts.first() else {
            return Ok(None);
        };
        let capacity = first.chebyshev_distance(self.request.goal).max(1) as usize * 2;
        self.came_from.reserve(capacity);

        let mut open = PriorityQueue::with_capacity(capacity);
        let mut weights = FxHashMap::<SearchState, f32>::with_capacity_and_hasher(capacity, Default::default());
        for &pos in &self.request.starts {
            let state = SearchState::start(pos, self.request.vias.len());
            open.push(state, 0);
            weights.insert(state, 0.0);
        }

        let limit = self.router.config().search_limit;
        let mut iterations = 0usize;
        let mut neighbours = SmallVec::<[SearchState; 8]>::new();
        while iterations < limit {
            let Some(current) = open.pop_min() else {
                break;
            };
            let current_weight = weights.get(&current).copied().unwrap_or_default();

            if self.is_goal(current) {
                trace!(link = %self.request.link, iterations, weight = current_weight, "route found");
                return self.build_route(current, current_weight);
            }

            neighbours.clear();
            self.neighbours(current, &mut neighbours);
            for &next in &neighbours {
                let weight = current_weight + self.weight(current, next);
                if weights.get(&next).is_some_and(|&known| known <= weight) {
                    continue;
                }
                self.came_from.insert(next, current);
                weights.insert(next, weight);

                // The via count makes the heuristic inadmissible; it pulls the search
                // towards states that already passed their vias.
                let h = self.goal_distance(next.pos) as f32 + next.via as f32;
                open.push(next, ((weight + h) * PRIORITY_SCALE).round() as i64);
            }

            iterations += 1;
        }

        trace!(link = %self.request.link, iterations, "no route within search limit");
        Ok(None)
    }

    fn is_goal(&self, state: SearchState) -> bool {
        state.via == 0 && self.is_goal_cell(state.pos)
    }

    fn is_goal_cell(&self, pos: GridPos) -> bool {
        pos == self.request.goal || self.router.node_at(pos) == Some(self.request.goal_node)
    }

    /// Next via for a state with `remaining` vias left to visit.
    fn pending_via(&self, remaining: usize) -> Option<GridPos> {
        let vias = self.request.vias;
        if remaining == 0 || remaining > vias.len() {
            return None;
        }
        Some(vias[vias.len() - remaining])
    }

    fn neighbours(&self, state: SearchState, out: &mut SmallVec<[SearchState; 8]>) {
        let parent = self.came_from.get(&state).copied();
        let orthogonal = self.router.config().orthogonal;
        let mut produce = |candidate: SearchState| {
            if let Some(next) = self.accept(state, parent, candidate) {
                out.push(next);
            }
        };

        let Heading { dx, dy } = state.heading;
        if state.heading.is_none() {
            for heading in START_CARDINALS {
                produce(state.moved(heading));
            }
            if !orthogonal {
                for heading in START_DIAGONALS {
                    produce(state.moved(heading));
                }
            }
            return;
        }

        produce(state.advanced());

        if orthogonal {
            if dx == 0 {
                produce(state.turned(Heading::new(dy, 0)));
                produce(state.turned(Heading::new(-dy, 0)));
            } else {
                produce(state.turned(Heading::new(0, dx)));
                produce(state.turned(Heading::new(0, -dx)));
            }
            return;
        }

        // 45 degree turns
        if dx == 0 {
            produce(state.turned(Heading::new(1, dy)));
            produce(state.turned(Heading::new(-1, dy)));
        } else if dy != 0 {
            produce(state.turned(Heading::new(0, dy)));
        }
        if dy == 0 {
            produce(state.turned(Heading::new(dx, 1)));
            produce(state.turned(Heading::new(dx, -1)));
        } else if dx != 0 {
            produce(state.turned(Heading::new(dx, 0)));
        }
    }

    fn accept(
        &self,
        state: SearchState,
        parent: Option<SearchState>,
        mut candidate: SearchState,
    ) -> Option<SearchState> {
        if candidate == state || parent == Some(candidate) {
            return None;
        }

        if self.pending_via(state.via) == Some(candidate.pos) {
            candidate.via -= 1;
        }

        let config = self.router.config();
        if self.is_goal_cell(candidate.pos) {
            let cardinal_only = self.request.goal_footprint.is_some() && config.attach_multi_cells_cardinal;
            if cardinal_only && candidate.heading.is_diagonal() {
                return None;
            }
            return Some(candidate);
        }

        let pos = candidate.pos;
        let blocked_by_node = config.avoid_nodes && self.router.node_at(pos).is_some();
        if !self.router.in_extents(pos) || blocked_by_node || self.router.is_label_cell(pos) {
            return None;
        }
        Some(candidate)
    }

    /// Cost of the edge `from -> to`.
    fn weight(&self, from: SearchState, to: SearchState) -> f32 {
        if from.pos == to.pos {
            let double_turn = self.came_from.get(&from).is_some_and(|prev| prev.pos == from.pos);
            return if double_turn { DOUBLE_TURN_COST } else { TURN_COST };
        }

        let dist = from.pos.chebyshev_distance(to.pos) as f32;
        if self.is_goal_cell(to.pos) {
            return dist;
        }

        let own = self.request.link;
        let mut penalty = 0.0f32;
        let mut n = 1.0f32;
        for link in self.router.links_at(to.pos).iter().filter(|link| *link != own) {
            penalty += 1.0 / n;
            n *= 2.0;
        }

        // A diagonal step crosses any link present in both cells it squeezes between.
        if from.heading.is_diagonal() {
            let Heading { dx, dy } = from.heading;
            let beside = self.router.links_at(from.pos.offset(0, dy));
            for link in self.router.links_at(from.pos.offset(dx, 0)) {
                if link != own && beside.contains(link) {
                    penalty += 1.0 / n;
                    n *= 2.0;
                }
            }
        }

        if self.router.config().spread_links {
            for cell in side_cells(to) {
                let mut n = SPREAD_PENALTY_START;
                for link in self.router.links_at(cell).iter().filter(|link| *link != own) {
                    penalty += 1.0 / n;
                    n *= 2.0;
                }
            }
        }

        dist + penalty * self.router.config().link_penalty_weight
    }

    fn goal_distance(&self, pos: GridPos) -> i32 {
        match self.request.goal_footprint {
            Some(rect) => rect.chebyshev_distance(pos),
            None => pos.chebyshev_distance(self.request.goal),
        }
    }

    fn build_route(&self, end: SearchState, weight: f32) -> Result<Option<RoutedLink>, RouteInvariantError> {
        // A goal state without a parent is a start state: the link connects a node to itself.
        let Some(mut cursor) = self.came_from.get(&end).copied() else {
            return Ok(None);
        };

        let limit = self.came_from.len() + 1;
        let mut cells = vec![end.pos];
        let mut steps = 0usize;
        loop {
            cells.push(cursor.pos);
            let Some(&prev) = self.came_from.get(&cursor) else {
                break;
            };
            if prev == cursor {
                return Err(RouteInvariantError::ParentCycle {
                    link: self.request.link.clone(),
                    pos: cursor.pos,
                });
            }
            steps += 1;
            if steps > limit {
                return Err(RouteInvariantError::Unterminated { link: self.request.link.clone(), steps });
            }
            cursor = prev;
        }

        cells.reverse();
        let path = cells.into_iter().map(GridPos::to_vec2).collect::<Polyline>().fix();
        Ok(Some(RoutedLink { id: self.request.link.clone(), path, weight }))
    }
}

/// Cells flanking the cell ahead of `state`, relative to its heading.
fn side_cells(state: SearchState) -> SmallVec<[GridPos; 4]> {
    let Heading { dx, dy } = state.heading;
    let pos = state.pos;
    let mut cells = SmallVec::new();
    if dx == 0 {
        cells.push(pos.offset(1, dy));
        cells.push(pos.offset(-1, dy));
    } else if dy != 0 {
        cells.push(pos.offset(0, dy));
    }
    if dy == 0 {
        cells.push(pos.offset(dx, 1));
        cells.push(pos.offset(dx, -1));
    } else if dx != 0 {
        cells.push(pos.offset(dx, 0));
    }
    cells
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::{side_cells, Heading, RouteFinder, RouteInvariantError, RouteRequest, SearchState};
    use crate::config::RouterConfig;
    use crate::geom::{Polyline, Vec2};
    use crate::layout::grid::{CellRect, GridPos};
    use crate::layout::router::LinkRouter;
    use crate::model::fixtures::{lid, nid};
    use crate::model::ids::{LinkId, NodeId};
    use crate::model::topology::{Link, Node, Topology};

    fn gp(x: i32, y: i32) -> GridPos {
        GridPos::new(x, y)
    }

    fn state(x: i32, y: i32, dx: i32, dy: i32) -> SearchState {
        SearchState { pos: gp(x, y), heading: Heading::new(dx, dy), via: 0 }
    }

    fn line(points: &[(f32, f32)]) -> Polyline {
        points.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
    }

    /// Router for `a (0,0) -> b (10,0)` with other links placed on the given cells.
    fn occupied_router(config: RouterConfig, others: &[(&str, GridPos)]) -> LinkRouter {
        let mut router = LinkRouter::new(&two_nodes(gp(10, 0)), config);
        for &(id, cell) in others {
            router.add_route(&lid(id), &line(&[(cell.x() as f32, cell.y() as f32)]));
        }
        router
    }

    fn request<'a>(link: &'a LinkId, goal_node: &'a NodeId) -> RouteRequest<'a> {
        RouteRequest {
            link,
            starts: smallvec![gp(0, 0)],
            goal: gp(10, 0),
            goal_node,
            goal_footprint: None,
            vias: &[],
        }
    }

    /// Sums edge weights along `states`, recording parents as the search would.
    fn path_weight(finder: &mut RouteFinder<'_>, states: &[SearchState]) -> f32 {
        let mut total = 0.0;
        for pair in states.windows(2) {
            total += finder.weight(pair[0], pair[1]);
            finder.came_from.insert(pair[1], pair[0]);
        }
        total
    }

    fn two_nodes(to: GridPos) -> Topology {
        let mut topo = Topology::default();
        topo.nodes_mut().insert(nid("a"), Node::at(0, 0));
        topo.nodes_mut().insert(nid("b"), Node::at(to.x(), to.y()));
        topo.links_mut().insert(lid("a-b"), Link::new(nid("a"), nid("b")));
        topo
    }

    #[test]
    fn straight_route_costs_its_length() {
        let topo = two_nodes(gp(4, 0));
        let mut router = LinkRouter::new(&topo, RouterConfig::default());
        router.expand_extents(1);

        let link = lid("a-b");
        let goal_node = nid("b");
        let route = RouteFinder::new(
            &router,
            RouteRequest {
                link: &link,
                starts: smallvec![gp(0, 0)],
                goal: gp(4, 0),
                goal_node: &goal_node,
                goal_footprint: None,
                vias: &[],
            },
        )
        .run()
        .expect("invariants hold")
        .expect("route");

        assert_eq!(route.path.first(), Some(&Vec2::new(0.0, 0.0)));
        assert_eq!(route.path.last(), Some(&Vec2::new(4.0, 0.0)));
        assert_eq!(route.path.len(), 5);
        assert_eq!(route.weight, 4.0);
    }

    #[test]
    fn self_link_has_no_route() {
        let topo = two_nodes(gp(4, 0));
        let router = LinkRouter::new(&topo, RouterConfig::default());

        let link = lid("a-a");
        let goal_node = nid("a");
        let route = RouteFinder::new(
            &router,
            RouteRequest {
                link: &link,
                starts: smallvec![gp(0, 0)],
                goal: gp(0, 0),
                goal_node: &goal_node,
                goal_footprint: None,
                vias: &[],
            },
        )
        .run()
        .expect("invariants hold");
        assert!(route.is_none());
    }

    #[test]
    fn orthogonal_search_never_steps_diagonally() {
        let topo = two_nodes(gp(3, 3));
        let config = RouterConfig { orthogonal: true, ..RouterConfig::default() };
        let mut router = LinkRouter::new(&topo, config);
        router.expand_extents(1);

        let route = router.route_link(&topo, &lid("a-b")).expect("invariants hold").expect("route");
        for w in route.path.windows(2) {
            let d = w[1] - w[0];
            assert!(d.x == 0.0 || d.y == 0.0, "diagonal step {} -> {}", w[0], w[1]);
        }
        assert_eq!(route.path.last(), Some(&Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn side_cells_flank_the_cell_ahead() {
        let south = SearchState { pos: gp(0, 0), heading: Heading::new(0, 1), via: 0 };
        assert_eq!(side_cells(south).as_slice(), &[gp(1, 1), gp(-1, 1)]);

        let east = SearchState { pos: gp(0, 0), heading: Heading::new(1, 0), via: 0 };
        assert_eq!(side_cells(east).as_slice(), &[gp(1, 1), gp(1, -1)]);

        let south_east = SearchState { pos: gp(0, 0), heading: Heading::new(1, 1), via: 0 };
        assert_eq!(side_cells(south_east).as_slice(), &[gp(0, 1), gp(1, 0)]);
    }

    #[test]
    fn turning_twice_in_place_costs_more_than_spaced_turns() {
        let router = occupied_router(RouterConfig::default(), &[]);
        let (link, goal) = (lid("a-b"), nid("b"));

        let mut finder = RouteFinder::new(&router, request(&link, &goal));
        let in_place = [state(0, 0, 1, 0), state(0, 0, 1, 1), state(0, 0, 0, 1)];
        assert_eq!(path_weight(&mut finder, &in_place), 6.0);

        let mut finder = RouteFinder::new(&router, request(&link, &goal));
        let spaced = [state(0, 0, 1, 0), state(0, 0, 1, 1), state(1, 1, 1, 1), state(1, 1, 0, 1)];
        assert_eq!(path_weight(&mut finder, &spaced), 5.0);
    }

    #[test]
    fn occupied_cell_penalty_halves_per_link() {
        let others = [("x", gp(2, 0)), ("y", gp(2, 0)), ("z", gp(2, 0))];
        let (link, goal) = (lid("a-b"), nid("b"));

        let router = occupied_router(RouterConfig::default(), &others);
        let finder = RouteFinder::new(&router, request(&link, &goal));
        // 1 + 1/2 + 1/4, times the default weight of 10.
        assert_eq!(finder.weight(state(1, 0, 1, 0), state(2, 0, 1, 0)), 1.0 + 17.5);

        let light = RouterConfig { link_penalty_weight: 1.0, ..RouterConfig::default() };
        let router = occupied_router(light, &others);
        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.weight(state(1, 0, 1, 0), state(2, 0, 1, 0)), 2.75);

        // The link's own cells are free.
        let router = occupied_router(RouterConfig::default(), &[("a-b", gp(2, 0))]);
        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.weight(state(1, 0, 1, 0), state(2, 0, 1, 0)), 1.0);
    }

    #[test]
    fn diagonal_step_between_two_cells_of_one_link_is_a_crossing() {
        let config = RouterConfig { spread_links: false, ..RouterConfig::default() };
        let (link, goal) = (lid("a-b"), nid("b"));
        let step = (state(0, 0, 1, 1), state(1, 1, 1, 1));

        let mut router = occupied_router(config, &[]);
        router.add_route(&lid("x"), &line(&[(1.0, 0.0), (0.0, 1.0)]));
        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.weight(step.0, step.1), 11.0);

        // Different links on either side do not cross.
        let router = occupied_router(config, &[("x", gp(1, 0)), ("y", gp(0, 1))]);
        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.weight(step.0, step.1), 1.0);
    }

    #[test]
    fn spread_penalty_starts_at_a_sixteenth_per_side_cell() {
        // Stepping east onto (1, 0): the side cells ahead are (2, 1) and (2, -1).
        let others = [("x", gp(2, 1)), ("y", gp(2, 1)), ("z", gp(2, -1))];
        let (link, goal) = (lid("a-b"), nid("b"));
        let step = (state(0, 0, 1, 0), state(1, 0, 1, 0));

        let router = occupied_router(RouterConfig::default(), &others);
        let finder = RouteFinder::new(&router, request(&link, &goal));
        // (1/16 + 1/32) + 1/16, times 10.
        assert_eq!(finder.weight(step.0, step.1), 1.0 + 1.5625);

        let tight = RouterConfig { spread_links: false, ..RouterConfig::default() };
        let router = occupied_router(tight, &others);
        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.weight(step.0, step.1), 1.0);
    }

    #[test]
    fn entering_the_goal_costs_only_distance() {
        let router = occupied_router(RouterConfig::default(), &[("x", gp(10, 0)), ("y", gp(10, 0))]);
        let (link, goal) = (lid("a-b"), nid("b"));
        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.weight(state(9, 0, 1, 0), state(10, 0, 1, 0)), 1.0);
    }

    #[test]
    fn goal_distance_measures_to_the_footprint() {
        let router = occupied_router(RouterConfig::default(), &[]);
        let (link, goal) = (lid("a-b"), nid("b"));

        let finder = RouteFinder::new(&router, request(&link, &goal));
        assert_eq!(finder.goal_distance(gp(0, 0)), 10);
        assert_eq!(finder.goal_distance(gp(7, 4)), 4);

        let wide = RouteRequest {
            goal_footprint: Some(CellRect { min: gp(9, -1), max: gp(12, 2) }),
            ..request(&link, &goal)
        };
        let finder = RouteFinder::new(&router, wide);
        assert_eq!(finder.goal_distance(gp(0, 0)), 9);
        assert_eq!(finder.goal_distance(gp(7, 4)), 3);
        assert_eq!(finder.goal_distance(gp(10, 1)), 0);
    }

    #[test]
    fn crowded_corridor_cell_is_paid_for() {
        let topo = two_nodes(gp(4, 0));
        let mut router = LinkRouter::new(&topo, RouterConfig::default());
        router.set_extents(CellRect { min: gp(0, 0), max: gp(5, 1) });
        for id in ["x", "y", "z"] {
            router.add_route(&lid(id), &line(&[(2.0, 0.0)]));
        }

        let route = router.route_link(&topo, &lid("a-b")).expect("invariants hold").expect("route");
        assert_eq!(route.weight, 4.0 + 17.5);
        assert_eq!(route.path.len(), 5);
    }

    #[test]
    fn orthogonal_diagonal_goal_pays_one_turn() {
        let topo = two_nodes(gp(2, 2));
        let config = RouterConfig { orthogonal: true, ..RouterConfig::default() };
        let mut router = LinkRouter::new(&topo, config);
        router.expand_extents(1);

        let route = router.route_link(&topo, &lid("a-b")).expect("invariants hold").expect("route");
        assert_eq!(route.weight, 4.0 + 2.0);
        assert_eq!(route.path.len(), 5);
    }

    #[test]
    fn broken_parent_chain_is_an_error_not_a_missing_route() {
        let router = occupied_router(RouterConfig::default(), &[]);
        let (link, goal) = (lid("a-b"), nid("b"));
        let end = state(10, 0, 1, 0);
        let looped = state(9, 0, 1, 0);

        let mut finder = RouteFinder::new(&router, request(&link, &goal));
        finder.came_from.insert(end, looped);
        finder.came_from.insert(looped, looped);
        assert_eq!(
            finder.build_route(end, 1.0),
            Err(RouteInvariantError::ParentCycle { link: link.clone(), pos: gp(9, 0) })
        );

        let other = state(8, 0, 1, 0);
        let mut finder = RouteFinder::new(&router, request(&link, &goal));
        finder.came_from.insert(end, looped);
        finder.came_from.insert(looped, other);
        finder.came_from.insert(other, looped);
        assert!(matches!(
            finder.build_route(end, 1.0),
            Err(RouteInvariantError::Unterminated { .. })
        ));
    }
}
