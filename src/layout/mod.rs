// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid layout for network maps.
//!
//! Links are routed through a shared grid by [`LinkRouter`], then node labels are
//! placed around whatever the routes left free.

pub mod direction;
pub mod finder;
pub mod grid;
pub mod labels;
pub mod queue;
pub mod router;

pub use direction::{Direction, ParseDirectionError};
pub use finder::{Heading, RouteFinder, RouteInvariantError, RouteRequest, RoutedLink, SearchState};
pub use grid::{route_cells, CellLinks, CellRect, GridPos, SparseGrid};
pub use labels::{place_labels, LabelSummary};
pub use queue::PriorityQueue;
pub use router::{LinkRouter, RoutingSummary};

use tracing::debug;

use crate::config::LayoutConfig;
use crate::model::Topology;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutSummary {
    pub routing: RoutingSummary,
    /// `None` when label placement is disabled.
    pub labels: Option<LabelSummary>,
}

/// Routes every unrouted link of `topo`, then places missing node labels.
///
/// A [`RouteInvariantError`] means the router's own bookkeeping broke; it is never
/// returned for links that simply have no route. Treat it as fatal: `topo` may
/// hold a partial set of routes, so abort instead of retrying or using the result.
pub fn layout_topology(topo: &mut Topology, config: &LayoutConfig) -> Result<LayoutSummary, RouteInvariantError> {
    let mut router = LinkRouter::new(topo, config.router);
    router.expand_extents(config.extents_margin);
    debug!(
        nodes = topo.nodes().len(),
        links = topo.links().len(),
        extents = ?router.extents(),
        "routing topology"
    );

    let routing = router.route_links(topo)?;
    let labels = config.place_labels.then(|| place_labels(topo));

    Ok(LayoutSummary { routing, labels })
}
