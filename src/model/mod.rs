// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Topology data model.
//!
//! A topology holds positioned nodes and the links between them, keyed by typed ids.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod topology;

pub use ids::{Id, IdError, LinkId, NodeId};
pub use topology::{LabelAnchor, Link, Node, NodeExtents, Topology, TopologyError};
