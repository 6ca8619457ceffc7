// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Linkmap — grid routing and label placement for network topology maps.
//!
//! Nodes carry fixed grid positions; [`layout::layout_topology`] routes every link
//! through the grid with a penalty-aware A* search and then picks a label
//! direction for each node.

pub mod config;
pub mod geom;
pub mod layout;
pub mod model;
