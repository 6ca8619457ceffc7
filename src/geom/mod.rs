// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Continuous 2D geometry used for routes.

pub mod polyline;
pub mod vec2;

pub use polyline::{Polyline, COLINEAR_THRESHOLD};
pub use vec2::Vec2;
