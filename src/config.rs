// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Router and pipeline configuration.
//!
//! Configuration files are JSON with kebab-case keys; every key is optional and
//! falls back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Knobs for [`crate::layout::LinkRouter`] and its route search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RouterConfig {
    /// Routes may not pass through cells occupied by nodes other than their endpoints.
    pub avoid_nodes: bool,
    /// Multi-cell goals may only be entered with a horizontal or vertical step.
    pub attach_multi_cells_cardinal: bool,
    /// Penalise cells beside other links as well as the cells they occupy.
    pub spread_links: bool,
    /// Restrict routes to horizontal and vertical steps.
    pub orthogonal: bool,
    /// Multiplier applied to the link occupancy penalty.
    pub link_penalty_weight: f32,
    /// Maximum states expanded per route search.
    pub search_limit: usize,
    /// Maximum fix-point rounds in the final routing pass.
    pub route_iter_limit: usize,
    /// Route the first pass in parallel against the initial occupancy.
    pub parallel_first_pass: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            avoid_nodes: true,
            attach_multi_cells_cardinal: true,
            spread_links: true,
            orthogonal: false,
            link_penalty_weight: 10.0,
            search_limit: 8192,
            route_iter_limit: 32,
            parallel_first_pass: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct LayoutConfig {
    pub router: RouterConfig,
    /// Cells added on every side of the derived routing extents.
    pub extents_margin: i32,
    pub place_labels: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { router: RouterConfig::default(), extents_margin: 1, place_labels: true }
    }
}

impl LayoutConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn to_json_string_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::{LayoutConfig, RouterConfig};

    #[test]
    fn empty_object_yields_defaults() {
        let config = LayoutConfig::from_json_str("{}").unwrap();
        assert_eq!(config, LayoutConfig::default());
        assert_eq!(config.router.link_penalty_weight, 10.0);
        assert_eq!(config.router.search_limit, 8192);
        assert_eq!(config.extents_margin, 1);
    }

    #[test]
    fn partial_router_section_keeps_other_defaults() {
        let config = LayoutConfig::from_json_str(
            r#"{ "router": { "orthogonal": true, "spread-links": false }, "place-labels": false }"#,
        )
        .unwrap();
        assert!(config.router.orthogonal);
        assert!(!config.router.spread_links);
        assert!(config.router.avoid_nodes);
        assert!(!config.place_labels);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LayoutConfig::from_json_str(r#"{ "router": { "avoid_nodes": false } }"#).unwrap_err();
        assert!(err.to_string().contains("avoid_nodes"), "{err}");
    }

    #[test]
    fn dumped_config_reads_back() {
        let config = LayoutConfig {
            router: RouterConfig { search_limit: 100, ..RouterConfig::default() },
            ..LayoutConfig::default()
        };
        let reparsed = LayoutConfig::from_json_str(&config.to_json_string_pretty()).unwrap();
        assert_eq!(reparsed, config);
    }
}
