// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Nereid and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use super::ids::{IdError, LinkId, NodeId};
use crate::geom::{Polyline, Vec2};
use crate::layout::direction::{Direction, ParseDirectionError};
use crate::layout::grid::{CellRect, GridPos};

/// A network map: positioned nodes and the links between them.
///
/// Both collections are id-ordered, so anything iterating them is deterministic.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Topology {
    nodes: BTreeMap<NodeId, Node>,
    links: BTreeMap<LinkId, Link>,
}

impl Topology {
    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut BTreeMap<NodeId, Node> {
        &mut self.nodes
    }

    pub fn links(&self) -> &BTreeMap<LinkId, Link> {
        &self.links
    }

    pub fn links_mut(&mut self) -> &mut BTreeMap<LinkId, Link> {
        &mut self.links
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id)
    }

    pub fn link_mut(&mut self, id: &LinkId) -> Option<&mut Link> {
        self.links.get_mut(id)
    }

    /// Grid position of a node, if the node exists and is placed.
    pub fn node_pos(&self, id: &NodeId) -> Option<GridPos> {
        self.nodes.get(id).and_then(Node::pos)
    }

    /// Parses the JSON topology format.
    ///
    /// `nodes` and `links` may each be an array of objects carrying an `id`, or an
    /// object keyed by id. Array links without an id are named `from-to`, with a
    /// `-2`, `-3`, ... suffix when that name is taken.
    pub fn from_json_str(json: &str) -> Result<Self, TopologyError> {
        let value = serde_json::from_str::<Value>(json).map_err(|source| TopologyError::Json { source })?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> Result<Self, TopologyError> {
        let Value::Object(mut top) = value else {
            return Err(TopologyError::NotAnObject);
        };

        let nodes = parse_nodes(top.remove("nodes").unwrap_or(Value::Null))?;
        let links = parse_links(top.remove("links").unwrap_or(Value::Null))?;

        Ok(Self { nodes, links })
    }

    pub fn to_json_string_pretty(&self) -> Result<String, TopologyError> {
        serde_json::to_string_pretty(self).map_err(|source| TopologyError::Json { source })
    }
}

impl<'de> Deserialize<'de> for Topology {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(value).map_err(de::Error::custom)
    }
}

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("invalid topology json")]
    Json {
        #[source]
        source: serde_json::Error,
    },
    #[error("topology must be a json object with \"nodes\" and \"links\"")]
    NotAnObject,
    #[error("\"{field}\" must be an array or object")]
    InvalidCollection { field: &'static str },
    #[error("node #{index} must have an id")]
    MissingNodeId { index: usize },
    #[error("invalid {kind} id {value:?}")]
    InvalidId {
        kind: &'static str,
        value: String,
        #[source]
        source: IdError,
    },
    #[error("duplicate node id '{id}'")]
    DuplicateNodeId { id: NodeId },
    #[error("duplicate link id '{id}'")]
    DuplicateLinkId { id: LinkId },
    #[error("invalid node '{id}'")]
    InvalidNode {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid link '{id}'")]
    InvalidLink {
        id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Removes and returns a non-empty string `id` field.
fn take_id(value: &mut Value) -> Option<String> {
    match value.as_object_mut()?.remove("id")? {
        Value::String(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

fn node_id(value: &str) -> Result<NodeId, TopologyError> {
    NodeId::new(value).map_err(|source| TopologyError::InvalidId {
        kind: "node",
        value: value.to_owned(),
        source,
    })
}

fn link_id(value: &str) -> Result<LinkId, TopologyError> {
    LinkId::new(value).map_err(|source| TopologyError::InvalidId {
        kind: "link",
        value: value.to_owned(),
        source,
    })
}

fn decode_node(id: &str, value: Value) -> Result<Node, TopologyError> {
    serde_json::from_value(value).map_err(|source| TopologyError::InvalidNode { id: id.to_owned(), source })
}

fn decode_link(id: &str, value: Value) -> Result<Link, TopologyError> {
    serde_json::from_value(value).map_err(|source| TopologyError::InvalidLink { id: id.to_owned(), source })
}

fn parse_nodes(raw: Value) -> Result<BTreeMap<NodeId, Node>, TopologyError> {
    let mut nodes = BTreeMap::<NodeId, Node>::new();
    match raw {
        Value::Null => {}
        Value::Array(items) => {
            for (index, mut item) in items.into_iter().enumerate() {
                let raw_id = take_id(&mut item).ok_or(TopologyError::MissingNodeId { index })?;
                let id = node_id(&raw_id)?;
                if nodes.contains_key(&id) {
                    return Err(TopologyError::DuplicateNodeId { id });
                }
                let node = decode_node(&raw_id, item)?;
                nodes.insert(id, node);
            }
        }
        Value::Object(map) => {
            for (raw_id, mut item) in map {
                take_id(&mut item);
                let id = node_id(&raw_id)?;
                let node = decode_node(&raw_id, item)?;
                nodes.insert(id, node);
            }
        }
        _ => return Err(TopologyError::InvalidCollection { field: "nodes" }),
    }
    Ok(nodes)
}

fn parse_links(raw: Value) -> Result<BTreeMap<LinkId, Link>, TopologyError> {
    let mut links = BTreeMap::<LinkId, Link>::new();
    match raw {
        Value::Null => {}
        Value::Array(items) => {
            for (index, mut item) in items.into_iter().enumerate() {
                let explicit = take_id(&mut item);
                let label = explicit.clone().unwrap_or_else(|| format!("#{index}"));
                let link = decode_link(&label, item)?;
                let id = match explicit {
                    Some(raw_id) => link_id(&raw_id)?,
                    None => auto_link_id(&links, &link)?,
                };
                if links.contains_key(&id) {
                    return Err(TopologyError::DuplicateLinkId { id });
                }
                links.insert(id, link);
            }
        }
        Value::Object(map) => {
            for (raw_id, mut item) in map {
                take_id(&mut item);
                let id = link_id(&raw_id)?;
                let link = decode_link(&raw_id, item)?;
                links.insert(id, link);
            }
        }
        _ => return Err(TopologyError::InvalidCollection { field: "links" }),
    }
    Ok(links)
}

fn auto_link_id(links: &BTreeMap<LinkId, Link>, link: &Link) -> Result<LinkId, TopologyError> {
    let base = format!("{}-{}", link.from(), link.to());
    let mut candidate = base.clone();
    let mut n = 2usize;
    while links.contains_key(candidate.as_str()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    link_id(&candidate)
}

/// Where a node's label sits relative to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelAnchor {
    /// In the neighbouring cell in this direction.
    Compass(Direction),
    /// Centred inside the node as given by the input; claims no extra cell.
    /// Label placement never picks it.
    Center,
}

impl LabelAnchor {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Compass(dir) => Some(dir),
            Self::Center => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compass(dir) => dir.as_str(),
            Self::Center => "c",
        }
    }
}

impl From<Direction> for LabelAnchor {
    fn from(dir: Direction) -> Self {
        Self::Compass(dir)
    }
}

impl fmt::Display for LabelAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelAnchor {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "center" | "centre" => Ok(Self::Center),
            _ => s.parse().map(Self::Compass),
        }
    }
}

impl Serialize for LabelAnchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

fn deserialize_label_at<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<LabelAnchor>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

/// Size of a multi-cell node, in grid cells, centred on the node position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeExtents {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pos: Option<GridPos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label_at", skip_serializing_if = "Option::is_none")]
    label_at: Option<LabelAnchor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extents: Option<NodeExtents>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    /// Renderer-facing fields (styles, data) carried through untouched.
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: i32, y: i32) -> Self {
        Self { pos: Some(GridPos::new(x, y)), ..Self::default() }
    }

    pub fn with_label_at(mut self, label_at: impl Into<LabelAnchor>) -> Self {
        self.label_at = Some(label_at.into());
        self
    }

    pub fn with_extents(mut self, width: f32, height: f32) -> Self {
        self.extents = Some(NodeExtents { width, height });
        self
    }

    pub fn pos(&self) -> Option<GridPos> {
        self.pos
    }

    pub fn set_pos(&mut self, pos: Option<GridPos>) {
        self.pos = pos;
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    pub fn label_at(&self) -> Option<LabelAnchor> {
        self.label_at
    }

    pub fn set_label_at(&mut self, label_at: Option<LabelAnchor>) {
        self.label_at = label_at;
    }

    pub fn extents(&self) -> Option<NodeExtents> {
        self.extents
    }

    pub fn set_extents(&mut self, extents: Option<NodeExtents>) {
        self.extents = extents;
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_class<T: Into<String>>(&mut self, class: Option<T>) {
        self.class = class.map(Into::into);
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// Continuous bounds `(min, max)` of a node with extents.
    pub fn extent_bounds(&self) -> Option<(Vec2, Vec2)> {
        let pos = self.pos?.to_vec2();
        let extents = self.extents?;
        let half = Vec2::new(extents.width, extents.height).div(2.0);
        Some((pos - half, pos + half))
    }

    /// Cells covered by a node with extents: `ceil(min)..ceil(max)` on each axis.
    pub fn footprint(&self) -> Option<CellRect> {
        let (min, max) = self.extent_bounds()?;
        let rect = CellRect {
            min: GridPos::new(min.x.ceil() as i32, min.y.ceil() as i32),
            max: GridPos::new(max.x.ceil() as i32, max.y.ceil() as i32),
        };
        (!rect.is_empty()).then_some(rect)
    }

    pub fn is_multi_cell(&self) -> bool {
        self.footprint().is_some_and(|rect| rect.width() * rect.height() > 1)
    }

    /// The cell claimed by this node's label, if it has a compass label direction.
    pub fn label_cell(&self) -> Option<GridPos> {
        let pos = self.pos?;
        let dir = self.label_at?.direction()?;
        Some(dir.step(pos))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    from: NodeId,
    to: NodeId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    via: Vec<GridPos>,
    #[serde(default, skip_serializing_if = "Polyline::is_empty")]
    route: Polyline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

impl Link {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            via: Vec::new(),
            route: Polyline::default(),
            class: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_via(mut self, via: impl IntoIterator<Item = GridPos>) -> Self {
        self.via = via.into_iter().collect();
        self
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn via(&self) -> &[GridPos] {
        &self.via
    }

    pub fn set_via(&mut self, via: Vec<GridPos>) {
        self.via = via;
    }

    /// The routed path; empty means "not routed" (or unroutable).
    pub fn route(&self) -> &Polyline {
        &self.route
    }

    pub fn set_route(&mut self, route: Polyline) {
        self.route = route;
    }

    pub fn is_routed(&self) -> bool {
        !self.route.is_empty()
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn set_class<T: Into<String>>(&mut self, class: Option<T>) {
        self.class = class.map(Into::into);
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }
}
