use std::collections::HashSet;

use anyhow::{Context, Result, anyhow};
use glam::Vec3;
use log::warn;
use serde::Deserialize;

use crate::util::stable_triple;

use super::model::{GraphDataset, Link, Node};

/// Radius of the cloud freshly loaded nodes are scattered over before the
/// simulation takes ownership of positions.
const INITIAL_SPREAD: f32 = 600.0;

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default, rename = "fileSize")]
    file_size: u64,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawLink {
    source: String,
    target: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

/// Parse one dataset document. Duplicate node ids keep the first occurrence;
/// links naming an unknown node are dropped rather than crashing the
/// clustering and force passes downstream.
pub fn parse_dataset(raw: &str) -> Result<GraphDataset> {
    let parsed: RawDataset =
        serde_json::from_str(raw).context("invalid dataset JSON")?;

    if parsed.nodes.is_empty() {
        return Err(anyhow!("dataset contains no nodes"));
    }

    let mut seen = HashSet::with_capacity(parsed.nodes.len());
    let mut nodes = Vec::with_capacity(parsed.nodes.len());
    for raw_node in parsed.nodes {
        if raw_node.id.is_empty() {
            warn!("dropping node with empty id");
            continue;
        }
        if !seen.insert(raw_node.id.clone()) {
            warn!("dropping duplicate node id {}", raw_node.id);
            continue;
        }

        let (jx, jy, jz) = stable_triple(&raw_node.id);
        nodes.push(Node {
            position: Vec3::new(jx, jy, jz) * INITIAL_SPREAD,
            velocity: Vec3::ZERO,
            fixed: None,
            color: [255, 255, 255],
            id: raw_node.id,
            group: raw_node.user,
            size: raw_node.file_size,
            description: raw_node.description,
        });
    }

    if nodes.is_empty() {
        return Err(anyhow!("dataset contains no usable nodes"));
    }

    let mut links = Vec::with_capacity(parsed.links.len());
    for raw_link in parsed.links {
        if seen.contains(&raw_link.source) && seen.contains(&raw_link.target) {
            links.push(Link {
                source: raw_link.source,
                target: raw_link.target,
                color: [255, 255, 255],
            });
        } else {
            warn!(
                "dropping dangling link {} -> {}",
                raw_link.source, raw_link.target
            );
        }
    }

    Ok(GraphDataset { nodes, links })
}
