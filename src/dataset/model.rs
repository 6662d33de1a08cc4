use std::collections::{HashMap, HashSet};

use glam::Vec3;

/// Navigation tier. `Top` shows the inter-repository graph, `Module` the
/// files within one repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Level {
    Top,
    Module(String),
}

impl Level {
    pub fn label(&self) -> &str {
        match self {
            Self::Top => "root",
            Self::Module(scope) => scope.as_str(),
        }
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Self::Top)
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    /// Owning user/package key; drives clustering and the package force.
    /// Computed at load time, immutable for the dataset's lifetime.
    pub group: Option<String>,
    pub size: u64,
    pub description: Option<String>,
    pub color: [u8; 3],
    pub position: Vec3,
    pub velocity: Vec3,
    /// When set, the simulation pins the node here instead of integrating.
    pub fixed: Option<Vec3>,
}

#[derive(Clone, Debug)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub color: [u8; 3],
}

/// One level's worth of nodes and links, replaced wholesale on navigation.
#[derive(Clone, Debug, Default)]
pub struct GraphDataset {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl GraphDataset {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn index_by_id(&self) -> HashMap<String, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id.clone(), index))
            .collect()
    }

    /// Ids appearing as source or target of at least one link.
    pub fn linked_ids(&self) -> HashSet<&str> {
        let mut linked = HashSet::with_capacity(self.links.len() * 2);
        for link in &self.links {
            linked.insert(link.source.as_str());
            linked.insert(link.target.as_str());
        }
        linked
    }

    /// Min/max of the size metric, for visual radius normalization.
    pub fn size_bounds(&self) -> (u64, u64) {
        let mut min = u64::MAX;
        let mut max = 0u64;
        for node in &self.nodes {
            min = min.min(node.size);
            max = max.max(node.size);
        }
        if min == u64::MAX {
            (0, 0)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
pub(crate) fn test_node(id: &str, group: Option<&str>) -> Node {
    Node {
        id: id.to_string(),
        group: group.map(str::to_string),
        size: 0,
        description: None,
        color: [0, 0, 0],
        position: Vec3::ZERO,
        velocity: Vec3::ZERO,
        fixed: None,
    }
}

#[cfg(test)]
pub(crate) fn test_link(source: &str, target: &str) -> Link {
    Link {
        source: source.to_string(),
        target: target.to_string(),
        color: [0, 0, 0],
    }
}
