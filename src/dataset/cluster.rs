use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec3;

use super::model::GraphDataset;

/// Ring radius of the first isolate group; each later group sits one band
/// further out, so no two groups share a radius.
const BASE_RADIUS: f32 = 300.0;
/// Z offset between group rings.
const Z_STAGGER: f32 = 100.0;

/// Bucket for isolates without a group key.
const DEFAULT_GROUP: &str = "unknown";

/// Pins every isolated node (no incident link) onto a per-group ring so
/// disconnected nodes neither pile up at the origin nor drift with the
/// simulation. Linked nodes are left untouched. One-shot per load; the
/// assignments are discarded with the dataset on the next navigation.
pub fn cluster_isolates(dataset: &mut GraphDataset) {
    let linked = dataset.linked_ids();
    let isolated = dataset
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !linked.contains(node.id.as_str()))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    if isolated.is_empty() {
        return;
    }

    // Group in first-encounter order so ring assignment is stable per load.
    let mut group_order = Vec::new();
    let mut members_by_group: HashMap<&str, Vec<usize>> = HashMap::new();
    for &index in &isolated {
        let key = dataset.nodes[index]
            .group
            .as_deref()
            .unwrap_or(DEFAULT_GROUP);
        let members = members_by_group.entry(key).or_default();
        if members.is_empty() {
            group_order.push(key);
        }
        members.push(index);
    }

    let mut placements = Vec::with_capacity(isolated.len());
    for (group_ordinal, key) in group_order.iter().enumerate() {
        let members = &members_by_group[key];
        let radius = BASE_RADIUS * (group_ordinal + 1) as f32;
        let angle_step = TAU / members.len() as f32;

        for (member_ordinal, &index) in members.iter().enumerate() {
            let theta = member_ordinal as f32 * angle_step;
            placements.push((
                index,
                Vec3::new(
                    radius * theta.cos(),
                    radius * theta.sin(),
                    group_ordinal as f32 * Z_STAGGER,
                ),
            ));
        }
    }

    for (index, position) in placements {
        let node = &mut dataset.nodes[index];
        node.fixed = Some(position);
        node.position = position;
        node.velocity = Vec3::ZERO;
    }
}
