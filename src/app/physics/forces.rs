use crate::dataset::Node;

pub(super) struct PackageParams {
    pub(super) same_group_repulsion: f32,
    pub(super) cross_group_attraction: f32,
}

/// The package cohesion force: every unordered node pair interacts, with
/// same-group pairs pushed apart for readability and cross-group pairs
/// pulled together so packages condense visually.
///
/// Direct O(n^2) over the pair set; per-level node counts stay small after
/// the hierarchy split, so no spatial partitioning is attempted here. The
/// distance is floored at 1 so coincident nodes never divide by zero, and
/// the contribution is a velocity perturbation only; integration happens in
/// the caller's tick.
pub(super) fn apply_package_force(nodes: &mut [Node], alpha: f32, params: &PackageParams) {
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let delta = nodes[j].position - nodes[i].position;
            let dist = delta.length().max(1.0);

            let same_group = nodes[i].group == nodes[j].group;
            let strength = if same_group {
                params.same_group_repulsion
            } else {
                params.cross_group_attraction
            };

            let magnitude = strength * alpha / dist;
            let push = delta * (magnitude / dist);

            nodes[i].velocity -= push;
            nodes[j].velocity += push;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::dataset::test_node;

    use super::*;

    const PARAMS: PackageParams = PackageParams {
        same_group_repulsion: 4800.0,
        cross_group_attraction: -280.0,
    };

    fn pair(group_a: Option<&str>, group_b: Option<&str>) -> Vec<Node> {
        let mut a = test_node("a", group_a);
        let mut b = test_node("b", group_b);
        a.position = Vec3::new(-10.0, 3.0, 7.0);
        b.position = Vec3::new(25.0, -4.0, -1.0);
        vec![a, b]
    }

    #[test]
    fn forces_obey_newtons_third_law() {
        let mut nodes = pair(Some("alice"), Some("bob"));
        apply_package_force(&mut nodes, 0.7, &PARAMS);

        let va = nodes[0].velocity;
        let vb = nodes[1].velocity;
        assert_eq!(va.x, -vb.x);
        assert_eq!(va.y, -vb.y);
        assert_eq!(va.z, -vb.z);
        assert!(va.length() > 0.0);
    }

    #[test]
    fn same_group_pairs_are_pushed_apart() {
        let mut nodes = pair(Some("alice"), Some("alice"));
        let axis = nodes[1].position - nodes[0].position;
        apply_package_force(&mut nodes, 1.0, &PARAMS);

        // Relative velocity along the pair axis grows: they separate.
        let relative = nodes[1].velocity - nodes[0].velocity;
        assert!(relative.dot(axis) > 0.0);
    }

    #[test]
    fn cross_group_pairs_are_pulled_together() {
        let mut nodes = pair(Some("alice"), Some("bob"));
        let axis = nodes[1].position - nodes[0].position;
        apply_package_force(&mut nodes, 1.0, &PARAMS);

        let relative = nodes[1].velocity - nodes[0].velocity;
        assert!(relative.dot(axis) < 0.0);
    }

    #[test]
    fn missing_groups_count_as_the_same_group() {
        let mut nodes = pair(None, None);
        let axis = nodes[1].position - nodes[0].position;
        apply_package_force(&mut nodes, 1.0, &PARAMS);

        let relative = nodes[1].velocity - nodes[0].velocity;
        assert!(relative.dot(axis) > 0.0);
    }

    #[test]
    fn coincident_nodes_produce_no_nan() {
        let mut nodes = pair(Some("alice"), Some("alice"));
        nodes[1].position = nodes[0].position;
        apply_package_force(&mut nodes, 1.0, &PARAMS);

        for node in &nodes {
            assert!(node.velocity.is_finite());
        }
    }

    #[test]
    fn force_scales_with_alpha() {
        let mut hot = pair(Some("alice"), Some("alice"));
        let mut cool = pair(Some("alice"), Some("alice"));
        apply_package_force(&mut hot, 1.0, &PARAMS);
        apply_package_force(&mut cool, 0.1, &PARAMS);

        assert!(hot[0].velocity.length() > cool[0].velocity.length());
    }
}
