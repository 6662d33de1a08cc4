mod forces;

use glam::Vec3;

use crate::dataset::Node;

use super::ActiveGraph;
use forces::{PackageParams, apply_package_force};

const ALPHA_MIN: f32 = 0.001;

/// Layout tunables. The package-force pair keeps its sign relationship
/// (same group repels, cross group attracts) no matter how the magnitudes
/// are adjusted; flipping a sign breaks the clustering readability.
#[derive(Clone, Copy)]
pub(super) struct SimulationParams {
    pub(super) same_group_repulsion: f32,
    pub(super) cross_group_attraction: f32,
    pub(super) link_distance: f32,
    pub(super) link_strength: f32,
    pub(super) velocity_decay: f32,
    pub(super) alpha_decay: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            same_group_repulsion: 4800.0,
            cross_group_attraction: -280.0,
            link_distance: 120.0,
            link_strength: 0.05,
            velocity_decay: 0.4,
            alpha_decay: 0.0228,
        }
    }
}

/// One simulation tick: perturb velocities with the link springs and the
/// package force, then integrate. Runs until alpha has cooled below the
/// rest threshold; a dataset swap or a reheat starts it again at 1.
pub(super) fn step_simulation(graph: &mut ActiveGraph, params: &SimulationParams) -> bool {
    if graph.dataset.nodes.is_empty() || graph.alpha < ALPHA_MIN {
        return false;
    }

    let alpha = graph.alpha;
    apply_link_springs(graph, params, alpha);
    apply_package_force(
        &mut graph.dataset.nodes,
        alpha,
        &PackageParams {
            same_group_repulsion: params.same_group_repulsion,
            cross_group_attraction: params.cross_group_attraction,
        },
    );
    integrate(&mut graph.dataset.nodes, params.velocity_decay);

    graph.alpha *= 1.0 - params.alpha_decay;
    true
}

fn apply_link_springs(graph: &mut ActiveGraph, params: &SimulationParams, alpha: f32) {
    let nodes = &mut graph.dataset.nodes;
    for link in &graph.links {
        if link.source == link.target {
            continue;
        }

        let delta = nodes[link.target].position - nodes[link.source].position;
        let dist = delta.length().max(1.0);
        let displacement = (dist - params.link_distance) * params.link_strength * alpha;
        let push = delta * (displacement / dist);

        nodes[link.source].velocity += push;
        nodes[link.target].velocity -= push;
    }
}

fn integrate(nodes: &mut [Node], velocity_decay: f32) {
    for node in nodes {
        if let Some(fixed) = node.fixed {
            // Clustered isolates stay exactly where the clusterer put them.
            node.position = fixed;
            node.velocity = Vec3::ZERO;
        } else {
            node.velocity *= 1.0 - velocity_decay;
            node.position += node.velocity;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::dataset::{GraphDataset, test_link, test_node};

    use super::*;

    fn active_graph(mut dataset: GraphDataset) -> ActiveGraph {
        for (index, node) in dataset.nodes.iter_mut().enumerate() {
            node.position = Vec3::new(index as f32 * 50.0, 0.0, 0.0);
        }
        ActiveGraph::new(dataset)
    }

    #[test]
    fn fixed_nodes_do_not_integrate() {
        let mut dataset = GraphDataset {
            nodes: vec![test_node("pinned", None), test_node("free", None)],
            links: vec![],
        };
        let pin = Vec3::new(300.0, 0.0, 100.0);
        dataset.nodes[0].fixed = Some(pin);
        dataset.nodes[0].velocity = Vec3::new(9.0, 9.0, 9.0);

        let mut graph = active_graph(dataset);
        step_simulation(&mut graph, &SimulationParams::default());

        assert_eq!(graph.dataset.nodes[0].position, pin);
        assert_eq!(graph.dataset.nodes[0].velocity, Vec3::ZERO);
    }

    #[test]
    fn springs_pull_stretched_links_together() {
        let mut dataset = GraphDataset {
            nodes: vec![test_node("a", Some("g")), test_node("b", Some("g"))],
            links: vec![test_link("a", "b")],
        };
        dataset.nodes[0].position = Vec3::ZERO;
        dataset.nodes[1].position = Vec3::new(2000.0, 0.0, 0.0);

        let mut graph = ActiveGraph::new(dataset);
        let params = SimulationParams {
            // Silence the pair force so only the spring acts.
            same_group_repulsion: 0.0,
            cross_group_attraction: 0.0,
            ..SimulationParams::default()
        };
        let before = graph.dataset.nodes[1].position.x - graph.dataset.nodes[0].position.x;
        step_simulation(&mut graph, &params);
        let after = graph.dataset.nodes[1].position.x - graph.dataset.nodes[0].position.x;

        assert!(after < before);
    }

    #[test]
    fn simulation_cools_down_and_stops() {
        let dataset = GraphDataset {
            nodes: vec![test_node("a", None), test_node("b", None)],
            links: vec![],
        };
        let mut graph = active_graph(dataset);
        let params = SimulationParams::default();

        let mut ticks = 0usize;
        while step_simulation(&mut graph, &params) {
            ticks += 1;
            assert!(ticks < 10_000, "alpha never cooled below the threshold");
        }

        assert!(graph.alpha < ALPHA_MIN);
        assert!(!step_simulation(&mut graph, &params));
    }

    #[test]
    fn reheat_restarts_a_cooled_simulation() {
        let dataset = GraphDataset {
            nodes: vec![test_node("a", None), test_node("b", None)],
            links: vec![],
        };
        let mut graph = active_graph(dataset);
        graph.alpha = 0.0;
        assert!(!step_simulation(&mut graph, &SimulationParams::default()));

        graph.reheat();
        assert!(step_simulation(&mut graph, &SimulationParams::default()));
    }
}
