use super::color::{spectral, turbo};
use super::model::GraphDataset;

/// Post-load normalization pass, applied exactly once per dataset.
///
/// The documents store links dependency -> dependent; the display convention
/// is the reverse, so every link is swapped here, once, before any physics
/// or rendering touches the dataset. Colors are a function of load order,
/// not identity: node `i` of `n` gets `spectral(i / n)`, link `j` of `m`
/// gets `turbo(j / m)`.
///
/// Not idempotent: calling this twice un-reverses the links. The navigator
/// owns the single call site.
pub fn normalize(dataset: &mut GraphDataset) {
    for link in &mut dataset.links {
        std::mem::swap(&mut link.source, &mut link.target);
    }

    let node_count = dataset.nodes.len();
    for (index, node) in dataset.nodes.iter_mut().enumerate() {
        node.color = spectral(index as f32 / node_count as f32);
    }

    let link_count = dataset.links.len();
    for (index, link) in dataset.links.iter_mut().enumerate() {
        link.color = turbo(index as f32 / link_count as f32);
    }
}

#[cfg(test)]
mod tests {
    use super::super::color::spectral;
    use super::super::model::{GraphDataset, test_link, test_node};
    use super::*;

    fn scenario_a() -> GraphDataset {
        GraphDataset {
            nodes: vec![
                test_node("x", None),
                test_node("y", None),
                test_node("z", None),
            ],
            links: vec![test_link("x", "y")],
        }
    }

    #[test]
    fn reverses_every_link_exactly_once() {
        let mut dataset = scenario_a();
        normalize(&mut dataset);

        assert_eq!(dataset.links[0].source, "y");
        assert_eq!(dataset.links[0].target, "x");
    }

    #[test]
    fn double_application_undoes_the_reversal() {
        // Pins the single-application semantics by showing what the
        // misuse looks like.
        let mut dataset = scenario_a();
        normalize(&mut dataset);
        normalize(&mut dataset);

        assert_eq!(dataset.links[0].source, "x");
        assert_eq!(dataset.links[0].target, "y");
    }

    #[test]
    fn node_color_inputs_stay_in_the_half_open_domain() {
        let mut dataset = scenario_a();
        normalize(&mut dataset);

        let n = dataset.nodes.len();
        for (index, node) in dataset.nodes.iter().enumerate() {
            assert_eq!(node.color, spectral(index as f32 / n as f32));
        }
    }

    #[test]
    fn single_node_maps_to_gradient_zero() {
        let mut dataset = GraphDataset {
            nodes: vec![test_node("only", None)],
            links: vec![],
        };
        normalize(&mut dataset);

        assert_eq!(dataset.nodes[0].color, spectral(0.0));
    }

    #[test]
    fn recoloring_the_same_load_order_is_stable() {
        let mut first = scenario_a();
        let mut second = scenario_a();
        normalize(&mut first);
        normalize(&mut second);

        for (a, b) in first.nodes.iter().zip(second.nodes.iter()) {
            assert_eq!(a.color, b.color);
        }
        for (a, b) in first.links.iter().zip(second.links.iter()) {
            assert_eq!(a.color, b.color);
        }
    }
}
