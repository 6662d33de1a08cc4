use std::collections::{HashMap, HashSet};

use glam::Vec3;

use crate::dataset::GraphDataset;

/// Final camera distance from a focused node.
const FOCUS_DISTANCE: f32 = 200.0;
/// Duration of a click-focus transition, seconds.
pub(super) const FOCUS_SECONDS: f64 = 1.4;
/// Home position after a dataset swap.
const HOME_DISTANCE: f32 = 4400.0;
const HOME_SECONDS: f64 = 1.9;
/// Idle-orbit angular velocity, radians per second.
const ORBIT_RATE: f32 = std::f32::consts::PI / 3.0;
/// Pause on each node during a tour, seconds.
const TOUR_STEP_SECONDS: f64 = 2.5;

const DRAG_SENSITIVITY: f32 = 0.005;
const MAX_PITCH: f32 = 1.5;

#[derive(Clone, Copy)]
pub(super) struct OrbitCamera {
    pub(super) position: Vec3,
    pub(super) look_at: Vec3,
}

struct CameraTween {
    from_position: Vec3,
    to_position: Vec3,
    from_look: Vec3,
    to_look: Vec3,
    start: f64,
    duration: f64,
}

struct TourState {
    sequences: Vec<Vec<String>>,
    sequence_index: usize,
    node_index: usize,
    next_step_at: f64,
}

fn ease_out_cubic(t: f32) -> f32 {
    let u = t - 1.0;
    u * u * u + 1.0
}

/// Owns all camera motion state: the click-focus tween, the idle orbit and
/// the auto-navigation tour. Nothing here is ambient module state; input
/// handlers call in explicitly.
pub(super) struct CameraChoreographer {
    camera: OrbitCamera,
    tween: Option<CameraTween>,
    orbit_enabled: bool,
    orbit_angle: Option<f32>,
    tour: Option<TourState>,
}

impl CameraChoreographer {
    pub(super) fn new() -> Self {
        Self {
            camera: OrbitCamera {
                position: Vec3::new(0.0, 0.0, HOME_DISTANCE),
                look_at: Vec3::ZERO,
            },
            tween: None,
            orbit_enabled: true,
            orbit_angle: None,
            tour: None,
        }
    }

    pub(super) fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Fly to a node: the destination sits on the ray from the origin
    /// through the node, a fixed distance past it. A node at the origin has
    /// no usable direction, so the camera aims down the z axis instead.
    pub(super) fn focus_on(&mut self, target: Vec3, now: f64) {
        let length = target.length();
        let destination = if length > f32::EPSILON {
            target * (1.0 + FOCUS_DISTANCE / length)
        } else {
            Vec3::new(0.0, 0.0, FOCUS_DISTANCE)
        };

        self.orbit_enabled = false;
        self.orbit_angle = None;
        self.start_tween(destination, target, now, FOCUS_SECONDS);
    }

    /// Pull back to the home view; used after every dataset swap.
    pub(super) fn reset(&mut self, now: f64) {
        self.tour = None;
        self.orbit_angle = None;
        self.start_tween(
            Vec3::new(0.0, 0.0, HOME_DISTANCE),
            Vec3::ZERO,
            now,
            HOME_SECONDS,
        );
    }

    fn start_tween(&mut self, to_position: Vec3, to_look: Vec3, now: f64, duration: f64) {
        self.tween = Some(CameraTween {
            from_position: self.camera.position,
            to_position,
            from_look: self.camera.look_at,
            to_look,
            start: now,
            duration,
        });
    }

    pub(super) fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub(super) fn orbit_enabled(&self) -> bool {
        self.orbit_enabled
    }

    pub(super) fn set_orbit(&mut self, enabled: bool) {
        self.orbit_enabled = enabled;
        if !enabled {
            self.orbit_angle = None;
        }
    }

    pub(super) fn toggle_orbit(&mut self) {
        self.set_orbit(!self.orbit_enabled);
    }

    /// A primary drag takes manual control: it cancels any tween, kills the
    /// idle orbit and rotates the camera around the look-at point.
    pub(super) fn manual_orbit(&mut self, dx: f32, dy: f32) {
        self.tween = None;
        self.set_orbit(false);

        let offset = self.camera.position - self.camera.look_at;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let mut yaw = offset.x.atan2(offset.z);
        let mut pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
        yaw -= dx * DRAG_SENSITIVITY;
        pitch = (pitch + dy * DRAG_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);

        self.camera.position = self.camera.look_at
            + Vec3::new(
                radius * pitch.cos() * yaw.sin(),
                radius * pitch.sin(),
                radius * pitch.cos() * yaw.cos(),
            );
    }

    /// Scroll dolly: scales the camera's offset from the look-at point.
    pub(super) fn dolly(&mut self, factor: f32) {
        let offset = self.camera.position - self.camera.look_at;
        let scaled = offset * factor;
        if scaled.length() >= 1.0 {
            self.camera.position = self.camera.look_at + scaled;
        }
    }

    pub(super) fn start_tour(&mut self, dataset: &GraphDataset, now: f64) {
        self.tour = Some(TourState {
            sequences: compute_sequences(dataset),
            sequence_index: 0,
            node_index: 0,
            next_step_at: now,
        });
    }

    pub(super) fn cancel_tour(&mut self) {
        self.tour = None;
    }

    pub(super) fn tour_active(&self) -> bool {
        self.tour.is_some()
    }

    /// Next tour stop if its delay has elapsed. Cancellation is a checkpoint
    /// between steps; a running focus transition is never interrupted.
    pub(super) fn tour_due(&mut self, now: f64) -> Option<String> {
        let tour = self.tour.as_mut()?;
        if now < tour.next_step_at {
            return None;
        }

        while tour.sequence_index < tour.sequences.len() {
            let sequence = &tour.sequences[tour.sequence_index];
            if tour.node_index < sequence.len() {
                let node_id = sequence[tour.node_index].clone();
                tour.node_index += 1;
                tour.next_step_at = now + TOUR_STEP_SECONDS;
                return Some(node_id);
            }
            tour.sequence_index += 1;
            tour.node_index = 0;
        }

        self.tour = None;
        None
    }

    /// Per-frame camera update: advances the active tween, otherwise the
    /// idle orbit (when enabled and the user is not dragging).
    pub(super) fn tick(&mut self, now: f64, dt: f32, drag_active: bool) {
        if let Some(tween) = &self.tween {
            let t = ((now - tween.start) / tween.duration).clamp(0.0, 1.0) as f32;
            let eased = ease_out_cubic(t);
            self.camera.position = tween.from_position.lerp(tween.to_position, eased);
            self.camera.look_at = tween.from_look.lerp(tween.to_look, eased);
            if t >= 1.0 {
                self.tween = None;
            }
            return;
        }

        if !self.orbit_enabled || drag_active {
            return;
        }

        let offset = self.camera.position - self.camera.look_at;
        let radius = (offset.x * offset.x + offset.z * offset.z).sqrt();
        if radius <= f32::EPSILON {
            return;
        }

        let angle = self.orbit_angle.unwrap_or_else(|| offset.x.atan2(offset.z))
            + ORBIT_RATE * dt;
        self.orbit_angle = Some(angle);
        self.camera.position = self.camera.look_at
            + Vec3::new(radius * angle.sin(), offset.y, radius * angle.cos());
    }

    pub(super) fn is_active(&self) -> bool {
        self.tween.is_some() || self.orbit_enabled || self.tour.is_some()
    }
}

/// Tour traversal order: one depth-first visit sequence per connected
/// component (links treated as undirected), components ordered longest
/// first. The walk uses an explicit stack; neighbors are pushed in reverse
/// so the visit order matches a plain recursive descent.
pub(super) fn compute_sequences(dataset: &GraphDataset) -> Vec<Vec<String>> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for link in &dataset.links {
        adjacency
            .entry(link.source.as_str())
            .or_default()
            .push(link.target.as_str());
        adjacency
            .entry(link.target.as_str())
            .or_default()
            .push(link.source.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::with_capacity(dataset.nodes.len());
    let mut sequences = Vec::new();

    for node in &dataset.nodes {
        if visited.contains(node.id.as_str()) {
            continue;
        }

        let mut sequence = Vec::new();
        let mut stack = vec![node.id.as_str()];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            sequence.push(current.to_string());

            if let Some(neighbors) = adjacency.get(current) {
                for neighbor in neighbors.iter().rev() {
                    if !visited.contains(neighbor) {
                        stack.push(neighbor);
                    }
                }
            }
        }
        sequences.push(sequence);
    }

    sequences.sort_by(|a, b| b.len().cmp(&a.len()));
    sequences
}

#[cfg(test)]
mod tests {
    use crate::dataset::{GraphDataset, test_link, test_node};

    use super::*;

    fn graph(nodes: &[&str], links: &[(&str, &str)]) -> GraphDataset {
        GraphDataset {
            nodes: nodes.iter().map(|id| test_node(id, None)).collect(),
            links: links
                .iter()
                .map(|(source, target)| test_link(source, target))
                .collect(),
        }
    }

    #[test]
    fn focus_destination_sits_past_the_node_on_its_ray() {
        let mut choreographer = CameraChoreographer::new();
        let target = Vec3::new(300.0, 400.0, 0.0); // length 500
        choreographer.focus_on(target, 0.0);

        // Run the tween to completion.
        choreographer.tick(FOCUS_SECONDS + 0.1, 0.016, false);

        let camera = choreographer.camera();
        assert!((camera.position - target).length() - FOCUS_DISTANCE < 1e-2);
        assert_eq!(camera.look_at, target);
        // Destination is the node scaled outward, not offset arbitrarily.
        let expected = target * (1.0 + FOCUS_DISTANCE / 500.0);
        assert!((camera.position - expected).length() < 1e-2);
    }

    #[test]
    fn focusing_the_origin_aims_down_the_z_axis() {
        let mut choreographer = CameraChoreographer::new();
        choreographer.focus_on(Vec3::ZERO, 0.0);
        choreographer.tick(FOCUS_SECONDS + 0.1, 0.016, false);

        let camera = choreographer.camera();
        assert!(camera.position.is_finite());
        assert!((camera.position - Vec3::new(0.0, 0.0, FOCUS_DISTANCE)).length() < 1e-2);
    }

    #[test]
    fn focus_disables_the_idle_orbit() {
        let mut choreographer = CameraChoreographer::new();
        assert!(choreographer.orbit_enabled());
        choreographer.focus_on(Vec3::new(100.0, 0.0, 0.0), 0.0);
        assert!(!choreographer.orbit_enabled());
    }

    #[test]
    fn idle_orbit_preserves_height_and_radius() {
        let mut choreographer = CameraChoreographer::new();
        choreographer.camera.position = Vec3::new(0.0, 250.0, 1000.0);

        let before = choreographer.camera.position;
        for _ in 0..10 {
            choreographer.tick(0.0, 0.02, false);
        }
        let after = choreographer.camera.position;

        assert_eq!(after.y, before.y);
        let radius = |p: Vec3| (p.x * p.x + p.z * p.z).sqrt();
        assert!((radius(after) - radius(before)).abs() < 1e-2);
        assert!((after - before).length() > 1.0, "camera must actually move");
    }

    #[test]
    fn dragging_suspends_the_idle_orbit() {
        let mut choreographer = CameraChoreographer::new();
        let before = choreographer.camera.position;
        choreographer.tick(0.0, 0.02, true);
        assert_eq!(choreographer.camera.position, before);
    }

    #[test]
    fn tour_visits_every_node_with_longest_component_first() {
        let dataset = graph(
            &["solo", "a", "b", "c"],
            &[("a", "b"), ("a", "c")],
        );
        let mut choreographer = CameraChoreographer::new();
        choreographer.start_tour(&dataset, 0.0);

        let mut visited = Vec::new();
        let mut now = 0.0;
        while choreographer.tour_active() {
            if let Some(id) = choreographer.tour_due(now) {
                visited.push(id);
            }
            now += TOUR_STEP_SECONDS;
        }

        // Component [a, b, c] is longer than [solo], so it comes first, in
        // depth-first order.
        assert_eq!(visited, vec!["a", "b", "c", "solo"]);
    }

    #[test]
    fn tour_steps_respect_the_inter_node_delay() {
        let dataset = graph(&["a", "b"], &[("a", "b")]);
        let mut choreographer = CameraChoreographer::new();
        choreographer.start_tour(&dataset, 0.0);

        assert_eq!(choreographer.tour_due(0.0).as_deref(), Some("a"));
        assert!(choreographer.tour_due(TOUR_STEP_SECONDS / 2.0).is_none());
        assert_eq!(
            choreographer.tour_due(TOUR_STEP_SECONDS).as_deref(),
            Some("b")
        );
    }

    #[test]
    fn cancelling_a_tour_stops_it_at_the_next_checkpoint() {
        let dataset = graph(&["a", "b"], &[("a", "b")]);
        let mut choreographer = CameraChoreographer::new();
        choreographer.start_tour(&dataset, 0.0);
        assert!(choreographer.tour_due(0.0).is_some());

        choreographer.cancel_tour();
        assert!(!choreographer.tour_active());
        assert!(choreographer.tour_due(TOUR_STEP_SECONDS).is_none());
    }

    #[test]
    fn sequences_match_recursive_depth_first_order() {
        // a-b, b-d, a-c: recursion visits a, b, d, then backtracks to c.
        let dataset = graph(&["a", "b", "c", "d"], &[("a", "b"), ("b", "d"), ("a", "c")]);
        let sequences = compute_sequences(&dataset);

        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0], vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn isolates_become_single_node_sequences() {
        let dataset = graph(&["x", "y"], &[]);
        let sequences = compute_sequences(&dataset);
        assert_eq!(sequences.len(), 2);
        assert!(sequences.iter().all(|sequence| sequence.len() == 1));
    }

    #[test]
    fn dolly_never_collapses_onto_the_look_at_point() {
        let mut choreographer = CameraChoreographer::new();
        choreographer.camera.position = Vec3::new(0.0, 0.0, 2.0);
        for _ in 0..100 {
            choreographer.dolly(0.5);
        }
        assert!((choreographer.camera.position - choreographer.camera.look_at).length() >= 1.0);
    }
}
