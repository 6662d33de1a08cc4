use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, Ui, vec2};
use glam::Vec3;

use crate::util::{format_bytes, short_name, trimmed_id};

use super::super::camera::FOCUS_SECONDS;
use super::super::navigator::LevelNavigator;
use super::super::physics::step_simulation;
use super::super::render_utils::{
    Projection, draw_background, node_world_radius, to_color32,
};
use super::super::{PendingDrill, ProjectedNode, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui, navigator: &mut LevelNavigator) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);

        let now = ui.ctx().input(|input| input.time);
        let dt = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);

        let physics_moving = step_simulation(&mut self.graph, &self.physics);

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.choreographer.manual_orbit(delta.x, delta.y);
        }
        self.handle_dolly(ui, &response);

        // The tour focuses the next node once the per-step delay elapses.
        if let Some(node_id) = self.choreographer.tour_due(now) {
            if let Some(&index) = self.graph.index_by_id.get(&node_id) {
                let target = self.graph.dataset.nodes[index].position;
                self.choreographer.focus_on(target, now);
                self.selected = Some(node_id);
            }
        }

        self.choreographer.tick(now, dt, response.dragged());

        let projection = Projection::new(self.choreographer.camera(), rect);
        let node_count = self.graph.dataset.nodes.len();
        let (min_size, max_size) = (self.graph.min_size, self.graph.max_size);

        let scratch = &mut self.graph.scratch;
        scratch.projected.clear();
        for node in &self.graph.dataset.nodes {
            scratch.projected.push(projection.project(node.position).map(
                |(screen, scale, depth)| ProjectedNode {
                    screen,
                    radius: (node_world_radius(node.size, min_size, max_size) * scale)
                        .clamp(1.5, 60.0),
                    depth,
                },
            ));
        }

        // Painter's order: farthest nodes first.
        scratch.draw_order.clear();
        scratch.draw_order.extend(0..node_count);
        scratch
            .draw_order
            .retain(|&index| scratch.projected[index].is_some());
        scratch.draw_order.sort_by(|a, b| {
            let depth_a = scratch.projected[*a].map(|p| p.depth).unwrap_or(0.0);
            let depth_b = scratch.projected[*b].map(|p| p.depth).unwrap_or(0.0);
            depth_b.total_cmp(&depth_a)
        });

        for link in &self.graph.links {
            let (Some(start), Some(end)) = (
                self.graph.scratch.projected[link.source],
                self.graph.scratch.projected[link.target],
            ) else {
                continue;
            };
            painter.line_segment(
                [start.screen, end.screen],
                Stroke::new(1.2, to_color32(link.color).gamma_multiply(0.75)),
            );
        }

        let hovered = self.hovered_index(ui);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }
        let hovered_index = hovered.map(|(index, _)| index);

        let clicked_node = if response.clicked_by(egui::PointerButton::Primary) {
            hovered_index.and_then(|index| {
                self.graph
                    .dataset
                    .nodes
                    .get(index)
                    .map(|node| (node.id.clone(), node.position))
            })
        } else {
            None
        };
        if response.clicked_by(egui::PointerButton::Secondary) && hovered.is_none() {
            self.choreographer.toggle_orbit();
        }

        for index in self.graph.scratch.draw_order.iter().copied() {
            let Some(projected) = self.graph.scratch.projected[index] else {
                continue;
            };
            let node = &self.graph.dataset.nodes[index];

            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_hovered = hovered_index == Some(index);

            let color = if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else {
                to_color32(node.color)
            };
            painter.circle_filled(projected.screen, projected.radius, color);
            if is_selected {
                painter.circle_stroke(
                    projected.screen,
                    projected.radius + 3.0,
                    Stroke::new(2.0, Color32::from_rgb(245, 206, 93)),
                );
            }

            if is_selected || is_hovered || projected.radius > 14.0 {
                painter.text(
                    projected.screen + vec2(projected.radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    short_name(&node.id),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(index) = hovered_index {
            let node = &self.graph.dataset.nodes[index];
            let group = node.group.as_deref().unwrap_or("unknown");
            let mut overlay = format!(
                "{}  |  {}  |  {group}",
                trimmed_id(&node.id),
                format_bytes(node.size)
            );
            if let Some(description) = &node.description {
                overlay.push_str("  |  ");
                overlay.push_str(description);
            }
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                overlay,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if let Some((node_id, position)) = clicked_node {
            self.handle_node_click(node_id, position, now);
        }

        if let Some(pending) = &self.pending_drill {
            if now >= pending.due {
                let node_id = pending.node_id.clone();
                self.pending_drill = None;
                navigator.select(&node_id);
            }
        }

        if physics_moving
            || response.dragged()
            || navigator.is_loading()
            || self.choreographer.is_active()
            || self.pending_drill.is_some()
        {
            ui.ctx().request_repaint();
        }
    }

    /// A click always selects and focuses. At the top level it also queues a
    /// drill-down that fires once the focus transition has played out; file
    /// nodes at the module level are leaves and the click stays local.
    fn handle_node_click(&mut self, node_id: String, position: Vec3, now: f64) {
        self.choreographer.cancel_tour();
        self.choreographer.focus_on(position, now);
        if self.level.is_top() {
            self.pending_drill = Some(PendingDrill {
                node_id: node_id.clone(),
                due: now + FOCUS_SECONDS,
            });
        }
        self.selected = Some(node_id);
    }
}
