use eframe::egui::{self, Align, Context, Layout, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::dataset::Level;
use crate::util::{short_name, trimmed_id};

use super::super::navigator::LevelNavigator;
use super::super::physics::SimulationParams;
use super::super::{ActiveGraph, CameraChoreographer, ViewModel};

const SEARCH_RESULT_ROWS: usize = 12;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn new(level: Level, graph: ActiveGraph) -> Self {
        Self {
            level,
            graph,
            choreographer: CameraChoreographer::new(),
            physics: SimulationParams::default(),
            search: String::new(),
            selected: None,
            status: None,
            pending_drill: None,
        }
    }

    /// Swap in a freshly loaded dataset: per-level view state resets and the
    /// camera flies back to the home framing.
    pub(in crate::app) fn install_dataset(&mut self, level: Level, graph: ActiveGraph, now: f64) {
        self.level = level;
        self.graph = graph;
        self.selected = None;
        self.status = None;
        self.pending_drill = None;
        self.choreographer.cancel_tour();
        self.choreographer.reset(now);
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context, navigator: &mut LevelNavigator) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("repo-atlas");
                    ui.separator();
                    ui.label(match &self.level {
                        Level::Top => "all repositories".to_string(),
                        Level::Module(scope) => trimmed_id(scope),
                    });
                    ui.label(format!("nodes: {}", self.graph.dataset.node_count()));
                    ui.label(format!("links: {}", self.graph.dataset.link_count()));
                    let up_button =
                        ui.add_enabled(!self.level.is_top(), egui::Button::new("Up"));
                    if up_button.clicked() {
                        navigator.select_up();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if navigator.is_loading() {
                            ui.spinner();
                        }
                        if let Some(status) = &self.status {
                            ui.colored_label(egui::Color32::LIGHT_RED, status);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui, navigator));
    }

    fn draw_controls(&mut self, ui: &mut Ui) {
        ui.add_space(6.0);
        ui.label("Search");
        ui.text_edit_singleline(&mut self.search);

        let query = self.search.trim().to_string();
        if !query.is_empty() {
            let matcher = SkimMatcherV2::default();
            let mut matches = self
                .graph
                .dataset
                .nodes
                .iter()
                .enumerate()
                .filter_map(|(index, node)| {
                    fuzzy_match_score(&matcher, &node.id, &query).map(|score| (index, score))
                })
                .collect::<Vec<_>>();
            matches.sort_by(|a, b| b.1.cmp(&a.1));

            let now = ui.ctx().input(|input| input.time);
            for (index, _) in matches.into_iter().take(SEARCH_RESULT_ROWS) {
                let node = &self.graph.dataset.nodes[index];
                if ui
                    .selectable_label(
                        self.selected.as_deref() == Some(node.id.as_str()),
                        short_name(&node.id),
                    )
                    .clicked()
                {
                    self.selected = Some(node.id.clone());
                    self.choreographer.cancel_tour();
                    self.choreographer.focus_on(node.position, now);
                }
            }
        }

        ui.separator();
        ui.label("Camera");
        let mut orbit = self.choreographer.orbit_enabled();
        if ui.checkbox(&mut orbit, "Idle orbit").changed() {
            self.choreographer.set_orbit(orbit);
        }
        let tour_label = if self.choreographer.tour_active() {
            "Stop tour"
        } else {
            "Start tour"
        };
        if ui.button(tour_label).clicked() {
            if self.choreographer.tour_active() {
                self.choreographer.cancel_tour();
            } else {
                let now = ui.ctx().input(|input| input.time);
                self.choreographer.start_tour(&self.graph.dataset, now);
            }
        }

        ui.separator();
        ui.label("Layout");
        let mut changed = false;
        changed |= ui
            .add(
                egui::Slider::new(&mut self.physics.same_group_repulsion, 0.0..=10_000.0)
                    .text("same-package repulsion"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.physics.cross_group_attraction, -1_000.0..=0.0)
                    .text("cross-package attraction"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut self.physics.link_distance, 20.0..=400.0)
                    .text("link distance"),
            )
            .changed();
        let reheat = ui.button("Reheat layout").clicked();
        if changed || reheat {
            self.graph.reheat();
        }
    }
}
