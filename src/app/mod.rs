use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui::{self, Context, Pos2};

use crate::dataset::{FileSource, GraphDataset, Level};

mod camera;
mod graph;
mod navigator;
mod physics;
mod render_utils;
mod ui;

use camera::CameraChoreographer;
use navigator::{LevelNavigator, NavigatorEvent};
use physics::SimulationParams;

pub struct AtlasApp {
    navigator: LevelNavigator,
    state: AppState,
}

enum AppState {
    Loading,
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    level: Level,
    graph: ActiveGraph,
    choreographer: CameraChoreographer,
    physics: SimulationParams,
    search: String,
    selected: Option<String>,
    status: Option<String>,
    pending_drill: Option<PendingDrill>,
}

/// A click at the top level focuses the camera first and drills down once
/// the transition has played out.
struct PendingDrill {
    node_id: String,
    due: f64,
}

/// The active dataset plus everything derived from it for rendering and
/// physics. Replaced in one assignment on every level transition; nothing
/// here survives a swap.
struct ActiveGraph {
    dataset: GraphDataset,
    links: Vec<ResolvedLink>,
    index_by_id: HashMap<String, usize>,
    min_size: u64,
    max_size: u64,
    alpha: f32,
    scratch: ViewScratch,
}

#[derive(Clone, Copy)]
struct ResolvedLink {
    source: usize,
    target: usize,
    color: [u8; 3],
}

#[derive(Default)]
struct ViewScratch {
    projected: Vec<Option<ProjectedNode>>,
    draw_order: Vec<usize>,
}

#[derive(Clone, Copy)]
struct ProjectedNode {
    screen: Pos2,
    radius: f32,
    depth: f32,
}

impl ActiveGraph {
    fn new(dataset: GraphDataset) -> Self {
        let index_by_id = dataset.index_by_id();
        let links = dataset
            .links
            .iter()
            .filter_map(|link| {
                let source = *index_by_id.get(&link.source)?;
                let target = *index_by_id.get(&link.target)?;
                Some(ResolvedLink {
                    source,
                    target,
                    color: link.color,
                })
            })
            .collect();
        let (min_size, max_size) = dataset.size_bounds();

        Self {
            dataset,
            links,
            index_by_id,
            min_size,
            max_size,
            alpha: 1.0,
            scratch: ViewScratch::default(),
        }
    }

    fn reheat(&mut self) {
        self.alpha = 1.0;
    }
}

impl AtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graphs_dir: String) -> Self {
        let mut navigator = LevelNavigator::new(Arc::new(FileSource::new(graphs_dir)));
        navigator.reload_top();

        Self {
            navigator,
            state: AppState::Loading,
        }
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|input| input.time);

        if let Some(event) = self.navigator.poll() {
            match event {
                NavigatorEvent::Swapped { level, dataset } => {
                    let graph = ActiveGraph::new(dataset);
                    match &mut self.state {
                        AppState::Ready(model) => model.install_dataset(level, graph, now),
                        _ => self.state = AppState::Ready(Box::new(ViewModel::new(level, graph))),
                    }
                }
                NavigatorEvent::Failed { level, error } => match &mut self.state {
                    AppState::Ready(model) => {
                        model.status =
                            Some(format!("failed to load {}: {error}", level.label()));
                    }
                    _ => self.state = AppState::Error(error),
                },
            }
        }

        let mut retry = false;
        match &mut self.state {
            AppState::Loading => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading repository graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load repository graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        retry = true;
                    }
                });
            }
            AppState::Ready(model) => {
                model.show(ctx, &mut self.navigator);
            }
        }

        if retry {
            self.navigator.reload_top();
            self.state = AppState::Loading;
        }
    }
}
