use eframe::egui::{self, Ui};

use super::super::ViewModel;

impl ViewModel {
    /// Closest projected node under the pointer, by screen distance.
    pub(in crate::app) fn hovered_index(&self, ui: &Ui) -> Option<(usize, f32)> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        self.graph
            .scratch
            .projected
            .iter()
            .enumerate()
            .filter_map(|(index, projected)| {
                let projected = projected.as_ref()?;
                let distance = projected.screen.distance(pointer);
                if distance <= projected.radius.max(4.0) {
                    Some((index, distance))
                } else {
                    None
                }
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Scroll wheel dollies the camera along its view axis.
    pub(in crate::app) fn handle_dolly(&mut self, ui: &Ui, response: &egui::Response) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let factor = (1.0 - scroll * 0.0018).clamp(0.85, 1.15);
        self.choreographer.dolly(factor);
    }
}
