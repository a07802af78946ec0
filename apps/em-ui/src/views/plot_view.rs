use egui_plot::{Line, Plot, PlotPoints};
use em_app::SimulationResult;

/// Voltage, current and angular velocity stacked vertically.
#[derive(Default)]
pub struct PlotView;

impl PlotView {
    pub fn show(&self, ui: &mut egui::Ui, result: Option<&SimulationResult>) {
        let Some(result) = result else {
            ui.centered_and_justified(|ui| {
                ui.label("Enter parameters and press Submit to run a simulation");
            });
            return;
        };

        let charts = result.charts();
        let height = ((ui.available_height() - 90.0) / charts.len() as f32).max(120.0);

        for (idx, chart) in charts.iter().enumerate() {
            ui.label(egui::RichText::new(chart.title).strong());
            let points: PlotPoints = chart.points().into();
            Plot::new(("motor_chart", idx))
                .height(height)
                .x_axis_label(chart.x_label)
                .y_axis_label(chart.y_label)
                .show(ui, |plot_ui| {
                    plot_ui.line(Line::new(points).name(chart.title));
                });
        }
    }
}
