use crate::run_worker::{RunWorker, WorkerMessage, WorkerPoll};
use crate::views::{ParamForm, PlotView};
use em_app::{ParameterSet, SimulationResult, load_json, load_yaml};
use std::path::PathBuf;

pub struct MotorSimApp {
    form: ParamForm,
    plot_view: PlotView,
    run_worker: Option<RunWorker>,
    next_generation: u64,
    result: Option<SimulationResult>,
    status: RunStatus,
}

#[derive(Debug, Clone)]
enum RunStatus {
    Idle,
    Running,
    Completed { samples: usize, elapsed_s: f64 },
    Rejected { message: String },
}

impl MotorSimApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, initial: Option<PathBuf>) -> Self {
        Self::from_initial(initial)
    }

    /// Build the app and start the first run, unless the parameter file
    /// could not be loaded.
    fn from_initial(initial: Option<PathBuf>) -> Self {
        let (params, status) = match initial {
            Some(path) => {
                let loaded = if path.extension().is_some_and(|ext| ext == "json") {
                    load_json(&path)
                } else {
                    load_yaml(&path)
                };
                match loaded {
                    Ok(params) => (params, RunStatus::Idle),
                    Err(e) => (
                        ParameterSet::default(),
                        RunStatus::Rejected {
                            message: e.to_string(),
                        },
                    ),
                }
            }
            None => (ParameterSet::default(), RunStatus::Idle),
        };

        let mut app = Self {
            form: ParamForm::new(params),
            plot_view: PlotView,
            run_worker: None,
            next_generation: 0,
            result: None,
            status,
        };
        if matches!(app.status, RunStatus::Idle) {
            app.submit();
        }
        app
    }

    /// Start a run with the current form values, superseding any pending run.
    fn submit(&mut self) {
        self.next_generation += 1;
        let generation = self.next_generation;
        tracing::debug!(generation, "submitting parameters");
        self.run_worker = Some(RunWorker::start(generation, self.form.params.clone()));
        self.status = RunStatus::Running;
    }

    fn poll_worker(&mut self) {
        let Some(worker) = &self.run_worker else {
            return;
        };

        match worker.poll() {
            WorkerPoll::Pending => return,
            WorkerPoll::Finished(WorkerMessage::Complete {
                result, elapsed_s, ..
            }) => {
                self.status = RunStatus::Completed {
                    samples: result.len(),
                    elapsed_s,
                };
                self.result = Some(*result);
            }
            WorkerPoll::Finished(WorkerMessage::Error { message, .. }) => {
                // Previous charts stay on screen.
                self.status = RunStatus::Rejected { message };
            }
            WorkerPoll::Lost => {
                tracing::error!(
                    generation = worker.generation,
                    "simulation worker exited without a result"
                );
                self.status = RunStatus::Rejected {
                    message: "Simulation stopped unexpectedly.".to_string(),
                };
            }
        }
        self.run_worker = None;
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        match &self.status {
            RunStatus::Idle => {
                ui.label("Ready");
            }
            RunStatus::Running => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Simulating…");
                });
            }
            RunStatus::Completed { samples, elapsed_s } => {
                ui.label(format!(
                    "✓ {} samples in {:.1} ms",
                    samples,
                    elapsed_s * 1e3
                ));
            }
            RunStatus::Rejected { message } => {
                ui.colored_label(egui::Color32::RED, format!("Error: {}", message));
            }
        }
    }
}

impl eframe::App for MotorSimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        egui::SidePanel::left("parameters")
            .resizable(false)
            .min_width(300.0)
            .show(ctx, |ui| {
                ui.heading("Motor & signal");
                ui.separator();
                let running = self.run_worker.is_some();
                if self.form.show(ui, running) {
                    self.submit();
                }
                ui.separator();
                self.show_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.plot_view.show(ui, self.result.as_ref());
        });

        if self.run_worker.is_some() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settle(app: &mut MotorSimApp) {
        for _ in 0..500 {
            app.poll_worker();
            if app.run_worker.is_none() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn defaults_run_at_startup() {
        let mut app = MotorSimApp::from_initial(None);
        assert!(app.run_worker.is_some());
        assert!(matches!(app.status, RunStatus::Running));

        settle(&mut app);
        assert!(matches!(
            app.status,
            RunStatus::Completed { samples: 20_000, .. }
        ));
        assert_eq!(app.result.as_ref().map(SimulationResult::len), Some(20_000));
    }

    #[test]
    fn unreadable_file_skips_startup_run() {
        let path = std::env::temp_dir().join(format!(
            "em_ui_missing_{}.yaml",
            std::process::id()
        ));
        let app = MotorSimApp::from_initial(Some(path));
        assert!(app.run_worker.is_none());
        assert!(matches!(app.status, RunStatus::Rejected { .. }));
        assert_eq!(app.form.params, ParameterSet::default());
    }

    #[test]
    fn rejected_resubmit_keeps_previous_charts() {
        let mut app = MotorSimApp::from_initial(None);
        settle(&mut app);
        let previous = app.result.clone();
        assert!(previous.is_some());

        app.form.params.motor.l = 0.0;
        app.submit();
        settle(&mut app);
        match &app.status {
            RunStatus::Rejected { message } => {
                assert_eq!(message, "Inductance (L) cannot be zero.")
            }
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(app.result, previous);
    }
}
