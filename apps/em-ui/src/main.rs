#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod run_worker;
mod views;

use app::MotorSimApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().compact().init();

    // Optional parameter file to prefill the form.
    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 900.0])
            .with_title("Electric motor simulation model"),
        ..Default::default()
    };

    eframe::run_native(
        "MotorSim",
        options,
        Box::new(move |cc| Ok(Box::new(MotorSimApp::new(cc, initial)))),
    )
}
