use em_app::{Field, ParameterSet, SignalKind};

/// Editable copy of the parameters. Only a submitted snapshot reaches the core.
pub struct ParamForm {
    pub params: ParameterSet,
}

impl ParamForm {
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    /// Draw the form. Returns true when the user asked to run it.
    pub fn show(&mut self, ui: &mut egui::Ui, running: bool) -> bool {
        egui::Grid::new("param_grid")
            .num_columns(2)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for field in Field::ALL {
                    ui.label(format!("{}:", field.label()));
                    if field == Field::SignalType {
                        let kind = &mut self.params.signal.kind;
                        egui::ComboBox::from_id_salt("signal_type")
                            .selected_text(kind.label())
                            .show_ui(ui, |ui| {
                                for option in SignalKind::ALL {
                                    ui.selectable_value(&mut *kind, option, option.label());
                                }
                            });
                    } else if let Some(value) = self.params.value_mut(field) {
                        let speed = (value.abs() * 0.01).max(0.001);
                        ui.add(
                            egui::DragValue::new(value)
                                .speed(speed)
                                .max_decimals(6),
                        );
                    }
                    ui.end_row();
                }
            });

        ui.add_space(8.0);

        let mut submit = false;
        ui.horizontal(|ui| {
            let label = if running { "Submit (restart)" } else { "Submit" };
            if ui.button(label).clicked() {
                submit = true;
            }
            if ui.button("Reset defaults").clicked() {
                self.params = ParameterSet::default();
            }
        });
        submit
    }
}
