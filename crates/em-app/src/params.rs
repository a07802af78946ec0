//! Parameter set exchanged with the input surfaces.
//!
//! A [`ParameterSet`] is the plain, serializable form of everything a run
//! needs. Surfaces either edit it field by field ([`ParameterSet::set_field`],
//! [`ParameterSet::value_mut`]) or load it from a YAML/JSON file; missing
//! entries fall back to the reference defaults.

use std::fmt;
use std::path::Path;

use em_core::{DEFAULT_SAMPLE_RATE_HZ, Real, hz, s};
use em_signal::{SignalKind, SignalSpec};
use em_sim::{InitialState, IntegratorType, MotorParameters, SimOptions};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::run_service::RunOptions;
use crate::validate::{check_version, validate};

/// Current parameter file format version.
pub const LATEST_VERSION: u32 = 1;

/// Excitation settings as entered by the user.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalParams {
    pub kind: SignalKind,
    /// Peak voltage (V)
    pub amplitude: Real,
    /// Simulated time span (s)
    pub duration: Real,
    /// Waveform frequency (Hz)
    pub frequency: Real,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            kind: SignalKind::Rectangle,
            amplitude: 1.0,
            duration: 20.0,
            frequency: 1.0,
        }
    }
}

/// Numerical settings. The defaults reproduce the reference behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    pub sample_rate_hz: Real,
    pub integrator: IntegratorType,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: DEFAULT_SAMPLE_RATE_HZ,
            integrator: IntegratorType::ForwardEuler,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    pub version: u32,
    pub motor: MotorParameters,
    pub initial: InitialState,
    pub signal: SignalParams,
    pub solver: SolverParams,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            motor: MotorParameters::default(),
            initial: InitialState::default(),
            signal: SignalParams::default(),
            solver: SolverParams::default(),
        }
    }
}

/// Named input fields, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    R,
    L,
    Kt,
    Ke,
    J,
    K,
    Theta0,
    Omega0,
    SignalType,
    Amplitude,
    Duration,
    Frequency,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::R,
        Field::L,
        Field::Kt,
        Field::Ke,
        Field::J,
        Field::K,
        Field::Theta0,
        Field::Omega0,
        Field::SignalType,
        Field::Amplitude,
        Field::Duration,
        Field::Frequency,
    ];

    /// Canonical name accepted by [`ParameterSet::set_field`].
    pub fn name(self) -> &'static str {
        match self {
            Field::R => "R",
            Field::L => "L",
            Field::Kt => "Kt",
            Field::Ke => "Ke",
            Field::J => "J",
            Field::K => "k",
            Field::Theta0 => "theta0",
            Field::Omega0 => "omega0",
            Field::SignalType => "signal_type",
            Field::Amplitude => "amplitude",
            Field::Duration => "duration",
            Field::Frequency => "frequency",
        }
    }

    /// Form label with unit.
    pub fn label(self) -> &'static str {
        match self {
            Field::R => "R (Ω)",
            Field::L => "L (H)",
            Field::Kt => "Kt (N·m/A)",
            Field::Ke => "Ke (V/(rad/s))",
            Field::J => "J (kg·m²)",
            Field::K => "k (N/m)",
            Field::Theta0 => "θ(0) (rad)",
            Field::Omega0 => "ω(0) (rad/s)",
            Field::SignalType => "Signal type",
            Field::Amplitude => "Amplitude (V)",
            Field::Duration => "Duration (s)",
            Field::Frequency => "Frequency (Hz)",
        }
    }

    /// Resolve a field name.
    ///
    /// Motor symbols are matched exactly since `K*` and `k` are different
    /// parameters; the remaining names ignore case and accept the symbolic
    /// spellings used on the form.
    pub fn from_name(name: &str) -> Option<Field> {
        let name = name.trim();
        match name {
            "R" => return Some(Field::R),
            "L" => return Some(Field::L),
            "Kt" => return Some(Field::Kt),
            "Ke" => return Some(Field::Ke),
            "J" => return Some(Field::J),
            "k" => return Some(Field::K),
            "θ(0)" => return Some(Field::Theta0),
            "ω(0)" => return Some(Field::Omega0),
            _ => {}
        }
        match name.to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "theta0" | "theta" => Some(Field::Theta0),
            "omega0" | "omega" => Some(Field::Omega0),
            "signal_type" | "signal" | "type" => Some(Field::SignalType),
            "amplitude" => Some(Field::Amplitude),
            "duration" => Some(Field::Duration),
            "frequency" => Some(Field::Frequency),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ParameterSet {
    /// Mutable access to a numeric field; `None` for the signal type.
    pub fn value_mut(&mut self, field: Field) -> Option<&mut Real> {
        match field {
            Field::R => Some(&mut self.motor.r),
            Field::L => Some(&mut self.motor.l),
            Field::Kt => Some(&mut self.motor.kt),
            Field::Ke => Some(&mut self.motor.ke),
            Field::J => Some(&mut self.motor.j),
            Field::K => Some(&mut self.motor.k),
            Field::Theta0 => Some(&mut self.initial.theta0),
            Field::Omega0 => Some(&mut self.initial.omega0),
            Field::SignalType => None,
            Field::Amplitude => Some(&mut self.signal.amplitude),
            Field::Duration => Some(&mut self.signal.duration),
            Field::Frequency => Some(&mut self.signal.frequency),
        }
    }

    /// Current value of a numeric field; `None` for the signal type.
    pub fn value(&self, field: Field) -> Option<Real> {
        match field {
            Field::R => Some(self.motor.r),
            Field::L => Some(self.motor.l),
            Field::Kt => Some(self.motor.kt),
            Field::Ke => Some(self.motor.ke),
            Field::J => Some(self.motor.j),
            Field::K => Some(self.motor.k),
            Field::Theta0 => Some(self.initial.theta0),
            Field::Omega0 => Some(self.initial.omega0),
            Field::SignalType => None,
            Field::Amplitude => Some(self.signal.amplitude),
            Field::Duration => Some(self.signal.duration),
            Field::Frequency => Some(self.signal.frequency),
        }
    }

    /// Current value of a field, formatted for display.
    pub fn field_text(&self, field: Field) -> String {
        match self.value(field) {
            Some(v) => v.to_string(),
            None => self.signal.kind.to_string(),
        }
    }

    /// Assign a field from its textual form, e.g. `("L", "0.05")`.
    pub fn set_field(&mut self, name: &str, value: &str) -> AppResult<()> {
        let field = Field::from_name(name)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown parameter '{}'", name.trim())))?;

        match self.value_mut(field) {
            Some(slot) => {
                *slot = value.trim().parse::<Real>().map_err(|_| {
                    AppError::InvalidInput(format!(
                        "{} expects a number, got '{}'",
                        field.label(),
                        value.trim()
                    ))
                })?;
            }
            None => {
                self.signal.kind = value
                    .parse::<SignalKind>()
                    .map_err(|e| AppError::InvalidInput(e.to_string()))?;
            }
        }
        Ok(())
    }

    /// Apply `NAME=VALUE` assignments in order.
    pub fn apply_assignments<'a, I>(&mut self, assignments: I) -> AppResult<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for assignment in assignments {
            let (name, value) = assignment.split_once('=').ok_or_else(|| {
                AppError::InvalidInput(format!("expected NAME=VALUE, got '{assignment}'"))
            })?;
            self.set_field(name, value)?;
        }
        Ok(())
    }

    pub fn signal_spec(&self) -> SignalSpec {
        SignalSpec {
            kind: self.signal.kind,
            amplitude_v: self.signal.amplitude,
            frequency: hz(self.signal.frequency),
            duration: s(self.signal.duration),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            sample_rate_hz: self.solver.sample_rate_hz,
            sim: SimOptions {
                integrator: self.solver.integrator,
            },
        }
    }

    pub fn to_yaml_string(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn read(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a parameter file; only the version is checked here so that files
/// with e.g. `L: 0` can still be opened and corrected.
pub fn load_yaml(path: &Path) -> AppResult<ParameterSet> {
    let set: ParameterSet = serde_yaml::from_str(&read(path)?)?;
    check_version(&set)?;
    Ok(set)
}

pub fn load_json(path: &Path) -> AppResult<ParameterSet> {
    let set: ParameterSet = serde_json::from_str(&read(path)?)?;
    check_version(&set)?;
    Ok(set)
}

/// Save a parameter file. Refuses to write a set that would not run.
pub fn save_yaml(path: &Path, set: &ParameterSet) -> AppResult<()> {
    validate(set)?;
    let content = set.to_yaml_string()?;
    std::fs::write(path, content).map_err(|source| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_reference_table() {
        let set = ParameterSet::default();
        assert_eq!(set.motor, MotorParameters::default());
        assert_eq!(set.initial.omega0, 1.0);
        assert_eq!(set.signal.kind, SignalKind::Rectangle);
        assert_eq!(set.signal.amplitude, 1.0);
        assert_eq!(set.signal.duration, 20.0);
        assert_eq!(set.signal.frequency, 1.0);
        assert_eq!(set.solver.sample_rate_hz, 1000.0);
        assert_eq!(set.solver.integrator, IntegratorType::ForwardEuler);
    }

    #[test]
    fn field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn motor_symbols_are_case_sensitive() {
        assert_eq!(Field::from_name("k"), Some(Field::K));
        assert_eq!(Field::from_name("K"), None);
        assert_eq!(Field::from_name("kt"), None);
    }

    #[test]
    fn symbolic_and_spaced_names_resolve() {
        assert_eq!(Field::from_name("θ(0)"), Some(Field::Theta0));
        assert_eq!(Field::from_name("ω(0)"), Some(Field::Omega0));
        assert_eq!(Field::from_name("Signal type"), Some(Field::SignalType));
        assert_eq!(Field::from_name("Frequency"), Some(Field::Frequency));
    }

    #[test]
    fn set_field_updates_values() {
        let mut set = ParameterSet::default();
        set.set_field("L", "0.05").unwrap();
        set.set_field("k", "2.5").unwrap();
        set.set_field("signal_type", "harmonic").unwrap();
        assert_eq!(set.motor.l, 0.05);
        assert_eq!(set.motor.k, 2.5);
        assert_eq!(set.signal.kind, SignalKind::Harmonic);
        assert_eq!(set.field_text(Field::L), "0.05");
        assert_eq!(set.field_text(Field::SignalType), "Harmonic");
    }

    #[test]
    fn set_field_rejects_bad_input() {
        let mut set = ParameterSet::default();
        assert!(matches!(
            set.set_field("X", "1"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            set.set_field("R", "ten"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            set.set_field("signal_type", "Sawtooth"),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(set, ParameterSet::default());
    }

    #[test]
    fn assignments_apply_in_order() {
        let mut set = ParameterSet::default();
        set.apply_assignments(["R=5", "R=7", "duration=2"]).unwrap();
        assert_eq!(set.motor.r, 7.0);
        assert_eq!(set.signal.duration, 2.0);
        assert!(set.apply_assignments(["R5"]).is_err());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let set: ParameterSet = serde_yaml::from_str("signal:\n  kind: Harmonic\n").unwrap();
        assert_eq!(set.signal.kind, SignalKind::Harmonic);
        assert_eq!(set.signal.duration, 20.0);
        assert_eq!(set.motor, MotorParameters::default());
        assert_eq!(set.version, LATEST_VERSION);
    }

    #[test]
    fn yaml_uses_motor_symbols() {
        let yaml = ParameterSet::default().to_yaml_string().unwrap();
        assert!(yaml.contains("Kt: 1.0"));
        assert!(yaml.contains("integrator: forward_euler"));
        let back: ParameterSet = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, ParameterSet::default());
    }
}
