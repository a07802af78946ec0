//! End-to-end runs through the service layer.

use em_app::{
    AppError, Field, InitialState, IntegratorType, MotorParameters, ParameterSet, SignalKind,
    SignalSpec, ValidationError, run, run_parameter_set, write_csv,
};
use em_core::{hz, s};
use proptest::prelude::*;

fn spec(kind: SignalKind, amplitude_v: f64, frequency_hz: f64, duration_s: f64) -> SignalSpec {
    SignalSpec {
        kind,
        amplitude_v,
        frequency: hz(frequency_hz),
        duration: s(duration_s),
    }
}

#[test]
fn default_scenario() {
    let result = run_parameter_set(&ParameterSet::default()).expect("default run");

    assert_eq!(result.len(), 20_000);
    assert_eq!(result.u.len(), 20_000);
    assert_eq!(result.i.len(), 20_000);
    assert_eq!(result.omega.len(), 20_000);
    assert_eq!(result.t[0], 0.0);
    assert_eq!(result.u[0], 1.0);
    assert_eq!(result.i[0], 0.0);
    assert_eq!(result.omega[0], 1.0);
}

#[test]
fn rectangle_follows_duty_cycle_over_first_period() {
    let result = run(
        &MotorParameters::default(),
        &InitialState::default(),
        &spec(SignalKind::Rectangle, 1.0, 1.0, 2.0),
    )
    .unwrap();

    for (t, u) in result.t.iter().zip(&result.u) {
        if *t >= 1.0 {
            break;
        }
        let expected = if *t < 0.5 { 1.0 } else { 0.0 };
        assert_eq!(*u, expected, "t = {t}");
    }
}

#[test]
fn free_decay_scenario() {
    let result = run(
        &MotorParameters::default(),
        &InitialState {
            theta0: 0.0,
            omega0: 1.0,
        },
        &spec(SignalKind::Rectangle, 0.0, 1.0, 1.0),
    )
    .unwrap();

    let n = result.len();
    assert_eq!(n, 1000);
    assert!(result.u.iter().all(|&u| u == 0.0));
    assert_eq!(result.i[0], 0.0);
    assert_eq!(result.omega[0], 1.0);
    assert!(result.omega[n - 1].abs() < result.omega[0].abs());
    assert!(result.omega.iter().all(|w| w.is_finite() && w.abs() <= 1.0));
}

#[test]
fn zero_inertia_rejected() {
    let params = MotorParameters {
        j: 0.0,
        ..Default::default()
    };
    let err = run(
        &params,
        &InitialState::default(),
        &spec(SignalKind::Harmonic, 1.0, 1.0, 1.0),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(ValidationError::ZeroInertia)));
    assert_eq!(err.to_string(), "Inertia (J) cannot be zero.");
}

#[test]
fn zero_inductance_from_field_entry() {
    let mut set = ParameterSet::default();
    set.set_field(Field::L.name(), "0").unwrap();
    let err = run_parameter_set(&set).unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::ZeroInductance)
    ));
}

#[test]
fn zero_frequency_triangle_rejected() {
    let err = run(
        &MotorParameters::default(),
        &InitialState::default(),
        &spec(SignalKind::Triangle, 1.0, 0.0, 1.0),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::ZeroFrequency {
            kind: SignalKind::Triangle
        })
    ));
}

#[test]
fn zero_frequency_harmonic_runs_with_zero_drive() {
    let result = run(
        &MotorParameters::default(),
        &InitialState::default(),
        &spec(SignalKind::Harmonic, 2.0, 0.0, 1.5),
    )
    .unwrap();

    assert_eq!(result.len(), 1500);
    assert_eq!(result.u.len(), 1500);
    assert!(result.u.iter().all(|&u| u == 0.0));
    assert_eq!(result.omega[0], 1.0);
}

#[test]
fn oversized_duration_rejected_before_running() {
    let mut set = ParameterSet::default();
    set.signal.duration = 1e300;
    let err = run_parameter_set(&set).unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::TooManySamples { .. })
    ));

    let err = run(
        &MotorParameters::default(),
        &InitialState::default(),
        &spec(SignalKind::Rectangle, 1.0, 1.0, 1e7),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::TooManySamples {
            samples: 10_000_000_000,
            ..
        })
    ));
}

#[test]
fn rk4_mode_is_opt_in() {
    let mut set = ParameterSet::default();
    set.signal.duration = 1.0;
    let euler = run_parameter_set(&set).unwrap();

    set.solver.integrator = IntegratorType::RK4;
    let rk4 = run_parameter_set(&set).unwrap();

    assert_eq!(euler.u, rk4.u);
    assert_ne!(euler.omega, rk4.omega);
    for (a, b) in euler.omega.iter().zip(&rk4.omega) {
        assert!((a - b).abs() < 1e-2);
    }
}

#[test]
fn csv_export_has_one_line_per_sample() {
    let mut set = ParameterSet::default();
    set.signal.duration = 0.5;
    let result = run_parameter_set(&set).unwrap();

    let mut buf = Vec::new();
    write_csv(&result, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), result.len() + 1);
    assert!(text.starts_with("time_s,voltage_v,current_a,omega_rad_s\n"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn runs_are_deterministic_and_aligned(
        kind_index in 0usize..3,
        amplitude in -5.0f64..5.0,
        frequency in 0.1f64..10.0,
        duration in 0.0025f64..3.0,
        omega0 in -2.0f64..2.0,
    ) {
        let kind = SignalKind::ALL[kind_index];
        let signal = spec(kind, amplitude, frequency, duration);
        let init = InitialState { theta0: 0.0, omega0 };
        let params = MotorParameters::default();

        let a = run(&params, &init, &signal).unwrap();
        let b = run(&params, &init, &signal).unwrap();

        let n = (duration * 1000.0).floor() as usize;
        prop_assert_eq!(a.t.len(), n);
        prop_assert_eq!(a.u.len(), n);
        prop_assert_eq!(a.i.len(), n);
        prop_assert_eq!(a.omega.len(), n);
        prop_assert_eq!(a, b);
    }
}
