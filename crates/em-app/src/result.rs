//! Simulation output handed to the rendering surfaces.

use em_core::Real;
use serde::{Deserialize, Serialize};

/// X-axis label shared by every chart.
pub const TIME_AXIS_LABEL: &str = "Time (s)";

/// Index-aligned output series of one run.
///
/// Angular position is integrated internally but deliberately not part of
/// the result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Sample times (s)
    pub t: Vec<Real>,
    /// Excitation voltage (V)
    pub u: Vec<Real>,
    /// Armature current (A)
    pub i: Vec<Real>,
    /// Angular velocity (rad/s)
    pub omega: Vec<Real>,
}

/// One chart's worth of data plus its captions.
#[derive(Clone, Copy, Debug)]
pub struct ChartSeries<'a> {
    pub title: &'static str,
    pub y_label: &'static str,
    pub x_label: &'static str,
    pub t: &'a [Real],
    pub values: &'a [Real],
}

impl ChartSeries<'_> {
    /// `[t, value]` pairs, the shape plotting libraries take.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.t
            .iter()
            .zip(self.values)
            .map(|(&t, &v)| [t, v])
            .collect()
    }
}

/// Headline numbers of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResultSummary {
    pub samples: usize,
    pub dt_s: Real,
    pub duration_s: Real,
    pub final_current_a: Real,
    pub peak_current_a: Real,
    pub final_omega_rad_s: Real,
    pub peak_omega_rad_s: Real,
}

fn peak_abs(values: &[Real]) -> Real {
    values.iter().fold(0.0, |acc: Real, v| acc.max(v.abs()))
}

impl SimulationResult {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Voltage, current and angular velocity charts, in display order.
    pub fn charts(&self) -> [ChartSeries<'_>; 3] {
        [
            ChartSeries {
                title: "Signal plot",
                y_label: "Voltage (V)",
                x_label: TIME_AXIS_LABEL,
                t: &self.t,
                values: &self.u,
            },
            ChartSeries {
                title: "Current plot",
                y_label: "Current (A)",
                x_label: TIME_AXIS_LABEL,
                t: &self.t,
                values: &self.i,
            },
            ChartSeries {
                title: "Angular velocity plot",
                y_label: "Omega (rad/s)",
                x_label: TIME_AXIS_LABEL,
                t: &self.t,
                values: &self.omega,
            },
        ]
    }

    pub fn summary(&self) -> ResultSummary {
        let n = self.len();
        let last = |v: &[Real]| v.last().copied().unwrap_or(0.0);
        ResultSummary {
            samples: n,
            dt_s: if n >= 2 { self.t[1] - self.t[0] } else { 0.0 },
            duration_s: last(&self.t),
            final_current_a: last(&self.i),
            peak_current_a: peak_abs(&self.i),
            final_omega_rad_s: last(&self.omega),
            peak_omega_rad_s: peak_abs(&self.omega),
        }
    }
}
