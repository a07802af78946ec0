//! Text exports of a result for external plotting tools.

use std::io::Write;

use crate::error::AppResult;
use crate::result::SimulationResult;

pub const CSV_HEADER: &str = "time_s,voltage_v,current_a,omega_rad_s";

/// One header line plus one line per sample.
pub fn write_csv<W: Write>(result: &SimulationResult, mut out: W) -> AppResult<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for k in 0..result.len() {
        writeln!(
            out,
            "{},{},{},{}",
            result.t[k], result.u[k], result.i[k], result.omega[k]
        )?;
    }
    out.flush()?;
    Ok(())
}

/// The result as a single JSON object with `t`, `u`, `i`, `omega` arrays.
pub fn write_json<W: Write>(result: &SimulationResult, mut out: W) -> AppResult<()> {
    serde_json::to_writer(&mut out, result)?;
    writeln!(out)?;
    Ok(())
}
