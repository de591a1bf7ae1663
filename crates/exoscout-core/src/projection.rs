// Orbital period vs radius series for a log-log scatter plot
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::PlanetRecord;

/// Paired series: `xs[i]` and `ys[i]` always come from the same planet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Orbital period in days
    pub xs: Vec<f64>,
    /// Radius in Earth radii
    pub ys: Vec<f64>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// Power-of-ten extent of each axis
    ///
    /// `None` for an empty projection, or when a value could not sit on a
    /// log axis (only possible if the series were built by hand).
    pub fn log_bounds(&self) -> Option<LogBounds> {
        Some(LogBounds {
            x: AxisBounds::decades(&self.xs)?,
            y: AxisBounds::decades(&self.ys)?,
        })
    }
}

/// Extract the plot series
///
/// Values pass through untouched. Planets with a period or radius that is
/// not strictly positive and finite are left out, since a log axis cannot
/// place them.
pub fn project(processed: &[PlanetRecord]) -> Projection {
    let mut projection = Projection {
        xs: Vec::with_capacity(processed.len()),
        ys: Vec::with_capacity(processed.len()),
    };

    for planet in processed {
        if log_safe(planet.orbital_period_days) && log_safe(planet.radius_earth) {
            projection.xs.push(planet.orbital_period_days);
            projection.ys.push(planet.radius_earth);
        }
    }

    let rejected = processed.len() - projection.len();
    if rejected > 0 {
        debug!("Left {} planets out of the projection (non-positive values)", rejected);
    }

    projection
}

fn log_safe(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// Smallest `[10^a, 10^b]` with `a < b` that holds every value
    fn decades(values: &[f64]) -> Option<Self> {
        if !values.iter().copied().all(log_safe) {
            return None;
        }
        let lo = values.iter().copied().reduce(f64::min)?;
        let hi = values.iter().copied().reduce(f64::max)?;

        let lo_exp = lo.log10().floor() as i32;
        let mut hi_exp = hi.log10().ceil() as i32;
        if hi_exp <= lo_exp {
            hi_exp = lo_exp + 1;
        }

        Some(Self {
            min: 10f64.powi(lo_exp),
            max: 10f64.powi(hi_exp),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
}

/// What a renderer needs besides the points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_log: bool,
    pub y_log: bool,
}

impl Default for PlotSpec {
    fn default() -> Self {
        Self {
            title: "Orbital Period vs Radius".to_string(),
            x_label: "Orbital Period (days)".to_string(),
            y_label: "Radius (Earth radii)".to_string(),
            x_log: true,
            y_log: true,
        }
    }
}
