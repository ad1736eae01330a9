use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PvError;

fn default_panel_efficiency() -> f64 { 0.18 }
fn default_system_losses() -> f64 { 0.14 }

// ─── Request ─────────────────────────────────────────────────────────────────

/// Parameters of a PV system to estimate.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PvRequest {
    /// Site latitude in degrees (−90 … +90)
    pub latitude: f64,
    /// Site longitude in degrees (−180 … +180). Not used by the model.
    pub longitude: f64,
    /// Installed DC capacity (kWp)
    pub system_capacity: f64,
    /// Module efficiency (0, 1]. Not used by the model.
    #[serde(default = "default_panel_efficiency")]
    pub panel_efficiency: f64,
    /// Combined system losses [0, 1)
    #[serde(default = "default_system_losses")]
    pub system_losses: f64,
}

impl PvRequest {
    /// Range checks applied at the HTTP boundary, before any estimation.
    /// Reports the first offending field.
    pub fn validate(&self) -> Result<(), PvError> {
        check(
            "latitude",
            self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude),
            "must be between -90 and 90 degrees",
        )?;
        check(
            "longitude",
            self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude),
            "must be between -180 and 180 degrees",
        )?;
        check(
            "system_capacity",
            self.system_capacity.is_finite() && self.system_capacity > 0.0,
            "must be a positive number of kWp",
        )?;
        check(
            "panel_efficiency",
            self.panel_efficiency.is_finite()
                && self.panel_efficiency > 0.0
                && self.panel_efficiency <= 1.0,
            "must be in (0, 1]",
        )?;
        check(
            "system_losses",
            self.system_losses.is_finite() && (0.0..1.0).contains(&self.system_losses),
            "must be in [0, 1)",
        )
    }
}

fn check(field: &'static str, ok: bool, reason: &'static str) -> Result<(), PvError> {
    if ok {
        Ok(())
    } else {
        Err(PvError::InvalidField { field, reason })
    }
}

// ─── Response ────────────────────────────────────────────────────────────────

/// Estimated yield, sizing and economics of a PV system.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct PvResponse {
    /// Energy produced per year (kWh)
    pub annual_energy: f64,
    /// Energy per calendar month, January first (kWh)
    pub monthly_energy: Vec<f64>,
    /// Capacity factor (%)
    pub capacity_factor: f64,
    /// Peak sun hours used for the estimate (h/day)
    pub psh_annual: f64,
    /// Simple payback period (years), 0 when there are no savings
    pub roi_period: f64,
    /// Number of 450 W modules
    pub panel_count: u32,
    /// Roof/ground area needed (m²)
    pub required_area: f64,
    /// Installed cost (IDR)
    pub system_cost: f64,
    /// Yearly electricity bill savings (IDR)
    pub annual_savings: f64,
}

// ─── Misc API types ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct RootMessage {
    pub message: String,
}
