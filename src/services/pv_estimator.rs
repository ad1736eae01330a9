//! ============================================================
//!  PV Yield & Return Estimation Engine
//!
//!  Algorithm pipeline:
//!   1. Peak sun hours  – equatorial base, linear latitude penalty,
//!                        sinusoidal seasonal factor for the month
//!   2. Annual energy   – P_nom × PSH × 365 × (1 − losses)
//!   3. Monthly split   – fixed hemisphere weight table, normalised
//!   4. Economics       – flat cost per kWp, flat tariff per kWh,
//!                        simple payback period
//!   5. Sizing          – whole 450 W modules, fixed area per kWp
//! ============================================================

use std::f64::consts::PI;

use tracing::{debug, error};

use crate::error::PvError;
use crate::models::pv::{PvRequest, PvResponse};

// ─── Model constants ─────────────────────────────────────────
/// Peak sun hours at the equator before seasonal correction (h/day)
pub const BASE_PSH: f64 = 4.5;
/// PSH lost per degree of latitude
pub const LATITUDE_PSH_PENALTY: f64 = 0.02;
/// Amplitude of the seasonal PSH swing
pub const SEASONAL_AMPLITUDE: f64 = 0.1;
pub const MIN_PSH: f64 = 2.0;
pub const MAX_PSH: f64 = 6.0;

pub const DAYS_PER_YEAR: f64 = 365.0;
pub const HOURS_PER_YEAR: f64 = 8760.0;

// ─── Economic & sizing assumptions ───────────────────────────
/// Installed cost per kWp (IDR)
pub const COST_PER_KWP: f64 = 18_000_000.0;
/// Grid electricity price (IDR/kWh)
pub const PRICE_PER_KWH: f64 = 1_500.0;
/// Rated power of a single module (W)
pub const PANEL_WATTAGE_W: f64 = 450.0;
/// Roof/ground area per kWp installed (m²)
pub const AREA_PER_KWP_M2: f64 = 7.0;

// ─── Monthly weight tables (Jan..Dec) ────────────────────────
// Summer peak Jun-Jul, winter low Dec-Jan
const NORTHERN_PATTERN: [f64; 12] = [
    0.06, 0.07, 0.08, 0.09, 0.10, 0.12, 0.12, 0.11, 0.10, 0.09, 0.08, 0.07,
];
// Summer peak Dec-Jan, winter low Jun-Jul
const SOUTHERN_PATTERN: [f64; 12] = [
    0.12, 0.11, 0.10, 0.09, 0.08, 0.07, 0.07, 0.08, 0.09, 0.10, 0.11, 0.12,
];

/// Economic figures for an installation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Financials {
    pub system_cost: f64,
    pub annual_savings: f64,
    /// Years until savings repay the cost, 0 when there are no savings
    pub roi_period: f64,
}

/// Main entry point – one call per request.
///
/// * `request` – already range-checked request parameters
/// * `month`   – calendar month (1–12) the estimate is made in; drives the
///   seasonal PSH factor
pub fn estimate(request: &PvRequest, month: u32) -> Result<PvResponse, PvError> {
    let psh_annual = peak_sun_hours(request.latitude, month)?;

    let annual_energy = annual_energy(request.system_capacity, psh_annual, request.system_losses);
    let capacity_factor = capacity_factor(request.system_capacity, annual_energy);
    let monthly_energy = monthly_distribution(annual_energy, request.latitude);
    let fin = financials(request.system_capacity, annual_energy);

    // panel_efficiency is accepted but plays no part in the model
    debug!(
        latitude = request.latitude,
        system_capacity = request.system_capacity,
        panel_efficiency = request.panel_efficiency,
        month,
        psh_annual,
        annual_energy,
        "pv estimate computed"
    );

    ensure_finite("annual_energy", annual_energy)?;
    ensure_finite("capacity_factor", capacity_factor)?;
    ensure_finite("annual_savings", fin.annual_savings)?;
    ensure_finite("roi_period", fin.roi_period)?;
    let panel_count = panel_count(request.system_capacity)?;

    Ok(PvResponse {
        annual_energy,
        monthly_energy: monthly_energy.to_vec(),
        capacity_factor,
        psh_annual,
        roi_period: fin.roi_period,
        panel_count,
        required_area: required_area(request.system_capacity),
        system_cost: fin.system_cost,
        annual_savings: fin.annual_savings,
    })
}

/// Peak sun hours (h/day) for a latitude in a given calendar month,
/// bounded to [`MIN_PSH`, `MAX_PSH`].
pub fn peak_sun_hours(latitude: f64, month: u32) -> Result<f64, PvError> {
    if !(1..=12).contains(&month) {
        error!(month, "month outside 1..=12");
        return Err(PvError::InvalidMonth { month });
    }

    let lat_effect = latitude.abs() * LATITUDE_PSH_PENALTY;
    let seasonal_factor =
        1.0 + SEASONAL_AMPLITUDE * (2.0 * PI * (month as f64 - 6.0) / 12.0).sin();

    let psh = (BASE_PSH - lat_effect) * seasonal_factor;
    Ok(psh.clamp(MIN_PSH, MAX_PSH))
}

#[inline]
pub fn annual_energy(system_capacity: f64, psh: f64, system_losses: f64) -> f64 {
    system_capacity * psh * DAYS_PER_YEAR * (1.0 - system_losses)
}

/// Capacity factor in percent.
#[inline]
pub fn capacity_factor(system_capacity: f64, annual_energy: f64) -> f64 {
    annual_energy / (system_capacity * HOURS_PER_YEAR) * 100.0
}

/// Splits `annual_energy` over the calendar months using the seasonal
/// pattern of the hemisphere `latitude` lies in. The result sums to
/// `annual_energy`.
pub fn monthly_distribution(annual_energy: f64, latitude: f64) -> [f64; 12] {
    let pattern = if latitude >= 0.0 { NORTHERN_PATTERN } else { SOUTHERN_PATTERN };

    // Table literals do not sum to exactly 1.0
    let total: f64 = pattern.iter().sum();
    pattern.map(|w| annual_energy * w / total)
}

pub fn financials(system_capacity: f64, annual_energy: f64) -> Financials {
    let system_cost = system_capacity * COST_PER_KWP;
    let annual_savings = annual_energy * PRICE_PER_KWH;
    let roi_period = if annual_savings > 0.0 { system_cost / annual_savings } else { 0.0 };

    Financials { system_cost, annual_savings, roi_period }
}

/// Whole modules of [`PANEL_WATTAGE_W`] that fit in the capacity.
/// Fails rather than saturating when the count does not fit in a `u32`.
pub fn panel_count(system_capacity: f64) -> Result<u32, PvError> {
    let count = (system_capacity * 1000.0 / PANEL_WATTAGE_W).floor();
    if !count.is_finite() || count < 0.0 || count > u32::MAX as f64 {
        error!(system_capacity, count, "panel count out of range");
        return Err(PvError::Computation { quantity: "panel_count" });
    }
    Ok(count as u32)
}

#[inline]
pub fn required_area(system_capacity: f64) -> f64 {
    system_capacity * AREA_PER_KWP_M2
}

fn ensure_finite(quantity: &'static str, value: f64) -> Result<(), PvError> {
    if value.is_finite() {
        Ok(())
    } else {
        error!(quantity, value, "non-finite result");
        Err(PvError::Computation { quantity })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jakarta() -> PvRequest {
        PvRequest {
            latitude: -6.2,
            longitude: 106.8,
            system_capacity: 5.0,
            panel_efficiency: 0.18,
            system_losses: 0.14,
        }
    }

    fn assert_close(a: f64, b: f64) {
        let tol = 1e-6 * b.abs().max(1.0);
        assert!((a - b).abs() <= tol, "{} != {}", a, b);
    }

    #[test]
    fn test_psh_bounded_for_all_latitudes_and_months() {
        for month in 1..=12 {
            let mut lat = -90.0;
            while lat <= 90.0 {
                let psh = peak_sun_hours(lat, month).unwrap();
                assert!((MIN_PSH..=MAX_PSH).contains(&psh), "lat {} month {} -> {}", lat, month, psh);
                lat += 0.5;
            }
        }
    }

    #[test]
    fn test_psh_june_has_no_seasonal_swing() {
        assert_close(peak_sun_hours(0.0, 6).unwrap(), 4.5);
        assert_close(peak_sun_hours(-6.2, 6).unwrap(), 4.5 - 6.2 * 0.02);
    }

    #[test]
    fn test_psh_seasonal_extremes() {
        // sin peaks at month 9, troughs at month 3
        assert_close(peak_sun_hours(0.0, 9).unwrap(), 4.95);
        assert_close(peak_sun_hours(0.0, 3).unwrap(), 4.05);
    }

    #[test]
    fn test_psh_is_symmetric_in_latitude() {
        for month in 1..=12 {
            assert_eq!(peak_sun_hours(40.0, month).unwrap(), peak_sun_hours(-40.0, month).unwrap());
        }
    }

    #[test]
    fn test_psh_clamped_at_lower_bound() {
        assert_eq!(peak_sun_hours(150.0, 6).unwrap(), MIN_PSH);
    }

    #[test]
    fn test_psh_rejects_bad_month() {
        assert_eq!(peak_sun_hours(0.0, 0), Err(PvError::InvalidMonth { month: 0 }));
        assert_eq!(peak_sun_hours(0.0, 13), Err(PvError::InvalidMonth { month: 13 }));
    }

    #[test]
    fn test_monthly_sums_to_annual() {
        for &annual in &[0.0, 1.0, 6868.132, 1.0e7] {
            for &lat in &[-45.0, -0.1, 0.0, 52.5] {
                let months = monthly_distribution(annual, lat);
                assert_eq!(months.len(), 12);
                assert!(months.iter().all(|m| *m >= 0.0));
                assert_close(months.iter().sum(), annual);
            }
        }
    }

    #[test]
    fn test_monthly_peak_follows_hemisphere() {
        let north = monthly_distribution(1000.0, 45.0);
        let south = monthly_distribution(1000.0, -33.9);

        let argmax = |m: &[f64; 12]| {
            m.iter()
                .enumerate()
                .fold(0, |best, (i, v)| if *v > m[best] { i } else { best })
        };
        assert!([5, 6].contains(&argmax(&north)));
        assert!([0, 11].contains(&argmax(&south)));
        assert_eq!(north[5], north[6]);
        assert_eq!(south[0], south[11]);
    }

    #[test]
    fn test_equator_uses_northern_pattern() {
        let months = monthly_distribution(1090.0, 0.0);
        assert_close(months[0], 60.0);
        assert_close(months[5], 120.0);
    }

    #[test]
    fn test_financials_zero_savings_guard() {
        let f = financials(5.0, 0.0);
        assert_eq!(f.annual_savings, 0.0);
        assert_eq!(f.roi_period, 0.0);
        assert_eq!(f.system_cost, 90_000_000.0);
    }

    #[test]
    fn test_financials_payback() {
        let f = financials(5.0, 6000.0);
        assert_eq!(f.annual_savings, 9_000_000.0);
        assert_close(f.roi_period, 10.0);
    }

    #[test]
    fn test_sizing() {
        assert_eq!(panel_count(5.0), Ok(11));
        assert_eq!(panel_count(0.45), Ok(1));
        assert_eq!(panel_count(0.4), Ok(0));
        assert_eq!(panel_count(9.0), Ok(20));
        assert_eq!(required_area(5.0), 35.0);
    }

    #[test]
    fn test_panel_count_beyond_u32_is_an_error() {
        // 1.9e9 kW -> 4_222_222_222 panels, still fits
        assert_eq!(panel_count(1.9e9), Ok(4_222_222_222));
        assert_eq!(
            panel_count(2.0e9),
            Err(PvError::Computation { quantity: "panel_count" })
        );
    }

    #[test]
    fn test_huge_capacity_fails_instead_of_saturating() {
        let mut req = jakarta();
        req.latitude = 10.0;
        req.system_capacity = 2.0e9;
        assert!(req.validate().is_ok());
        assert_eq!(
            estimate(&req, 6),
            Err(PvError::Computation { quantity: "panel_count" })
        );
    }

    #[test]
    fn test_jakarta_end_to_end() {
        let req = jakarta();
        let r = estimate(&req, 6).unwrap();

        let psh = 4.5 - 6.2 * 0.02;
        let annual = 5.0 * psh * 365.0 * 0.86;
        assert_close(r.psh_annual, psh);
        assert_close(r.annual_energy, annual);
        assert_close(r.capacity_factor, annual / 43_800.0 * 100.0);
        assert_eq!(r.panel_count, 11);
        assert_eq!(r.required_area, 35.0);
        assert_eq!(r.system_cost, 90_000_000.0);
        assert_close(r.annual_savings, annual * 1500.0);
        assert_close(r.roi_period, 90_000_000.0 / (annual * 1500.0));
        assert_eq!(r.monthly_energy.len(), 12);
        assert_close(r.monthly_energy.iter().sum(), annual);
    }

    #[test]
    fn test_estimate_every_month_consistent() {
        let req = jakarta();
        for month in 1..=12 {
            let r = estimate(&req, month).unwrap();
            assert_close(r.annual_energy, 5.0 * r.psh_annual * 365.0 * 0.86);
            assert_close(r.capacity_factor, r.annual_energy / 43_800.0 * 100.0);
        }
    }

    #[test]
    fn test_panel_efficiency_has_no_effect() {
        let mut req = jakarta();
        let base = estimate(&req, 4).unwrap();
        req.panel_efficiency = 0.25;
        assert_eq!(estimate(&req, 4).unwrap(), base);
    }

    #[test]
    fn test_zero_capacity_reports_computation_failure() {
        let mut req = jakarta();
        req.system_capacity = 0.0;
        assert_eq!(
            estimate(&req, 6),
            Err(PvError::Computation { quantity: "capacity_factor" })
        );
    }

    #[test]
    fn test_estimate_rejects_bad_month() {
        assert_eq!(estimate(&jakarta(), 14), Err(PvError::InvalidMonth { month: 14 }));
    }
}
