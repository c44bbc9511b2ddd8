use serde::Deserialize;

/// One row of a NASA Exoplanet Archive TAP query (`format=json`).
///
/// The archive reports missing measurements as `null`, so every column is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArchiveRow {
    pub pl_name: Option<String>,
    pub hostname: Option<String>,
    /// Orbital period, days
    pub pl_orbper: Option<f64>,
    /// Radius, Earth radii
    pub pl_rade: Option<f64>,
    /// Mass, Earth masses
    pub pl_bmasse: Option<f64>,
    /// Equilibrium temperature, K
    pub pl_eqt: Option<f64>,
    pub pl_orbincl: Option<f64>,
    pub pl_orbeccen: Option<f64>,
    /// Transit depth
    pub pl_trandep: Option<f64>,
    pub pl_trandur: Option<f64>,
    /// Semi-major axis, AU
    pub pl_a: Option<f64>,
    pub pl_dens: Option<f64>,
    /// Insolation flux, Earth = 1
    pub pl_insol: Option<f64>,
    pub pl_logg: Option<f64>,
    /// Mass, Jupiter masses
    pub pl_massj: Option<f64>,
    /// Radius, Jupiter radii
    pub pl_radj: Option<f64>,
    pub pl_orbvel: Option<f64>,
    /// Impact parameter
    pub pl_imppar: Option<f64>,
}

impl ArchiveRow {
    /// Trimmed planet name, `None` for blank or "Unknown"
    pub fn name(&self) -> Option<&str> {
        let name = self.pl_name.as_deref()?.trim();
        if name.is_empty() || name == exo_common::UNKNOWN {
            None
        } else {
            Some(name)
        }
    }
}

/// `None` and non-finite values count as zero, like an absent column
pub fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}
