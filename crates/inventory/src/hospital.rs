use serde::{Deserialize, Serialize};

use medswap_core::{Entity, HospitalId};

/// A marketplace participant. Static reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: HospitalId,
    pub name: String,
    pub location: String,
    /// Display distance relative to the viewing hospital (e.g. "4.2km").
    pub distance: String,
    pub rating: f32,
}

impl Hospital {
    /// Numeric kilometre value of `distance`, when it parses.
    pub fn distance_km(&self) -> Option<f64> {
        let raw = self.distance.trim();
        let number = raw
            .strip_suffix("km")
            .or_else(|| raw.strip_suffix("KM"))
            .unwrap_or(raw)
            .trim();
        number.parse::<f64>().ok().filter(|km| km.is_finite())
    }
}

impl Entity for Hospital {
    type Id = HospitalId;

    fn id(&self) -> &HospitalId {
        &self.id
    }
}
