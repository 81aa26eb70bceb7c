//! Geographic coordinate type and the two pieces of geo math the simulator
//! needs: great-circle distance and a fractional approach step.
//!
//! `GeoPoint` uses `f64`.  Vehicles converge on their target geometrically
//! (10 % of the remaining gap per tick by default), so the last few metres
//! before the arrival radius are sub-microdegree moves that `f32` would
//! round away.

/// Equatorial Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Move `factor` of the way from `self` toward `target`, component-wise.
    ///
    /// With `factor < 1` this never lands exactly on `target`; callers decide
    /// arrival with [`within`](Self::within).
    #[inline]
    pub fn step_toward(self, target: GeoPoint, factor: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (target.lat - self.lat) * factor,
            lng: self.lng + (target.lng - self.lng) * factor,
        }
    }

    /// `true` when `other` is strictly closer than `radius_m` metres.
    #[inline]
    pub fn within(self, other: GeoPoint, radius_m: f64) -> bool {
        self.distance_m(other) < radius_m
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
