//! The fixed-size fleet and its builder.

use df_core::{FleetConfig, GeoPoint, VehicleId};

use crate::Vehicle;

/// Ordered, fixed-size collection of vehicles, indexed by `VehicleId`.
///
/// Vehicles are created once and never removed.  Iteration order is fleet
/// order, which is also the order the dispatcher offers vehicles work.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// Build the fleet described by `config` (one vehicle per call sign).
    pub fn from_config(config: &FleetConfig) -> Self {
        FleetBuilder::new(config.vehicle_capacity, config.home)
            .vehicles(config.call_signs.iter().cloned())
            .build()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(id.index())
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.get_mut(id.index())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Vehicle> {
        self.vehicles.iter_mut()
    }

    /// Idle vehicles with more than `min_battery` percent charge, in fleet
    /// order.
    pub fn dispatchable(&self, min_battery: f64) -> Vec<VehicleId> {
        self.vehicles
            .iter()
            .filter(|v| v.is_dispatchable(min_battery))
            .map(|v| v.id)
            .collect()
    }

    /// The vehicle with the most deliveries; earliest in fleet order on ties.
    /// `None` until someone has delivered.
    pub fn busiest(&self) -> Option<VehicleId> {
        self.vehicles
            .iter()
            .filter(|v| v.deliveries > 0)
            .fold(None::<&Vehicle>, |best, v| match best {
                Some(b) if b.deliveries >= v.deliveries => Some(b),
                _ => Some(v),
            })
            .map(|v| v.id)
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

/// Fluent builder for [`Fleet`].
///
/// ```rust
/// use df_core::GeoPoint;
/// use df_fleet::FleetBuilder;
///
/// let fleet = FleetBuilder::new(12.0, GeoPoint::new(-19.9208, -43.9378))
///     .vehicle("4562256")
///     .vehicle("0293201")
///     .build();
/// assert_eq!(fleet.len(), 2);
/// ```
pub struct FleetBuilder {
    capacity:   f64,
    home:       GeoPoint,
    call_signs: Vec<String>,
}

impl FleetBuilder {
    /// All vehicles share `capacity` and start parked at `home`.
    pub fn new(capacity: f64, home: GeoPoint) -> Self {
        Self {
            capacity,
            home,
            call_signs: Vec::new(),
        }
    }

    /// Add one vehicle.  Vehicles get consecutive ids in call order.
    pub fn vehicle(mut self, call_sign: impl Into<String>) -> Self {
        self.call_signs.push(call_sign.into());
        self
    }

    pub fn vehicles<I, S>(mut self, call_signs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.call_signs.extend(call_signs.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Fleet {
        let vehicles = self
            .call_signs
            .into_iter()
            .enumerate()
            .map(|(i, sign)| Vehicle::new(VehicleId(i as u32), sign, self.capacity, self.home))
            .collect();
        Fleet { vehicles }
    }
}
