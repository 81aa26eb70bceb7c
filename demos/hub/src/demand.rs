//! Synthetic order stream around the hub.

use df_core::{GeoPoint, SimRng};
use df_queue::{Priority, RequestDraft};

const STREETS: [(&str, &str); 8] = [
    ("Rua da Bahia", "Centro"),
    ("Av. Afonso Pena", "Funcionários"),
    ("Rua Pernambuco", "Savassi"),
    ("Rua Sergipe", "Savassi"),
    ("Av. do Contorno", "Santo Agostinho"),
    ("Rua Gonçalves Dias", "Lourdes"),
    ("Rua Tupis", "Centro"),
    ("Av. Bias Fortes", "Lourdes"),
];

/// Delivery radius around the hub, in degrees (about 3 km).
const SPREAD_DEG: f64 = 0.027;

/// Draws at most one order per tick.
pub struct DemandGenerator {
    rng:        SimRng,
    hub:        GeoPoint,
    rate:       f64,
    max_weight: f64,
}

impl DemandGenerator {
    /// `rate` is the chance of an order arriving on a given tick.
    pub fn new(seed: u64, hub: GeoPoint, rate: f64, max_weight: f64) -> Self {
        Self {
            rng: SimRng::new(seed),
            hub,
            rate,
            max_weight,
        }
    }

    pub fn next_order(&mut self) -> Option<RequestDraft> {
        if !self.rng.gen_bool(self.rate) {
            return None;
        }
        let &(street, neighbourhood) = self.rng.choose(&STREETS)?;
        let dest = GeoPoint::new(
            self.hub.lat + self.rng.gen_range(-SPREAD_DEG..SPREAD_DEG),
            self.hub.lng + self.rng.gen_range(-SPREAD_DEG..SPREAD_DEG),
        );
        // Mostly light parcels, occasionally a near-full load.
        let weight = if self.rng.gen_bool(0.1) {
            self.rng.gen_range(self.max_weight * 0.6..=self.max_weight)
        } else {
            self.rng.gen_range(0.2..self.max_weight * 0.4)
        };
        let priority = match self.rng.gen_range(0..10) {
            0..=1 => Priority::High,
            2..=5 => Priority::Medium,
            _ => Priority::Low,
        };

        let mut draft = RequestDraft::new(street, dest, (weight * 10.0).round() / 10.0, priority)
            .neighbourhood(neighbourhood);
        if self.rng.gen_bool(0.8) {
            draft = draft.number(self.rng.gen_range(10..3000u32).to_string());
        }
        Some(draft)
    }
}
