use super::StationId;
use crate::random::RandomStream;

/// Ordered destinations for customers leaving a station.
///
/// Each route claims the next slice of the unit interval, in insertion order. Whatever is left above the total mass is
/// the chance that the customer leaves the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutingTable {
    routes: Vec<(StationId, f64)>,
}

impl RoutingTable {
    pub fn new(routes: Vec<(StationId, f64)>) -> Self {
        Self { routes }
    }

    /// Draw once from `rng` and pick the matching destination. The draw is taken even when the table is empty, so
    /// the stream advances identically whatever the routing looks like.
    pub fn choose(&self, rng: &mut RandomStream) -> Option<StationId> {
        self.route_for(rng.next_uniform())
    }

    /// Destination whose cumulative-probability slice contains `draw`, or `None` if the draw falls past the total
    /// mass.
    pub fn route_for(&self, draw: f64) -> Option<StationId> {
        let mut cumulative = 0.0;
        for &(target, probability) in &self.routes {
            cumulative += probability;
            if draw < cumulative {
                return Some(target);
            }
        }
        None
    }

    pub fn total_mass(&self) -> f64 {
        self.routes.iter().map(|&(_, probability)| probability).sum()
    }

    pub fn routes(&self) -> &[(StationId, f64)] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
