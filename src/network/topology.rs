use super::routing::RoutingTable;
use super::station::Station;
use super::StationId;
use crate::random::RandomStream;
use crate::{Error, Result};

use std::collections::HashMap;
use tracing::{debug, warn};

/// Closed bounds `[lo, hi]` for a uniformly distributed interval, such as the time between arrivals or the length of a
/// service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// # Errors
    ///
    /// Returns [`Error::InvalidInterval`] unless both bounds are finite and `0 <= lo <= hi`.
    pub fn new(lo: f64, hi: f64) -> Result<Self> {
        if !(lo.is_finite() && hi.is_finite() && 0.0 <= lo && lo <= hi) {
            return Err(Error::InvalidInterval { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// An interval that always yields `value`.
    ///
    /// # Errors
    ///
    /// Same as [`Interval::new`].
    pub fn fixed(value: f64) -> Result<Self> {
        Self::new(value, value)
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub(crate) fn sample(&self, rng: &mut RandomStream) -> f64 {
        rng.next_in(self.lo, self.hi)
    }
}

/// Description of a single station, before validation.
///
/// Routes refer to other stations by name and keep the order in which they were added: that order defines how the
/// unit interval is partitioned when a departing customer picks its next station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSpec {
    pub name: String,
    pub servers: usize,
    pub capacity: usize,
    /// Bounds on the time between self-generated arrivals. `None` for stations fed only by routing.
    pub arrival: Option<Interval>,
    pub service: Option<Interval>,
    pub routes: Vec<(String, f64)>,
}

impl StationSpec {
    pub fn new(name: impl Into<String>, servers: usize, capacity: usize) -> Self {
        Self {
            name: name.into(),
            servers,
            capacity,
            arrival: None,
            service: None,
            routes: Vec::new(),
        }
    }

    pub fn with_arrival(mut self, interval: Interval) -> Self {
        self.arrival = Some(interval);
        self
    }

    pub fn with_service(mut self, interval: Interval) -> Self {
        self.service = Some(interval);
        self
    }

    /// Append a route; earlier routes claim the lower end of the unit interval.
    pub fn route_to(mut self, target: impl Into<String>, probability: f64) -> Self {
        self.routes.push((target.into(), probability));
        self
    }
}

/// A validated set of stations, laid out in an arena indexed by [`StationId`].
///
/// Station ids are assigned in the order the specs were given. Routing tables hold ids rather than references, so
/// stations may route to each other (or to themselves) without any ownership cycle.
#[derive(Debug)]
pub struct Topology {
    stations: Vec<Station>,
    index: HashMap<String, StationId>,
}

impl Topology {
    /// Validate `specs` and build their stations.
    ///
    /// A routing table whose probabilities add up to more than 1 is accepted with a warning; any mass past 1 can
    /// never be drawn, so trailing routes become unreachable.
    ///
    /// # Errors
    ///
    /// Fails on duplicate names, stations without servers, zero capacity, capacity below the server count, routes to
    /// undefined stations, and route probabilities that are negative or not finite. A station that generates its own
    /// arrivals must have service bounds ([`Error::MissingServiceInterval`]).
    pub fn new(specs: Vec<StationSpec>) -> Result<Self> {
        let mut index = HashMap::with_capacity(specs.len());
        for (position, spec) in specs.iter().enumerate() {
            if index.insert(spec.name.clone(), StationId(position)).is_some() {
                return Err(Error::DuplicateStation(spec.name.clone()));
            }
        }

        let mut stations = Vec::with_capacity(specs.len());
        for spec in specs {
            validate_station(&spec)?;
            let routing = build_routing(&spec, &index)?;
            if routing.total_mass() > 1.0 {
                warn!(
                    station = %spec.name,
                    mass = routing.total_mass(),
                    "routing probabilities exceed 1; trailing routes are unreachable"
                );
            }

            debug!(
                station = %spec.name,
                servers = spec.servers,
                capacity = spec.capacity,
                routes = routing.len(),
                "station configured"
            );
            stations.push(Station::new(
                spec.name,
                spec.servers,
                spec.capacity,
                spec.arrival,
                spec.service,
                routing,
            ));
        }

        Ok(Self { stations, index })
    }

    /// Resolve a station name to its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownStation`] if no station has that name.
    pub fn lookup(&self, name: &str) -> Result<StationId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownStation(name.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub(crate) fn into_stations(self) -> Vec<Station> {
        self.stations
    }
}

fn validate_station(spec: &StationSpec) -> Result {
    if spec.arrival.is_some() && spec.service.is_none() {
        return Err(Error::MissingServiceInterval(spec.name.clone()));
    }
    if spec.servers == 0 {
        return Err(Error::NoServers(spec.name.clone()));
    }
    if spec.capacity < spec.servers {
        return Err(Error::InsufficientCapacity {
            name: spec.name.clone(),
            servers: spec.servers,
            capacity: spec.capacity,
        });
    }
    Ok(())
}

fn build_routing(spec: &StationSpec, index: &HashMap<String, StationId>) -> Result<RoutingTable> {
    let mut routes = Vec::with_capacity(spec.routes.len());
    for (target, probability) in &spec.routes {
        let id = *index
            .get(target)
            .ok_or_else(|| Error::UnknownStation(target.clone()))?;
        if !probability.is_finite() || *probability < 0.0 {
            return Err(Error::InvalidProbability {
                origin: spec.name.clone(),
                target: target.clone(),
                probability: *probability,
            });
        }
        routes.push((id, *probability));
    }
    Ok(RoutingTable::new(routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn service() -> Interval {
        Interval::new(1.0, 2.0).unwrap()
    }

    #[test]
    fn intervals_must_be_ordered_and_non_negative() {
        assert!(Interval::new(1.0, 1.0).is_ok());
        assert!(matches!(Interval::new(2.0, 1.0), Err(Error::InvalidInterval { .. })));
        assert!(matches!(Interval::new(-1.0, 1.0), Err(Error::InvalidInterval { .. })));
        assert!(matches!(Interval::new(0.0, f64::INFINITY), Err(Error::InvalidInterval { .. })));
        assert!(matches!(Interval::fixed(f64::NAN), Err(Error::InvalidInterval { .. })));
    }

    #[test]
    fn stations_get_ids_in_declaration_order() {
        let topology = Topology::new(vec![
            StationSpec::new("A", 1, 1).with_service(service()),
            StationSpec::new("B", 2, 4).with_service(service()),
        ])
        .unwrap();

        assert_eq!(2, topology.len());
        assert_eq!(StationId(0), topology.lookup("A").unwrap());
        assert_eq!(StationId(1), topology.lookup("B").unwrap());
        assert!(matches!(topology.lookup("C"), Err(Error::UnknownStation(name)) if name == "C"));
    }

    #[test]
    fn self_arriving_station_needs_service_bounds() {
        let result = Topology::new(vec![StationSpec::new("A", 1, 1).with_arrival(service())]);
        assert!(matches!(result, Err(Error::MissingServiceInterval(name)) if name == "A"));

        // a station fed only by routing may leave them out
        assert!(Topology::new(vec![StationSpec::new("B", 1, 1)]).is_ok());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = Topology::new(vec![StationSpec::new("A", 1, 1), StationSpec::new("A", 1, 2)]);
        assert!(matches!(result, Err(Error::DuplicateStation(name)) if name == "A"));
    }

    #[test]
    fn capacity_must_cover_servers() {
        assert!(matches!(
            Topology::new(vec![StationSpec::new("A", 0, 1)]),
            Err(Error::NoServers(_))
        ));
        assert!(matches!(
            Topology::new(vec![StationSpec::new("A", 1, 0)]),
            Err(Error::InsufficientCapacity { capacity: 0, .. })
        ));
        assert!(matches!(
            Topology::new(vec![StationSpec::new("A", 3, 2)]),
            Err(Error::InsufficientCapacity {
                servers: 3,
                capacity: 2,
                ..
            })
        ));
    }

    #[test]
    fn routes_must_name_known_stations() {
        let result = Topology::new(vec![StationSpec::new("A", 1, 1).route_to("nowhere", 0.5)]);
        assert!(matches!(result, Err(Error::UnknownStation(name)) if name == "nowhere"));
    }

    #[test]
    fn negative_probabilities_are_rejected() {
        let result = Topology::new(vec![
            StationSpec::new("A", 1, 1).route_to("B", -0.1),
            StationSpec::new("B", 1, 1),
        ]);
        assert!(matches!(result, Err(Error::InvalidProbability { .. })));
    }

    #[test]
    fn self_routes_are_allowed() {
        let topology = Topology::new(vec![StationSpec::new("A", 1, 1).route_to("A", 0.5)]).unwrap();
        let stations = topology.into_stations();
        assert_eq!(Some(StationId(0)), stations[0].routing().route_for(0.25));
    }

    #[traced_test]
    #[test]
    fn excess_routing_mass_warns() {
        let topology = Topology::new(vec![
            StationSpec::new("A", 1, 1).route_to("B", 0.7).route_to("C", 0.6),
            StationSpec::new("B", 1, 1),
            StationSpec::new("C", 1, 1),
        ]);

        assert!(topology.is_ok(), "excess routing mass should not be fatal");
        assert!(logs_contain("routing probabilities exceed 1"));
    }
}
