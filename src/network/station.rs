use super::report::StationReport;
use super::routing::RoutingTable;
use super::topology::Interval;
use super::StationId;
use crate::random::RandomStream;
use crate::{Error, Result};

/// A finite-capacity, multi-server queue.
///
/// `capacity` bounds the number of customers in the station, counting those in service; there is no separate
/// waiting room. An arrival that finds the station full is lost.
///
/// Between events the station accumulates, for every occupancy level, how long it has spent at that level. The sum
/// of those times always equals the time of the last event the station saw, since every station starts empty at
/// time zero.
#[derive(Debug, Clone)]
pub struct Station {
    name: String,
    servers: usize,
    capacity: usize,
    arrival: Option<Interval>,
    service: Option<Interval>,
    routing: RoutingTable,

    occupancy: usize,
    losses: u64,
    arrivals: u64,
    completions: u64,
    time_in_state: Vec<f64>,
    last_event_time: f64,
}

impl Station {
    pub(crate) fn new(
        name: String,
        servers: usize,
        capacity: usize,
        arrival: Option<Interval>,
        service: Option<Interval>,
        routing: RoutingTable,
    ) -> Self {
        Self {
            name,
            servers,
            capacity,
            arrival,
            service,
            routing,
            occupancy: 0,
            losses: 0,
            arrivals: 0,
            completions: 0,
            time_in_state: vec![0.0; capacity + 1],
            last_event_time: 0.0,
        }
    }

    /// Charge the time since the previous event to the current occupancy level.
    fn record_elapsed(&mut self, now: f64) {
        self.time_in_state[self.occupancy] += now - self.last_event_time;
        self.last_event_time = now;
    }

    /// Admit a customer at `now`, or count a loss if the station is full.
    ///
    /// Returns the completion time of a service that started because a server was free. The caller is responsible
    /// for scheduling the matching departure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingServiceInterval`] if a service has to start and the station has no service bounds.
    pub fn process_arrival(&mut self, now: f64, rng: &mut RandomStream) -> Result<Option<f64>> {
        self.record_elapsed(now);
        self.arrivals += 1;

        if self.occupancy == self.capacity {
            self.losses += 1;
            return Ok(None);
        }

        self.occupancy += 1;
        if self.occupancy <= self.servers {
            return self.sample_completion(now, rng).map(Some);
        }
        Ok(None)
    }

    /// Finish a service at `now` and pick where the customer goes next.
    ///
    /// A departure that finds the station empty only records elapsed time, and takes no routing draw.
    pub fn process_departure(&mut self, now: f64, rng: &mut RandomStream) -> Option<StationId> {
        self.record_elapsed(now);
        if self.occupancy == 0 {
            return None;
        }

        self.occupancy -= 1;
        self.completions += 1;
        self.routing.choose(rng)
    }

    /// After a departure, start serving the next waiting customer, if any.
    ///
    /// Kept apart from [`process_departure`](Station::process_departure) so a routed arrival elsewhere draws from
    /// the random stream before this station samples its next service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingServiceInterval`] if a service has to start and the station has no service bounds.
    pub fn start_waiting_service(&mut self, now: f64, rng: &mut RandomStream) -> Result<Option<f64>> {
        if self.occupancy >= self.servers {
            return self.sample_completion(now, rng).map(Some);
        }
        Ok(None)
    }

    fn sample_completion(&self, now: f64, rng: &mut RandomStream) -> Result<f64> {
        let service = self
            .service
            .ok_or_else(|| Error::MissingServiceInterval(self.name.clone()))?;
        Ok(now + service.sample(rng))
    }

    /// Time until this station's next self-generated arrival, or `None` if it is fed only by routing.
    pub fn sample_interarrival(&self, rng: &mut RandomStream) -> Option<f64> {
        self.arrival.map(|interval| interval.sample(rng))
    }

    /// Share of `total_time` spent at each occupancy level, as percentages indexed by level. Every level is present,
    /// including those never visited. A zero `total_time` yields all zeros.
    pub fn occupancy_distribution(&self, total_time: f64) -> Vec<f64> {
        occupancy_percentages(&self.time_in_state, total_time)
    }

    pub fn report(&self) -> StationReport {
        StationReport {
            name: self.name.clone(),
            servers: self.servers,
            capacity: self.capacity,
            losses: self.losses,
            arrivals: self.arrivals,
            completions: self.completions,
            time_in_state: self.time_in_state.clone(),
            total_time: self.last_event_time,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn servers(&self) -> usize {
        self.servers
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn arrival_interval(&self) -> Option<Interval> {
        self.arrival
    }

    pub fn service_interval(&self) -> Option<Interval> {
        self.service
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// Customers currently at the station, in service or waiting.
    pub fn occupancy(&self) -> usize {
        self.occupancy
    }

    pub fn losses(&self) -> u64 {
        self.losses
    }

    /// Arrivals offered to the station, including lost ones.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    pub fn completions(&self) -> u64 {
        self.completions
    }

    pub fn time_in_state(&self) -> &[f64] {
        &self.time_in_state
    }

    pub fn last_event_time(&self) -> f64 {
        self.last_event_time
    }
}

pub(crate) fn occupancy_percentages(time_in_state: &[f64], total_time: f64) -> Vec<f64> {
    if total_time == 0.0 {
        return vec![0.0; time_in_state.len()];
    }
    time_in_state
        .iter()
        .map(|time| time / total_time * 100.0)
        .collect()
}
