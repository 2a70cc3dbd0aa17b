//! Finite-capacity queueing stations wired together by probabilistic routing.
//!
//! A [`NetworkSimulation`] seeds each configured initial arrival, then executes [`Arrival`] and [`Departure`] events
//! until its event budget runs out or nothing remains scheduled. A customer who finishes service and is routed onward
//! arrives at the next station within the same event, with no transit delay and without consuming budget, so one
//! popped event can touch several stations.

mod events;
mod report;
mod routing;
mod station;
mod topology;

pub use events::{Arrival, Departure};
pub use report::{NetworkReport, StationReport};
pub use routing::RoutingTable;
pub use station::Station;
pub use topology::{Interval, StationSpec, Topology};

use crate::random::RandomStream;
use crate::scheduler::EventQueue;
use crate::{Error, Result, Simulation};

use ordered_float::OrderedFloat;
use tracing::{debug, info, warn};

/// Simulation clock for queueing networks.
pub type Clock = OrderedFloat<f64>;

/// Index of a station within its network. Ids are dense, start at zero and follow declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(pub usize);

/// Simulation state: the station arena and the random stream all of them draw from.
#[derive(Debug)]
pub struct QueueingNetwork {
    stations: Vec<Station>,
    rng: RandomStream,
}

impl QueueingNetwork {
    pub fn new(topology: Topology, rng: RandomStream) -> Self {
        Self {
            stations: topology.into_stations(),
            rng,
        }
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this network.
    pub fn station(&self, id: StationId) -> &Station {
        &self.stations[id.0]
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn rng(&self) -> &RandomStream {
        &self.rng
    }

    /// Hand a customer to station `id` at `now`, booking a departure if a server picks the customer up.
    pub(crate) fn arrive(
        &mut self,
        id: StationId,
        now: f64,
        event_queue: &mut EventQueue<Self, Clock>,
    ) -> Result {
        if let Some(completion) = self.stations[id.0].process_arrival(now, &mut self.rng)? {
            event_queue.schedule(Departure { station: id }, OrderedFloat(completion))?;
        }
        Ok(())
    }

    /// Complete a service at station `id`, forward the customer along its route, then start the next service.
    ///
    /// The routed arrival runs before the releasing station samples its next service time; both draw from the same
    /// stream, so swapping them would change every later value.
    pub(crate) fn depart(
        &mut self,
        id: StationId,
        now: f64,
        event_queue: &mut EventQueue<Self, Clock>,
    ) -> Result {
        if let Some(target) = self.stations[id.0].process_departure(now, &mut self.rng) {
            self.arrive(target, now, event_queue)?;
        }

        if let Some(completion) = self.stations[id.0].start_waiting_service(now, &mut self.rng)? {
            event_queue.schedule(Departure { station: id }, OrderedFloat(completion))?;
        }
        Ok(())
    }

    pub(crate) fn sample_interarrival(&mut self, id: StationId) -> Option<f64> {
        self.stations[id.0].sample_interarrival(&mut self.rng)
    }
}

/// Everything needed to start a run: stations, where the first customers show up, seeds and the event budget.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDescription {
    pub stations: Vec<StationSpec>,
    /// Initial arrival times by station name. Arrivals are seeded in this order, which breaks ties between equal
    /// times.
    pub initial_arrivals: Vec<(String, f64)>,
    pub seeds: Vec<u64>,
    /// Number of events to pop from the scheduler before stopping.
    pub event_budget: u64,
}

/// A queueing network together with its scheduler and remaining event budget.
#[derive(Debug)]
pub struct NetworkSimulation {
    simulation: Simulation<QueueingNetwork, Clock>,
    remaining_budget: u64,
}

impl NetworkSimulation {
    /// Validate `description`, build the network and seed its initial arrivals.
    ///
    /// # Errors
    ///
    /// Returns the validation errors of [`Topology::new`], [`Error::EmptySeeds`], and
    /// [`Error::UnknownStation`] or [`Error::InvalidArrivalTime`] for a bad initial arrival.
    pub fn new(description: NetworkDescription) -> Result<Self> {
        let rng = RandomStream::new(description.seeds)?;
        let topology = Topology::new(description.stations)?;

        let mut arrivals = Vec::with_capacity(description.initial_arrivals.len());
        for (name, time) in &description.initial_arrivals {
            let station = topology.lookup(name)?;
            if !time.is_finite() || *time < 0.0 {
                return Err(Error::InvalidArrivalTime {
                    station: name.clone(),
                    time: *time,
                });
            }
            arrivals.push((station, *time));
        }

        let mut simulation = Simulation::new(QueueingNetwork::new(topology, rng), OrderedFloat(0.0));
        for (station, time) in arrivals {
            debug!(station = station.0, time, "seeding initial arrival");
            simulation.schedule(Arrival { station }, OrderedFloat(time))?;
        }

        Ok(Self {
            simulation,
            remaining_budget: description.event_budget,
        })
    }

    /// Process up to `events` more events, never exceeding the remaining budget. Returns how many ran.
    ///
    /// # Errors
    ///
    /// Returns any error raised by an event, such as [`Error::MissingServiceInterval`]. Events popped before the
    /// error, the failing one included, are still charged to the budget.
    pub fn step(&mut self, events: u64) -> Result<u64> {
        let before = self.simulation.events_processed();
        let outcome = self.simulation.run_for(events.min(self.remaining_budget));
        self.remaining_budget -= self.simulation.events_processed() - before;
        outcome
    }

    /// Spend the rest of the budget and report. Running out of events first ends the run early without error.
    ///
    /// # Errors
    ///
    /// Returns any error raised by an event, such as [`Error::MissingServiceInterval`].
    pub fn run(&mut self) -> Result<NetworkReport> {
        self.step(self.remaining_budget)?;
        if self.remaining_budget > 0 {
            warn!(
                remaining = self.remaining_budget,
                "no events left to process; ending run before the budget is spent"
            );
        }

        let report = self.report();
        info!(
            events = report.events_processed,
            clock = report.clock,
            "simulation finished"
        );
        Ok(report)
    }

    /// Snapshot of every station's statistics.
    pub fn report(&self) -> NetworkReport {
        NetworkReport {
            events_processed: self.simulation.events_processed(),
            clock: self.simulation.event_queue().current_time().0,
            stations: self.network().stations().iter().map(Station::report).collect(),
        }
    }

    pub fn network(&self) -> &QueueingNetwork {
        self.simulation.state()
    }

    pub fn remaining_budget(&self) -> u64 {
        self.remaining_budget
    }

    /// Events still waiting in the scheduler.
    pub fn pending_events(&self) -> usize {
        self.simulation.event_queue().len()
    }
}
