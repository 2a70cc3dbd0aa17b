use super::{Clock, QueueingNetwork, StationId};
use crate::scheduler::{Event, EventQueue};

use ordered_float::OrderedFloat;
use tracing::trace;

/// A customer reaches a station from outside the network.
///
/// After the station handles the customer, a station with an arrival interval books its own next arrival. Customers
/// routed from another station never travel as an `Arrival` event: they are handed over inside the [`Departure`]
/// that released them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    pub station: StationId,
}

impl Event<QueueingNetwork, Clock> for Arrival {
    fn execute(
        &mut self,
        network: &mut QueueingNetwork,
        event_queue: &mut EventQueue<QueueingNetwork, Clock>,
    ) -> crate::Result {
        let now = event_queue.current_time().0;
        trace!(station = %network.station(self.station).name(), now, "arrival");

        network.arrive(self.station, now, event_queue)?;

        if let Some(delay) = network.sample_interarrival(self.station) {
            event_queue.schedule(*self, OrderedFloat(now + delay))?;
        }
        Ok(())
    }
}

/// A service completes at a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure {
    pub station: StationId,
}

impl Event<QueueingNetwork, Clock> for Departure {
    fn execute(
        &mut self,
        network: &mut QueueingNetwork,
        event_queue: &mut EventQueue<QueueingNetwork, Clock>,
    ) -> crate::Result {
        let now = event_queue.current_time().0;
        trace!(station = %network.station(self.station).name(), now, "departure");

        network.depart(self.station, now, event_queue)
    }
}
