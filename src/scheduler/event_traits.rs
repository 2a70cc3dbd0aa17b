use super::EventQueue;
use crate::SimTime;
use std::fmt::Debug;

/// Something that happens at one instant of simulated time.
///
/// An event gets exclusive access to the simulation state and to the queue it was popped from, so it can book
/// follow-up events. The queue's clock already reads the event's execution time when [`execute`] runs.
///
/// Queueing networks use [`Arrival`] and [`Departure`].
///
/// [`execute`]: Event::execute
/// [`Arrival`]: crate::network::Arrival
/// [`Departure`]: crate::network::Departure
pub trait Event<State, Time>: Debug
where
    Time: SimTime,
{
    /// # Errors
    ///
    /// An error stops [`Simulation::run_for()`] and is handed back to its caller unchanged.
    ///
    /// [`Simulation::run_for()`]: crate::Simulation::run_for
    fn execute(&mut self, state: &mut State, event_queue: &mut EventQueue<State, Time>) -> crate::Result;
}
