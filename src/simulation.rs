use crate::scheduler::{Event, EventQueue};
use crate::SimTime;

/// Contains the event queue and the state belonging to a simulation.
///
/// The expected workflow is:
///
/// 1. Pass the initial state and the start time to [`new()`].
/// 2. Schedule at least one initial event.
/// 3. Call [`run_for()`] one or more times. Handle any error it might return.
/// 4. Use the [`state()`] accessor to read the results.
///
/// [`new()`]: Simulation::new
/// [`run_for()`]: Simulation::run_for
/// [`state()`]: Simulation::state
#[derive(Debug)]
pub struct Simulation<State, Time>
where
    Time: SimTime,
{
    event_queue: EventQueue<State, Time>,
    state: State,
    /// Events popped over the lifetime of this Simulation, including any that failed.
    events_processed: u64,
}

impl<State, Time> Simulation<State, Time>
where
    Time: SimTime,
{
    pub fn new(initial_state: State, start_time: Time) -> Self {
        Self {
            event_queue: EventQueue::new(start_time),
            state: initial_state,
            events_processed: 0,
        }
    }

    /// Execute at most `budget` events in ascending order of execution time.
    ///
    /// Returns the number of events executed by this call, which is below `budget` only when the queue ran dry.
    /// Running dry is not an error. The method may be called repeatedly to advance a run in increments.
    ///
    /// # Errors
    ///
    /// Errors raised while executing an event are passed back to the caller unchanged. The failing event has already
    /// been popped and is counted by [`events_processed()`](Simulation::events_processed).
    pub fn run_for(&mut self, budget: u64) -> crate::Result<u64> {
        let mut processed = 0;
        while processed < budget {
            let Some(mut next_event) = self.event_queue.next() else {
                break;
            };

            processed += 1;
            self.events_processed += 1;
            next_event.execute(&mut self.state, &mut self.event_queue)?;
        }
        Ok(processed)
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackInTime`] if `time` is before the current clock.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        self.event_queue.schedule(event, time)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn event_queue(&self) -> &EventQueue<State, Time> {
        &self.event_queue
    }

    /// Total events popped across every call to [`run_for()`](Simulation::run_for).
    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Clock;
    use crate::Error;
    use ordered_float::OrderedFloat;

    #[derive(Debug, Default)]
    struct Tally {
        seen: Vec<f64>,
    }

    /// Records its execution time, then books itself again `every` time units later.
    #[derive(Debug)]
    struct Recurring {
        every: f64,
    }

    impl Event<Tally, Clock> for Recurring {
        fn execute(&mut self, tally: &mut Tally, event_queue: &mut EventQueue<Tally, Clock>) -> crate::Result {
            let now = event_queue.current_time().0;
            tally.seen.push(now);
            event_queue.schedule(Recurring { every: self.every }, OrderedFloat(now + self.every))
        }
    }

    #[derive(Debug)]
    struct Once;

    impl Event<Tally, Clock> for Once {
        fn execute(&mut self, tally: &mut Tally, event_queue: &mut EventQueue<Tally, Clock>) -> crate::Result {
            tally.seen.push(event_queue.current_time().0);
            Ok(())
        }
    }

    #[derive(Debug)]
    struct Broken;

    impl Event<Tally, Clock> for Broken {
        fn execute(&mut self, _: &mut Tally, _: &mut EventQueue<Tally, Clock>) -> crate::Result {
            Err(Error::MissingServiceInterval("broken".into()))
        }
    }

    fn simulation() -> Simulation<Tally, Clock> {
        Simulation::new(Tally::default(), OrderedFloat(0.0))
    }

    #[test]
    fn budget_limits_events_executed() {
        let mut sim = simulation();
        sim.schedule(Recurring { every: 1.5 }, OrderedFloat(0.0)).unwrap();

        assert_eq!(3, sim.run_for(3).unwrap());
        assert_eq!(vec![0.0, 1.5, 3.0], sim.state().seen);
        assert_eq!(3.0, sim.event_queue().current_time().0);
        assert_eq!(1, sim.event_queue().len(), "the next occurrence should be waiting");

        assert_eq!(2, sim.run_for(2).unwrap());
        assert_eq!(5, sim.events_processed());
    }

    #[test]
    fn empty_queue_ends_the_run_early() {
        let mut sim = simulation();
        sim.schedule(Once, OrderedFloat(2.0)).unwrap();
        sim.schedule(Once, OrderedFloat(1.0)).unwrap();

        assert_eq!(2, sim.run_for(10).unwrap());
        assert_eq!(vec![1.0, 2.0], sim.state().seen);
        assert_eq!(0, sim.run_for(10).unwrap());
    }

    #[test]
    fn zero_budget_executes_nothing() {
        let mut sim = simulation();
        sim.schedule(Once, OrderedFloat(1.0)).unwrap();

        assert_eq!(0, sim.run_for(0).unwrap());
        assert!(sim.state().seen.is_empty());
        assert_eq!(1, sim.event_queue().len());
    }

    #[test]
    fn event_errors_halt_the_run() {
        let mut sim = simulation();
        sim.schedule(Once, OrderedFloat(1.0)).unwrap();
        sim.schedule(Broken, OrderedFloat(2.0)).unwrap();
        sim.schedule(Once, OrderedFloat(3.0)).unwrap();

        assert!(matches!(sim.run_for(5), Err(Error::MissingServiceInterval(_))));
        assert_eq!(vec![1.0], sim.state().seen);
        assert_eq!(2, sim.events_processed(), "the failing event was popped and counts");
        assert_eq!(2.0, sim.event_queue().current_time().0);
        assert_eq!(1, sim.event_queue().len());
    }

    #[test]
    fn past_events_are_rejected_after_the_clock_moves() {
        let mut sim = simulation();
        sim.schedule(Once, OrderedFloat(4.0)).unwrap();
        sim.run_for(1).unwrap();

        assert!(matches!(sim.schedule(Once, OrderedFloat(3.0)), Err(Error::BackInTime)));
    }
}
