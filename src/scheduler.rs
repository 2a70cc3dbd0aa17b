mod booking;
mod event_traits;

use crate::SimTime;
use booking::Booking;

pub use event_traits::Event;

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Priority queue of scheduled events.
///
/// Events will execute in ascending order of execution time, with ties broken by the order in which they were pushed
/// onto the queue. A departure scheduled at time `t` before an arrival scheduled at the same `t` therefore executes
/// first, which makes runs reproducible without relying on the heap's internal layout.
///
/// An [`EventQueue`] does not publicly support popping; popping events from the queue only occurs inside
/// [`Simulation::run_for()`]. Events are never cancelled or rescheduled once pushed.
///
/// [`Simulation::run_for()`]: crate::Simulation::run_for
#[derive(Debug)]
pub struct EventQueue<State, Time>
where
    Time: SimTime,
{
    events: BinaryHeap<Reverse<Booking<State, Time>>>,
    last_execution_time: Time,
    bookings: u64,
}

impl<State, Time> EventQueue<State, Time>
where
    Time: SimTime,
{
    pub(crate) fn new(start_time: Time) -> Self {
        Self {
            events: BinaryHeap::new(),
            last_execution_time: start_time,
            bookings: 0,
        }
    }

    /// Schedule the provided event at the specified time.
    ///
    /// # Errors
    ///
    /// If `time` is less than the current clock time on `self`, returns an [`Error::BackInTime`] to indicate the likely
    /// presence of a logical bug at the call site, with no modifications to the queue.
    ///
    /// [`Error::BackInTime`]: crate::Error::BackInTime
    pub fn schedule<EventType>(&mut self, event: EventType, time: Time) -> crate::Result
    where
        EventType: Event<State, Time> + 'static,
    {
        if time < self.last_execution_time {
            return Err(crate::Error::BackInTime);
        }

        self.events.push(Reverse(Booking {
            key: (time, self.bookings),
            event: Box::new(event),
        }));
        self.bookings += 1;
        Ok(())
    }

    /// Pop the earliest event and move the clock to its execution time.
    pub(crate) fn next(&mut self) -> Option<Box<dyn Event<State, Time>>> {
        let Reverse(Booking { key: (time, _), event }) = self.events.pop()?;
        self.last_execution_time = time;
        Some(event)
    }

    pub fn current_time(&self) -> &Time {
        &self.last_execution_time
    }

    /// Number of events still waiting to execute.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Clock;
    use ordered_float::OrderedFloat;

    #[derive(Debug, Default)]
    struct Log {
        seen: Vec<&'static str>,
    }

    #[derive(Debug)]
    struct Tagged(&'static str);

    impl Event<Log, Clock> for Tagged {
        fn execute(&mut self, state: &mut Log, _: &mut EventQueue<Log, Clock>) -> crate::Result {
            state.seen.push(self.0);
            Ok(())
        }
    }

    fn drain(queue: &mut EventQueue<Log, Clock>) -> Vec<(&'static str, f64)> {
        let mut state = Log::default();
        let mut times = Vec::new();
        while let Some(mut event) = queue.next() {
            event.execute(&mut state, queue).unwrap();
            times.push(queue.current_time().0);
        }
        state.seen.into_iter().zip(times).collect()
    }

    #[test]
    fn events_pop_in_time_order() {
        let mut queue: EventQueue<Log, Clock> = EventQueue::new(OrderedFloat(0.0));
        queue.schedule(Tagged("late"), OrderedFloat(7.25)).unwrap();
        queue.schedule(Tagged("early"), OrderedFloat(2.0)).unwrap();
        queue.schedule(Tagged("middle"), OrderedFloat(5.5)).unwrap();

        assert_eq!(vec![("early", 2.0), ("middle", 5.5), ("late", 7.25)], drain(&mut queue));
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut queue: EventQueue<Log, Clock> = EventQueue::new(OrderedFloat(0.0));
        for tag in ["first", "second", "third", "fourth"] {
            queue.schedule(Tagged(tag), OrderedFloat(3.0)).unwrap();
        }
        queue.schedule(Tagged("before"), OrderedFloat(1.0)).unwrap();

        let order: Vec<_> = drain(&mut queue).into_iter().map(|(tag, _)| tag).collect();
        assert_eq!(vec!["before", "first", "second", "third", "fourth"], order);
    }

    #[test]
    fn scheduling_in_the_past_is_rejected() {
        let mut queue: EventQueue<Log, Clock> = EventQueue::new(OrderedFloat(10.0));
        let result = queue.schedule(Tagged("stale"), OrderedFloat(9.5));

        assert!(matches!(result, Err(crate::Error::BackInTime)));
        assert!(queue.is_empty(), "rejected event should not be queued");
    }

    #[test]
    fn scheduling_at_current_time_is_allowed() {
        let mut queue: EventQueue<Log, Clock> = EventQueue::new(OrderedFloat(10.0));
        queue.schedule(Tagged("now"), OrderedFloat(10.0)).unwrap();
        assert_eq!(1, queue.len());
    }

    #[test]
    fn popping_advances_the_clock() {
        let mut queue: EventQueue<Log, Clock> = EventQueue::new(OrderedFloat(0.0));
        queue.schedule(Tagged("a"), OrderedFloat(4.0)).unwrap();

        assert!(queue.next().is_some());
        assert_eq!(4.0, queue.current_time().0);
        assert!(queue.next().is_none(), "empty queue should signal exhaustion");
        assert_eq!(4.0, queue.current_time().0, "clock should not move when nothing is popped");
    }
}
