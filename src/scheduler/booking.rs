use super::Event;
use crate::SimTime;
use std::cmp::Ordering;

/// Heap entry: a boxed event keyed by `(execution time, booking sequence)`.
///
/// Only the key takes part in comparisons. Sequences are unique per queue, so no two entries compare equal and events
/// booked for the same instant leave the heap in booking order.
#[derive(Debug)]
pub(super) struct Booking<State, Time>
where
    Time: SimTime,
{
    pub key: (Time, u64),
    pub event: Box<dyn Event<State, Time>>,
}

impl<State, Time: SimTime> PartialEq for Booking<State, Time> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<State, Time: SimTime> Eq for Booking<State, Time> {}

impl<State, Time: SimTime> PartialOrd for Booking<State, Time> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<State, Time: SimTime> Ord for Booking<State, Time> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}
