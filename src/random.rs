//! Deterministic uniform variates drawn round-robin from several seed slots.

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 101_390_422;
/// The generator's modulus, `2^32`. Slot arithmetic wraps at `u32` width, so this only appears when scaling a state
/// down to `[0, 1)`.
const MODULUS: f64 = 4_294_967_296.0;

/// A linear-congruential generator, `x' = (1664525·x + 101390422) mod 2^32`, over a pool of seed slots.
///
/// Each draw advances the slot under the cursor and then moves the cursor to the next slot, wrapping back to the
/// first. Every consumer in a run (inter-arrival sampling, service sampling, routing) shares the one pool, so the
/// order of calls is part of what makes two runs with the same seeds identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStream {
    slots: Vec<u32>,
    cursor: usize,
    draws: u64,
}

impl RandomStream {
    /// Build a stream from its initial seeds. Seeds wider than 32 bits are reduced modulo `2^32`, which yields the
    /// same sequence as feeding them to the recurrence unreduced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySeeds`] if `seeds` is empty.
    ///
    /// [`Error::EmptySeeds`]: crate::Error::EmptySeeds
    pub fn new<I>(seeds: I) -> crate::Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<u64>,
    {
        let slots: Vec<u32> = seeds.into_iter().map(|seed| seed.into() as u32).collect();
        if slots.is_empty() {
            return Err(crate::Error::EmptySeeds);
        }

        Ok(Self {
            slots,
            cursor: 0,
            draws: 0,
        })
    }

    /// Draw a value in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        let slot = &mut self.slots[self.cursor];
        *slot = MULTIPLIER.wrapping_mul(*slot).wrapping_add(INCREMENT);
        let value = f64::from(*slot) / MODULUS;

        self.cursor = (self.cursor + 1) % self.slots.len();
        self.draws += 1;
        value
    }

    /// Draw a value in `[lo, hi)`. A degenerate interval with `lo == hi` returns `lo` but still consumes a draw.
    pub fn next_in(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_uniform()
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Current state of every slot, in slot order.
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_seed_list_is_rejected() {
        let result = RandomStream::new(Vec::<u32>::new());
        assert!(matches!(result, Err(crate::Error::EmptySeeds)));
    }

    #[test]
    fn single_slot_follows_the_recurrence() {
        let mut stream = RandomStream::new([1u32]).unwrap();

        assert_eq!(103_054_947.0 / MODULUS, stream.next_uniform());
        assert_eq!(938_210_653.0 / MODULUS, stream.next_uniform());
        assert_eq!(3_604_913_167.0 / MODULUS, stream.next_uniform());
        assert_eq!(&[3_604_913_167u32], stream.slots());
        assert_eq!(3, stream.draws());
    }

    #[test]
    fn slots_are_consumed_round_robin() {
        let mut stream = RandomStream::new([1u32, 2]).unwrap();

        assert_eq!(103_054_947.0 / MODULUS, stream.next_uniform());
        assert_eq!(104_719_472.0 / MODULUS, stream.next_uniform());
        // back to the first slot, which continues from its own state
        assert_eq!(938_210_653.0 / MODULUS, stream.next_uniform());
    }

    #[test]
    fn wide_seeds_wrap_to_the_same_sequence() {
        let mut wide = RandomStream::new([(1u64 << 32) + 1]).unwrap();
        let mut narrow = RandomStream::new([1u64]).unwrap();

        for _ in 0..16 {
            assert_eq!(narrow.next_uniform(), wide.next_uniform());
        }
    }

    #[test]
    fn draws_stay_in_the_unit_interval() {
        let mut stream = RandomStream::new([0u32, 7, 4_294_967_295]).unwrap();
        for _ in 0..10_000 {
            let value = stream.next_uniform();
            assert!((0.0..1.0).contains(&value), "{value} escaped [0, 1)");
        }
    }

    #[test]
    fn bounded_draws_scale_into_the_interval() {
        let mut reference = RandomStream::new([42u32]).unwrap();
        let mut stream = reference.clone();

        let expected = 3.0 + 2.0 * reference.next_uniform();
        assert_eq!(expected, stream.next_in(3.0, 5.0));

        assert_eq!(1.0, stream.next_in(1.0, 1.0), "degenerate interval should return its bound");
        assert_eq!(2, stream.draws(), "degenerate interval still consumes a draw");
    }

    #[test]
    fn identical_seeds_give_identical_streams() {
        let mut a = RandomStream::new([9u32, 8, 7]).unwrap();
        let mut b = RandomStream::new([9u32, 8, 7]).unwrap();
        for _ in 0..100 {
            assert_eq!(a.next_uniform(), b.next_uniform());
        }
        assert_eq!(a, b);
    }
}
