use std::fmt::Debug;

/// Clock type accepted by the scheduler.
///
/// Events execute in ascending order of execution time, ties going to whichever was scheduled first. Builtin floats
/// are not [`Ord`], so queueing networks run on [`Clock`], an [`OrderedFloat`]`<f64>`.
///
/// [`Clock`]: crate::network::Clock
/// [`OrderedFloat`]: ordered_float::OrderedFloat
pub trait SimTime: Ord + Copy + Debug {}

impl<Float> SimTime for ordered_float::OrderedFloat<Float> where Float: ordered_float::FloatCore + Debug {}
