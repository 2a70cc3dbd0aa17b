/// Errors that may be encountered while building or executing
/// a queueing-network simulation.
///
/// The [`BackInTime`] variant originates from the
/// [`EventQueue`] to indicate that an event's scheduled
/// execution time is prior to the queue's current time. This
/// error likely corresponds to a logical bug, e.g. forgetting
/// to add an offset to the current time when scheduling a new
/// event.
///
/// The topology variants are raised while validating a
/// network description, before any event executes. The
/// [`MissingServiceInterval`] variant is raised mid-run, the
/// first time a station without service bounds has to start a
/// service.
///
/// [`EventQueue`]: crate::scheduler::EventQueue
/// [`BackInTime`]: Error::BackInTime
/// [`MissingServiceInterval`]: Error::MissingServiceInterval
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The event queue rejected an event that would
    /// have been scheduled for a time that has
    /// already passed.
    #[error("event execution time is less than current simulation time")]
    BackInTime,
    /// A random stream needs at least one seed slot.
    #[error("random stream requires at least one seed")]
    EmptySeeds,
    #[error("station {0:?} is defined more than once")]
    DuplicateStation(String),
    #[error("station {0:?} is not defined")]
    UnknownStation(String),
    #[error("station {0:?} must have at least one server")]
    NoServers(String),
    /// Capacity bounds the number of customers in the
    /// system, so it must cover every server.
    #[error("station {name:?} has capacity {capacity}, which is below its {servers} servers")]
    InsufficientCapacity {
        name: String,
        servers: usize,
        capacity: usize,
    },
    #[error("interval [{lo}, {hi}] must be finite, non-negative and ordered")]
    InvalidInterval { lo: f64, hi: f64 },
    #[error("route from {origin:?} to {target:?} has invalid probability {probability}")]
    InvalidProbability {
        origin: String,
        target: String,
        probability: f64,
    },
    #[error("initial arrival at {station:?} has invalid time {time}")]
    InvalidArrivalTime { station: String, time: f64 },
    #[error("station {station:?} has only one of its {kind} bounds")]
    PartialInterval { station: String, kind: &'static str },
    /// A station had to start a service but was configured
    /// without service bounds.
    #[error("station {0:?} needs a service interval to schedule a departure")]
    MissingServiceInterval(String),
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// [`std::result::Result`]`<T, `[`queuenet::Error`]`>`, defaulting
/// `T` to `()`.
///
/// A type alias that simplifies the signatures of
/// various functions in queuenet.
///
/// [`queuenet::Error`]: Error
pub type Result<T = ()> = std::result::Result<T, Error>;
