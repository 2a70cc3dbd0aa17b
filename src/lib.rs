//! # Overview
//!
//! queuenet simulates networks of finite-capacity, multi-server queueing stations connected by probabilistic
//! routing. A run processes a fixed budget of events and reports, for every station, how long it spent at each
//! occupancy level, how many arrivals it lost, and how far its clock advanced.
//!
//! The crate is built in two layers:
//!
//! * A small discrete-event core. The [`Event`] trait gives each executing event exclusive access to the
//!   simulation's state and event queue. [`Simulation`] pops events in ascending time order, breaking ties by
//!   insertion order, until the queue runs dry or an event budget is spent. Both are generic over the state type and
//!   a [`SimTime`] clock.
//! * The queueing network in [`network`], which plugs [`Arrival`] and [`Departure`] events into that core. Every draw
//!   comes from one [`RandomStream`] owned by the network, so two runs with the same seeds, topology, initial arrivals
//!   and budget produce identical statistics.
//!
//! Network descriptions can be built in code with [`StationSpec`] or loaded from TOML through [`NetworkConfig`].
//!
//! ```no_run
//! use queuenet::{NetworkConfig, NetworkSimulation};
//!
//! let description = NetworkConfig::load("network.toml")?.into_description()?;
//! let report = NetworkSimulation::new(description)?.run()?;
//! println!("{report}");
//! # Ok::<(), queuenet::Error>(())
//! ```
//!
//! [`Event`]: scheduler::Event
//! [`Arrival`]: network::Arrival
//! [`Departure`]: network::Departure
//! [`StationSpec`]: network::StationSpec
//! [`RandomStream`]: random::RandomStream

pub mod config;
mod error;
mod generic_parameters;
pub mod network;
pub mod random;
pub mod scheduler;
mod simulation;

pub use config::NetworkConfig;
pub use error::{Error, Result};
pub use generic_parameters::SimTime;
pub use network::{NetworkDescription, NetworkReport, NetworkSimulation, StationReport};
pub use simulation::Simulation;
