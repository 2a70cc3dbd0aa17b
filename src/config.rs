//! TOML description of a queueing network run.
//!
//! ```toml
//! seeds = [1]
//! events = 100000
//!
//! [arrivals]
//! Q1 = 2.0
//!
//! [queues.Q1]
//! servers = 2
//! capacity = 3
//! min_arrival = 1.0
//! max_arrival = 4.0
//! min_service = 3.0
//! max_service = 4.0
//!
//! [queues.Q2]
//! servers = 1
//! capacity = 5
//! min_service = 2.0
//! max_service = 3.0
//!
//! [[network]]
//! source = "Q1"
//! target = "Q2"
//! probability = 0.8
//! ```
//!
//! Queues and initial arrivals are taken in name order, so station ids and tie-breaks between equal arrival times do
//! not depend on how the file is laid out. Routes keep file order, since it decides how each station's routing draw is
//! partitioned.

use crate::network::{Interval, NetworkDescription, StationSpec};
use crate::{Error, Result};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_seeds")]
    pub seeds: Vec<u64>,
    /// Event budget for the run.
    #[serde(alias = "rndnumbersPerSeed")]
    pub events: u64,
    #[serde(default)]
    pub arrivals: BTreeMap<String, f64>,
    pub queues: BTreeMap<String, QueueConfig>,
    #[serde(default)]
    pub network: Vec<RouteConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueConfig {
    pub servers: usize,
    pub capacity: usize,
    #[serde(default, alias = "minArrival")]
    pub min_arrival: Option<f64>,
    #[serde(default, alias = "maxArrival")]
    pub max_arrival: Option<f64>,
    #[serde(default, alias = "minService")]
    pub min_service: Option<f64>,
    #[serde(default, alias = "maxService")]
    pub max_service: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteConfig {
    pub source: String,
    pub target: String,
    pub probability: f64,
}

fn default_seeds() -> Vec<u64> {
    vec![1]
}

impl NetworkConfig {
    /// # Errors
    ///
    /// Returns [`Error::Toml`] if `contents` is not a valid network description.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Toml`] if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Convert into the description a [`NetworkSimulation`] is built from.
    ///
    /// Only shape problems are caught here: half-specified intervals and routes leaving undefined queues. Everything
    /// else is validated when the simulation is built.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PartialInterval`], [`Error::InvalidInterval`] or [`Error::UnknownStation`].
    ///
    /// [`NetworkSimulation`]: crate::network::NetworkSimulation
    pub fn into_description(self) -> Result<NetworkDescription> {
        let mut routes: BTreeMap<String, Vec<(String, f64)>> = BTreeMap::new();
        for route in self.network {
            if !self.queues.contains_key(&route.source) {
                return Err(Error::UnknownStation(route.source));
            }
            routes
                .entry(route.source)
                .or_default()
                .push((route.target, route.probability));
        }

        let mut stations = Vec::with_capacity(self.queues.len());
        for (name, queue) in self.queues {
            let arrival = interval(&name, "arrival", queue.min_arrival, queue.max_arrival)?;
            let service = interval(&name, "service", queue.min_service, queue.max_service)?;
            let routes = routes.remove(&name).unwrap_or_default();
            stations.push(StationSpec {
                name,
                servers: queue.servers,
                capacity: queue.capacity,
                arrival,
                service,
                routes,
            });
        }

        Ok(NetworkDescription {
            stations,
            initial_arrivals: self.arrivals.into_iter().collect(),
            seeds: self.seeds,
            event_budget: self.events,
        })
    }
}

fn interval(station: &str, kind: &'static str, lo: Option<f64>, hi: Option<f64>) -> Result<Option<Interval>> {
    match (lo, hi) {
        (Some(lo), Some(hi)) => Interval::new(lo, hi).map(Some),
        (None, None) => Ok(None),
        _ => Err(Error::PartialInterval {
            station: station.to_owned(),
            kind,
        }),
    }
}
