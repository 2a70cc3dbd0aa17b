use super::station::occupancy_percentages;

use serde::Serialize;
use std::fmt;

/// Final statistics for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub name: String,
    pub servers: usize,
    pub capacity: usize,
    /// Arrivals rejected because the station was full.
    pub losses: u64,
    /// Arrivals offered to the station, lost ones included.
    pub arrivals: u64,
    pub completions: u64,
    /// Accumulated time at each occupancy level, indexed by level.
    pub time_in_state: Vec<f64>,
    /// Time of the last event this station processed.
    pub total_time: f64,
}

impl StationReport {
    /// Percentage of [`total_time`](StationReport::total_time) spent at each occupancy level.
    pub fn occupancy_distribution(&self) -> Vec<f64> {
        occupancy_percentages(&self.time_in_state, self.total_time)
    }

    /// Fraction of offered arrivals that were lost, or zero if nothing arrived.
    pub fn loss_ratio(&self) -> f64 {
        if self.arrivals == 0 {
            return 0.0;
        }
        self.losses as f64 / self.arrivals as f64
    }
}

impl fmt::Display for StationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Station {} (G/G/{}/{}):", self.name, self.servers, self.capacity)?;
        writeln!(f, "  Losses: {}", self.losses)?;

        writeln!(f, "  Occupancy distribution:")?;
        for (level, percentage) in self.occupancy_distribution().into_iter().enumerate() {
            if percentage != 0.0 {
                writeln!(f, "    {level}: {percentage:.2}%")?;
            }
        }

        writeln!(f, "  Accumulated time per level:")?;
        for (level, time) in self.time_in_state.iter().enumerate() {
            if *time != 0.0 {
                writeln!(f, "    {level}: {time:.2}")?;
            }
        }

        writeln!(f, "  Total simulation time: {:.2}", self.total_time)
    }
}

/// Statistics for every station of a run, in station id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkReport {
    pub events_processed: u64,
    /// Time of the last event popped from the scheduler.
    pub clock: f64,
    pub stations: Vec<StationReport>,
}

impl NetworkReport {
    pub fn station(&self, name: &str) -> Option<&StationReport> {
        self.stations.iter().find(|station| station.name == name)
    }
}

impl fmt::Display for NetworkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Processed {} events, clock at {:.2}",
            self.events_processed, self.clock
        )?;
        for station in &self.stations {
            writeln!(f)?;
            write!(f, "{station}")?;
        }
        Ok(())
    }
}
