//! Core pipeline for SIM, the mobility-report desktop utility.
//!
//! Given a city name, the pipeline searches Tavily for traffic-incident
//! news, asks Gemini to structure the hits into a JSON report, renders a
//! PDF report and a Leaflet map, and emails the PDF. Each stage lives in
//! its own module; [`pipeline::Pipeline`] wires them together in strict
//! sequence.

pub mod config;
pub mod desktop;
pub mod error;
pub mod gemini;
pub mod mail;
pub mod map;
pub mod pipeline;
pub mod report;
pub mod search;
pub mod types;

pub use config::Config;
pub use error::{Result, SimError};
pub use pipeline::{Pipeline, RunContext, RunOutput};
pub use types::{Incident, IncidentReport, SearchHit};
