//! Physical system models built on the event-aware IVP driver.
//!
//! Each model is a typed parameter record implementing
//! [`OdeModel`](modsim_diffeq::OdeModel) over a named state record. Unless a
//! model documents otherwise, quantities are SI: meters, seconds, kilograms,
//! radians.

pub mod models;
