//! Tribuna - Turn-Based Courtroom Hearing Simulation Engine
//!
//! This crate implements scripted hearing sessions for legal education:
//! authored case scripts, a strict turn state machine with scoring and
//! verdicts, paced dialogue reveal, snapshot persistence, and post-hearing
//! feedback.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
