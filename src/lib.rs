//! Video Interview - answer interview questions on camera from the terminal
//!
//! This crate provides the core functionality for walking a candidate through an
//! ordered list of questions, recording a time-limited video answer for each one,
//! and letting them review and re-record before submitting.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Question sets, the interview flow, the recording session state
//!   machine, config, and errors
//! - **Application**: Use cases (interview, recording controller, review) and
//!   port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (FFmpeg capture, file playback,
//!   notifications, XDG config)
//! - **CLI**: Command-line interface, argument parsing, rendering, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
