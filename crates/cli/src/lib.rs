//! Command-line interface for Matchday.
//!
//! This crate wires the roster engine and the transcript classifier to a
//! persisted session file, the weekly deadline, and output formats.

#![deny(missing_docs, unsafe_code)]

/// CLI command definitions and parsing.
pub mod commands;

/// CLI application entry point and configuration.
pub mod app;

/// Error types for CLI operations.
pub mod error;

/// Roster persistence between invocations.
pub mod session;

/// Weekly registration window.
pub mod deadline;

/// Attendance export formats.
pub mod export;
