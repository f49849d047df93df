// Library root
// ------------
// The binary (`main.rs`) is a thin wrapper around `cli::run`.
//
// Module responsibilities:
// - `pack`: reads a pack file into ordered chip/program records.
// - `api`: blocking HTTP client for the `/register` endpoint, behind the
//   `Registrar` trait.
// - `upload`: the ordered upload loop (chips first, then programs).
// - `ui`: progress line formatting and the stdout/spinner reporter.
// - `cli`: clap configuration, tracing setup and exit-code mapping.
// - `error`: typed errors for pack loading and registration.
pub mod api;
pub mod cli;
pub mod error;
pub mod pack;
pub mod ui;
pub mod upload;
