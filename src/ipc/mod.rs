//! Request transport for the `vdpager` binary.
//!
//! A widget shell (or a script) writes newline-delimited JSON requests to
//! the process and reads one JSON response per request back.

pub mod stream;
