//! # lib_dataz
//!
//! Shared building blocks for the `dataz` services: the bounded item feeds and
//! their ring buffers, the HTTP polling endpoint, the job configuration lookup,
//! and the cursor-based poller that drains a feed from the client side.
//!
//! Every module is gated behind a cargo feature so that each binary only pulls
//! in the dependencies it actually needs. Enable `full` to get everything.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

// Declare the modules to re-export
#[cfg(feature = "feeds")]
pub mod configs;
#[cfg(feature = "feeds")]
pub mod feeds;
#[cfg(feature = "ingestors")]
pub mod ingestors;
#[cfg(feature = "jobs")]
pub mod jobs;
#[cfg(feature = "loggers")]
pub mod loggers;
#[cfg(feature = "retrieve")]
pub mod retrieve;
#[cfg(feature = "server")]
pub mod server;
