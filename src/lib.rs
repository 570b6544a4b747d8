//! Aerodesk: a terminal console for an airline booking backend.
//!
//! Typed HTTP client over the backend's REST API plus an interactive
//! shell for day-to-day administration: airlines, flights, passengers
//! and bookings, with JWT-based sessions decoded locally.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod session;

pub mod api;
pub mod errmap;
pub mod validate;

pub mod console;
