//! Remote command/variable protocol for the Kathode nixie clock
//!
//! The clock exposes a minimal REST-style surface over plain TCP: the first
//! request line selects either a function call
//!
//! ```text
//! GET /setBrightness?params=50 HTTP/1.1
//! ```
//!
//! or a variable read
//!
//! ```text
//! GET /brightness HTTP/1.1
//! ```
//!
//! Functions dispatch through the typed [`Command`] enum - argument
//! validation happens at parse time, so handlers only ever see legal
//! values. Every function reply carries an integer status code: 0 for
//! success, 1 for rejected input. Variables are read-only and resolved
//! against a point-in-time [`Snapshot`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod request;
pub mod response;
pub mod snapshot;

pub use command::{Command, CommandError, Status};
pub use request::{parse_request, Request, RequestError};
pub use response::{function_reply, variable_reply, Reply, MAX_REPLY_LEN};
pub use snapshot::{Snapshot, Variable, LOG_SLOTS};
