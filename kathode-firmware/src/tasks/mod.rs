//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod controller;
pub mod link;
pub mod server;
pub mod sntp;
pub mod tick;

pub use controller::controller_task;
pub use link::link_task;
pub use server::server_task;
pub use sntp::sntp_task;
pub use tick::tick_task;
