#![deny(clippy::nursery, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

pub mod client;
pub mod codec;
pub mod config;
pub mod identity;
pub mod reply;
pub mod room;
pub mod server;

pub const SERVER_NAME: &str = "my.cool.server";

/// Total size of a single frame on the wire, including the trailing CRLF.
pub const MAX_FRAME_BYTES: usize = 512;

/// Maximum size of a rendered line, excluding the trailing CRLF.
pub const MAX_LINE_BYTES: usize = MAX_FRAME_BYTES - 2;
