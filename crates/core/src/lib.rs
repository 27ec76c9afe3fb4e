//! Domain types, constants and the bug validation chain shared by the
//! server and the client.

pub mod bug;
pub mod error;
pub mod types;
