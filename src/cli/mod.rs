//! Command implementations for the terminal front-end. These are thin
//! consumers of the engine's typed operations; no decision logic lives here.

pub mod afford;
pub mod import;
pub mod quote;
pub mod recommend;
pub mod setup;
pub mod ui;
