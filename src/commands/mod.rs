//! Command implementations for the badminton ranking CLI

pub mod common;
pub mod compare;
pub mod graph;
pub mod history;
pub mod player;
pub mod poi;
pub mod search;
pub mod team;
pub mod top;
pub mod update;

pub use common::CommandContext;
