// Question sourcing and sheet assembly.
// The registry is constructed in main and injected through AppState; no globals.

pub mod handlers;
pub mod registry;
pub mod selection;
pub mod sheet;
