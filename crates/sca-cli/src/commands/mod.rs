pub mod bus_fault;
pub mod completions;
pub mod no_clear;
pub mod util;
pub mod version;
