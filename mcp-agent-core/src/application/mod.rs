pub mod agent;
pub mod client;
pub mod planner;
pub mod registry;
