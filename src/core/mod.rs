pub mod runner;
pub mod sfdx;
pub mod workflow;
