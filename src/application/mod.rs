pub mod outcome;
pub mod service;
