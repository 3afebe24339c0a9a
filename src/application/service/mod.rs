mod groups_service;

pub use groups_service::{GroupsService, Params, Record, Target};
