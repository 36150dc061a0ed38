pub mod duration;
pub mod employee;
pub mod settings;
pub mod task;
pub mod worker;
pub mod workload;
