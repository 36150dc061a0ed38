pub mod space_repository;
pub mod task_instance_repository;
pub mod worker_repository;
