pub mod json_backend;
#[cfg(test)]
pub mod memory_backend;
pub mod task_store;
