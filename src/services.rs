pub mod activation;
pub mod employees;
pub mod projects;
pub mod screenshots;
pub mod tasks;
pub mod time_logs;
