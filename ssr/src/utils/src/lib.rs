pub mod local_storage;
pub mod time;
pub mod types;
pub mod watch_time;
pub mod youtube;
