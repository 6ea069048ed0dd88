pub mod player_options;
#[cfg(feature = "ssr")]
pub mod server;
pub mod watch_session;
