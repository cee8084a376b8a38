pub mod config;
pub mod logging;

// Request engine
pub mod classify;
pub mod credential;
pub mod dispatch;
pub mod policy;
pub mod session;
pub mod tracker;
pub mod transport;

// Read operations built on the engine
pub mod directory;
