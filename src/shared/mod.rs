pub mod api_client;
pub mod config;
pub mod error;
pub mod logger;
pub mod role;
pub mod rto;
pub mod session;
