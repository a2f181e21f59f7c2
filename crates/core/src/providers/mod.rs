pub mod traits;

// Service clients
pub mod http;
