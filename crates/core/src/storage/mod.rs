pub mod memory;
pub mod preferences;
pub mod traits;
