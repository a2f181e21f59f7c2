pub mod event;
pub mod history;
pub mod notification;
pub mod report;
pub mod request;
pub mod result;
pub mod server;
pub mod settings;
pub mod theme;
