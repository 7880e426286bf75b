pub mod app;
pub mod chat;

pub use app::ChatApp;
