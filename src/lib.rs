pub mod app;
pub mod banner;
pub mod board;
pub mod client;
pub mod config;
pub mod cors;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;
pub mod view;

pub use app::router;
pub use board::Board;
pub use client::{ApiClient, ClientError, HttpTransport, Transport};
pub use config::Config;
pub use state::AppState;
pub use storage::Database;
