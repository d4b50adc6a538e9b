// src/ports/mod.rs
pub mod api;
pub mod http;
pub mod text;

pub use http::{router, serve};
pub use text::TreePresenter;
