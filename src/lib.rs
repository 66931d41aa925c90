pub mod clients;
pub mod config;
pub mod debounce;
pub mod filter;
pub mod navigation;
pub mod picker;
pub mod places;
pub mod state;
pub mod store;
pub mod text;
pub mod types;
