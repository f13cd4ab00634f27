// Library exports for integration tests and binaries
pub mod api_client;
pub mod config;
pub mod i18n;
pub mod markup;
pub mod navigation;
pub mod retry;
pub mod server;
pub mod switcher;
