pub mod handlers;
pub mod settlement;
pub mod store;
