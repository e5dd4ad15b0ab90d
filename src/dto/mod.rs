pub mod auth;
pub mod menu;
pub mod orders;
pub mod production;
pub mod stats;
pub mod surplus;
