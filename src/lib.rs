pub mod config;
pub mod database;
pub mod handlers;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test;
