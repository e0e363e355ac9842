pub mod database;
pub mod repository;
pub mod state;
pub mod workspace;
