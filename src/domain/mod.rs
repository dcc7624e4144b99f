pub mod cour;
pub mod models;
