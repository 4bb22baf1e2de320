/// API route modules
pub mod episodes;
pub mod health;
pub mod podcast;
