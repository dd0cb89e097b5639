pub mod audio;
pub mod crypto;
pub mod discord;
pub mod observability;
