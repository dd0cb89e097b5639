mod signature;
mod token;

pub use signature::verify_signature;
pub use token::constant_time_eq;
