mod user;

pub use user::{User, UserInput};
