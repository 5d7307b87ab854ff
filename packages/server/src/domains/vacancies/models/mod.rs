pub mod vacancy;

pub use vacancy::*;
