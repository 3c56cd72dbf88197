pub mod builder;

pub use builder::{create, MoebiusBuilder};
