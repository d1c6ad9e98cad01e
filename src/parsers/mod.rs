pub mod price;
pub mod query;

pub use price::*;
pub use query::*;
