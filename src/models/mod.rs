pub mod params;

pub use params::{ParamValue, QueryParameters};
