pub mod catalog;
pub mod geo;
pub mod lookup;
pub mod session;
pub mod source;
