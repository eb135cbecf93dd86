pub mod country;
pub mod map;
pub mod response;
pub mod view;
