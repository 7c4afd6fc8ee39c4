pub mod cities;
pub mod daily;
pub mod error;
pub mod monthly;
