pub mod dashboard;
pub mod home;
pub mod map;
