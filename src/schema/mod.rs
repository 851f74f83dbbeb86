pub mod profile;
pub mod relationship;
