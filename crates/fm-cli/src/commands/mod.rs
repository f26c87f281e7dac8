pub mod animal;
pub mod animal_property;
pub mod bind;
pub mod dispatch;
pub mod experiment;
pub mod export;
pub mod file;
pub mod import;
pub mod project;
pub mod property;
pub mod save;
pub mod schema;
pub mod session;
pub mod shared;
