mod animal;
mod animal_property;
mod experiment;
mod file;
mod project;
mod property;

pub use animal::AnimalCommands;
pub use animal_property::AnimalPropertyCommands;
pub use experiment::ExperimentCommands;
pub use file::FileCommands;
pub use project::ProjectCommands;
pub use property::PropertyCommands;
