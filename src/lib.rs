pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::RosterPipeline;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{engine::RosterEngine, runner::ParallelRunner, snapshot::SnapshotStore};
pub use domain::model::{Character, CharacterDto, Profession, ProfessionId, Roster};
pub use utils::console::Console;
pub use utils::error::{Result, RosterError};
