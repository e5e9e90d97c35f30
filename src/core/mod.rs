pub mod engine;
pub mod report;
pub mod runner;
pub mod seed;
pub mod snapshot;
pub mod worker_pool;

pub use crate::domain::model::{Character, CharacterDto, Profession, ProfessionId, Roster};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
