pub mod context;
pub mod error;
pub mod token;
pub mod types;

pub use context::OpContext;
pub use error::{Result, StoreError};
pub use token::{TokenSource, TokenStrategy, VersionToken};
pub use types::{HeroId, PowerId};
