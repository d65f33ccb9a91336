pub mod component;
pub mod entity;
pub mod error;
pub mod query;
pub mod storage;
pub(crate) mod util;
pub mod world;

pub use component::{Component, Signature, Slot};
pub use entity::Entity;
pub use error::{Error, ErrorKind, Result};
pub use query::{Query, View};
pub use storage::Store;
pub use world::World;

pub use signet_macros::Component;
