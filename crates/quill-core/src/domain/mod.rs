//! Domain entities.
//!
//! Plain data carried between the layers. Rows are mapped into these types by
//! the repository; nothing here touches storage.

mod article;
mod user;

pub use article::*;
pub use user::*;
