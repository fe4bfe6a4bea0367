#[cfg(feature = "pg")]
pub use quill_pg as pg;

#[cfg(feature = "session")]
pub use quill_session as session;

#[cfg(feature = "entity")]
pub use quill_entity as entity;

#[cfg(feature = "server")]
pub use quill_server as server;
