//! Command implementations.

pub mod blobs;
pub mod inspect;
pub mod list;
pub mod ping;
pub mod run;
pub mod show;

pub use self::blobs::execute_blobs;
pub use self::inspect::execute_inspect;
pub use self::list::execute_list;
pub use self::ping::execute_ping;
pub use self::run::execute_run;
pub use self::show::execute_show;
