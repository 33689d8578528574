pub mod reporter;
pub mod session;

pub use reporter::{LogReporter, Reporter, SilentReporter};
pub use session::Session;
