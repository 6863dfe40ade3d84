pub mod mount;
pub mod probe;

pub use mount::*;
pub use probe::*;
