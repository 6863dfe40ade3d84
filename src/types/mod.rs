pub mod errors;
pub mod ids;
pub mod outcome;
pub mod report;
pub mod target;
pub mod validation;

pub use errors::*;
pub use ids::*;
pub use outcome::*;
pub use report::*;
pub use target::*;
pub use validation::*;
