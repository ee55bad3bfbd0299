pub mod ids;
pub mod ownership;
pub mod paper;
pub mod participant;
pub mod requests;

pub use ids::*;
pub use ownership::*;
pub use paper::*;
pub use participant::*;
pub use requests::*;
