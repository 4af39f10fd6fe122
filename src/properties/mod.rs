pub use hyperpolarizability::{hyperpolarizability, BETA_ROWS};
pub use response::{static_response, BetaError, StaticResponse};

pub mod logging;
pub(crate) mod hyperpolarizability;
pub(crate) mod response;
