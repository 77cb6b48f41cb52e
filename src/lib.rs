//! Hand-tuned evaluation backend behind the same batch interface learned
//! networks implement.
pub mod backends;
pub mod bits;
pub mod encoder;
pub mod error;
pub mod eval;
pub mod factory;
pub mod network;
pub mod options;
pub mod planes;
pub mod positions;

pub use error::BackendError;
pub use factory::NetworkFactory;
pub use network::{InputFormat, Network, NetworkCapabilities, NetworkComputation, POLICY_SIZE};
pub use options::{OptionsDict, WeightsFile};
pub use planes::{InputPlane, InputPlanes};
