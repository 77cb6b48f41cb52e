pub mod trivial;

pub use trivial::{make_trivial_network, TrivialComputation, TrivialNetwork};
