//! Hand-tuned backend: piece-square value estimate and a fixed policy prior.
//!
//! The policy is the same for every position. Anything comparing policies
//! across positions through this backend will see identical vectors.

use log::{debug, info, trace};

use crate::error::BackendError;
use crate::eval::{evaluate, policy::LOG_POLICY};
use crate::network::{
    InputFormat, MovesLeftFormat, Network, NetworkCapabilities, NetworkComputation, OutputFormat,
};
use crate::options::{OptionsDict, WeightsFile};
use crate::planes::InputPlanes;

pub const NAME: &str = "trivial";
pub const PRIORITY: i32 = 4;

/// Evaluates each position as it is added; `compute_blocking` has nothing left to do.
#[derive(Debug, Default)]
pub struct TrivialComputation {
    q: Vec<f32>,
}

impl TrivialComputation {
    pub fn new() -> Self { Self::default() }
}

impl NetworkComputation for TrivialComputation {
    fn add_input(&mut self, input: InputPlanes) {
        let v = evaluate(&input);
        trace!("trivial: sample {} value {:.5}", self.q.len(), v);
        self.q.push(v);
    }

    fn compute_blocking(&mut self) -> Result<(), BackendError> {
        debug!("trivial: batch of {} already evaluated", self.q.len());
        Ok(())
    }

    fn batch_size(&self) -> usize { self.q.len() }

    fn value(&self, sample: usize) -> f32 { self.q[sample] }

    fn draw(&self, _sample: usize) -> f32 { 0.0 }

    fn moves_left(&self, _sample: usize) -> f32 { 0.0 }

    fn policy_logit(&self, _sample: usize, move_id: usize) -> f32 { LOG_POLICY[move_id] }
}

#[derive(Debug, Clone, Default)]
pub struct TrivialNetwork {
    capabilities: NetworkCapabilities,
}

impl TrivialNetwork {
    /// Reads `input_mode` (default: classical 112 planes) from `options`.
    /// Any integer is accepted and reported back as-is.
    pub fn new(options: &OptionsDict) -> Result<Self, BackendError> {
        let code = options.get_or_default::<i64>("input_mode", InputFormat::Classical112.code())?;
        let input_format = InputFormat::from(code);
        Ok(Self {
            capabilities: NetworkCapabilities {
                input_format,
                output_format: OutputFormat::Classical,
                moves_left: MovesLeftFormat::None,
            },
        })
    }
}

impl Network for TrivialNetwork {
    fn capabilities(&self) -> &NetworkCapabilities { &self.capabilities }

    fn new_computation(&self) -> Box<dyn NetworkComputation + '_> { Box::new(TrivialComputation::new()) }
}

/// Factory entry point. Weights are accepted for uniformity and ignored.
pub fn make_trivial_network(
    weights: Option<&WeightsFile>,
    options: &OptionsDict,
) -> Result<Box<dyn Network>, BackendError> {
    if let Some(w) = weights {
        debug!("trivial: ignoring weights {}", w.path.display());
    }
    let net = TrivialNetwork::new(options)?;
    info!("trivial backend ready, input format {:?}", net.capabilities.input_format);
    Ok(Box::new(net))
}
