//! Contract every inference backend implements: capability reporting plus a
//! two-phase batch computation (add inputs, then compute, then read back).

use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::planes::InputPlanes;

/// Number of move indices in the policy head.
pub const POLICY_SIZE: usize = 1858;

/// Board encoding a backend accepts. `code` gives the wire value; codes
/// without a named variant are carried through as `Other`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputFormat {
    Unknown,
    #[default]
    Classical112,
    Classical112WithCastlingPlane,
    WithCanonicalization,
    WithCanonicalizationHectoplies,
    WithCanonicalizationV2,
    HectopliesArmageddon,
    CanonicalizationV2Armageddon,
    Other(i64),
}

impl InputFormat {
    pub fn code(self) -> i64 {
        match self {
            InputFormat::Unknown => 0,
            InputFormat::Classical112 => 1,
            InputFormat::Classical112WithCastlingPlane => 2,
            InputFormat::WithCanonicalization => 3,
            InputFormat::WithCanonicalizationHectoplies => 4,
            InputFormat::WithCanonicalizationV2 => 5,
            InputFormat::HectopliesArmageddon => 132,
            InputFormat::CanonicalizationV2Armageddon => 133,
            InputFormat::Other(code) => code,
        }
    }
}

impl From<i64> for InputFormat {
    fn from(code: i64) -> Self {
        match code {
            0 => InputFormat::Unknown,
            1 => InputFormat::Classical112,
            2 => InputFormat::Classical112WithCastlingPlane,
            3 => InputFormat::WithCanonicalization,
            4 => InputFormat::WithCanonicalizationHectoplies,
            5 => InputFormat::WithCanonicalizationV2,
            132 => InputFormat::HectopliesArmageddon,
            133 => InputFormat::CanonicalizationV2Armageddon,
            other => InputFormat::Other(other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    Unknown = 0,
    Classical = 1,
    Wdl = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovesLeftFormat {
    None = 0,
    V1 = 1,
}

/// What a backend consumes and produces, checked by the host before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCapabilities {
    pub input_format: InputFormat,
    pub output_format: OutputFormat,
    pub moves_left: MovesLeftFormat,
}

impl NetworkCapabilities {
    pub fn has_wdl(&self) -> bool { self.output_format == OutputFormat::Wdl }

    pub fn has_mlh(&self) -> bool { self.moves_left != MovesLeftFormat::None }

    pub fn check_input_format(&self, format: InputFormat) -> Result<(), BackendError> {
        if format != self.input_format {
            return Err(BackendError::IncompatibleInputFormat { expected: self.input_format, actual: format });
        }
        Ok(())
    }
}

impl Default for NetworkCapabilities {
    fn default() -> Self {
        Self {
            input_format: InputFormat::Classical112,
            output_format: OutputFormat::Classical,
            moves_left: MovesLeftFormat::None,
        }
    }
}

/// One batch of positions.
///
/// Callers add every input, call `compute_blocking` once, then read results
/// for samples `0..batch_size()`. Sample and move indices out of range are
/// caller bugs; implementations may panic on them.
pub trait NetworkComputation {
    fn add_input(&mut self, input: InputPlanes);

    /// Runs any deferred work. Results are only valid after this returns.
    fn compute_blocking(&mut self) -> Result<(), BackendError>;

    fn batch_size(&self) -> usize;

    /// Expected outcome in (-1, 1) for the side to move.
    fn value(&self, sample: usize) -> f32;

    fn draw(&self, sample: usize) -> f32;

    fn moves_left(&self, sample: usize) -> f32;

    /// Log-probability of move `move_id` (`0..POLICY_SIZE`).
    fn policy_logit(&self, sample: usize, move_id: usize) -> f32;
}

pub trait Network: Send + Sync {
    fn capabilities(&self) -> &NetworkCapabilities;

    fn new_computation(&self) -> Box<dyn NetworkComputation + '_>;
}
