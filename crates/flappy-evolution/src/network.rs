use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::EvolutionError;

/// Layer sizes of a single-hidden-layer network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkShape {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Default for NetworkShape {
    fn default() -> Self {
        Self::new(3, 3, 1)
    }
}

impl NetworkShape {
    #[must_use]
    pub const fn new(inputs: usize, hidden: usize, outputs: usize) -> Self {
        Self {
            inputs,
            hidden,
            outputs,
        }
    }

    /// Total number of weights and biases.
    #[must_use]
    pub const fn parameter_count(&self) -> usize {
        self.inputs * self.hidden + self.hidden + self.hidden * self.outputs + self.outputs
    }
}

/// Feed-forward network with one hidden layer and `tanh` activations.
///
/// `hidden = tanh(x · W1 + b1)` and `output = tanh(hidden · W2 + b2)`, so every
/// output lies in `(-1, 1)` and a network of zeros outputs exactly zero.
///
/// Parameters never change after construction. Shapes are checked once in
/// [`NeuralNetwork::new`]; deserialization goes through the same check.
///
/// # Example
///
/// ```
/// use flappy_evolution::{NetworkShape, NeuralNetwork};
///
/// let network = NeuralNetwork::zeros(NetworkShape::new(3, 3, 1));
/// let output = network.forward(&[0.0, 0.0, 0.0]).unwrap();
/// assert_eq!(output.to_vec(), vec![0.0]);
///
/// assert!(network.forward(&[0.0, 0.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NetworkParams", into = "NetworkParams")]
pub struct NeuralNetwork {
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
}

/// Unchecked wire form of [`NeuralNetwork`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct NetworkParams {
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
}

impl TryFrom<NetworkParams> for NeuralNetwork {
    type Error = EvolutionError;

    fn try_from(params: NetworkParams) -> Result<Self, Self::Error> {
        Self::new(params.w1, params.b1, params.w2, params.b2)
    }
}

impl From<NeuralNetwork> for NetworkParams {
    fn from(network: NeuralNetwork) -> Self {
        Self {
            w1: network.w1,
            b1: network.b1,
            w2: network.w2,
            b2: network.b2,
        }
    }
}

fn ensure(what: &'static str, expected: usize, actual: usize) -> Result<(), EvolutionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(EvolutionError::DimensionMismatch {
            what,
            expected,
            actual,
        })
    }
}

fn ensure_non_empty(what: &'static str, len: usize) -> Result<(), EvolutionError> {
    if len == 0 {
        return Err(EvolutionError::DimensionMismatch {
            what,
            expected: 1,
            actual: 0,
        });
    }
    Ok(())
}

impl NeuralNetwork {
    /// Builds a network from its parameters, checking that the shapes agree.
    ///
    /// `w1` is `inputs × hidden`, `b1` has `hidden` entries, `w2` is
    /// `hidden × outputs` and `b2` has `outputs` entries. Every layer must have
    /// at least one unit.
    pub fn new(
        w1: Array2<f32>,
        b1: Array1<f32>,
        w2: Array2<f32>,
        b2: Array1<f32>,
    ) -> Result<Self, EvolutionError> {
        ensure_non_empty("input layer", w1.nrows())?;
        ensure_non_empty("hidden layer", w1.ncols())?;
        ensure_non_empty("output layer", w2.ncols())?;
        ensure("hidden bias", w1.ncols(), b1.len())?;
        ensure("hidden-to-output weight rows", w1.ncols(), w2.nrows())?;
        ensure("output bias", w2.ncols(), b2.len())?;
        Ok(Self::from_parts(w1, b1, w2, b2))
    }

    /// Assembles parameters already known to be consistent.
    pub(crate) fn from_parts(
        w1: Array2<f32>,
        b1: Array1<f32>,
        w2: Array2<f32>,
        b2: Array1<f32>,
    ) -> Self {
        debug_assert_eq!(w1.ncols(), b1.len());
        debug_assert_eq!(w1.ncols(), w2.nrows());
        debug_assert_eq!(w2.ncols(), b2.len());
        Self { w1, b1, w2, b2 }
    }

    /// Creates a network whose parameters are drawn from the standard normal
    /// distribution, in the order W1, b1, W2, b2 (row-major).
    pub fn random<R>(shape: NetworkShape, rng: &mut R) -> Result<Self, EvolutionError>
    where
        R: Rng + ?Sized,
    {
        let mut normal = || rng.sample::<f32, _>(StandardNormal);
        let w1 = Array2::from_shape_simple_fn((shape.inputs, shape.hidden), &mut normal);
        let b1 = Array1::from_shape_simple_fn(shape.hidden, &mut normal);
        let w2 = Array2::from_shape_simple_fn((shape.hidden, shape.outputs), &mut normal);
        let b2 = Array1::from_shape_simple_fn(shape.outputs, &mut normal);
        Self::new(w1, b1, w2, b2)
    }

    /// Creates a network with every weight and bias set to zero.
    ///
    /// # Panics
    ///
    /// Panics if a layer of `shape` is empty.
    #[must_use]
    pub fn zeros(shape: NetworkShape) -> Self {
        Self::new(
            Array2::zeros((shape.inputs, shape.hidden)),
            Array1::zeros(shape.hidden),
            Array2::zeros((shape.hidden, shape.outputs)),
            Array1::zeros(shape.outputs),
        )
        .expect("zero network shape must have non-empty layers")
    }

    #[must_use]
    pub fn shape(&self) -> NetworkShape {
        NetworkShape::new(self.w1.nrows(), self.w1.ncols(), self.w2.ncols())
    }

    #[must_use]
    pub fn w1(&self) -> &Array2<f32> {
        &self.w1
    }

    #[must_use]
    pub fn b1(&self) -> &Array1<f32> {
        &self.b1
    }

    #[must_use]
    pub fn w2(&self) -> &Array2<f32> {
        &self.w2
    }

    #[must_use]
    pub fn b2(&self) -> &Array1<f32> {
        &self.b2
    }

    /// Evaluates the network.
    ///
    /// Fails with [`EvolutionError::DimensionMismatch`] if `input` does not have
    /// exactly one value per input unit.
    pub fn forward(&self, input: &[f32]) -> Result<Array1<f32>, EvolutionError> {
        ensure("network input", self.w1.nrows(), input.len())?;
        let input = ArrayView1::from(input);

        let mut hidden = input.dot(&self.w1) + &self.b1;
        hidden.mapv_inplace(f32::tanh);

        let mut output = hidden.dot(&self.w2) + &self.b2;
        output.mapv_inplace(f32::tanh);
        Ok(output)
    }
}
