use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::ActivationFunction};

/// Fully connected layer: `a = f(x · W + b)`.
///
/// `weights` is (input_size, size); `biases` is (1, size).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new(size: usize, input_size: usize, activation: ActivationFunction) -> Layer {
        let weights = if activation.prefers_he_init() {
            Matrix::he(input_size, size)
        } else {
            Matrix::random(input_size, size)
        };

        Layer {
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation
        }
    }

    /// Number of values this layer consumes.
    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// Checks the weight and bias tables against `size`.
    pub fn check_shape(&self) -> Result<(), String> {
        if !self.weights.is_well_formed() {
            return Err(format!(
                "weights declare {}x{} but hold {} rows",
                self.weights.rows, self.weights.cols, self.weights.data.len()
            ));
        }
        if self.weights.cols != self.size {
            return Err(format!("weights have {} columns for {} units", self.weights.cols, self.size));
        }
        if !self.biases.is_well_formed() || self.biases.rows != 1 || self.biases.cols != self.size {
            return Err(format!("biases must be 1x{}", self.size));
        }
        Ok(())
    }

    /// Forward pass without touching any layer state, so a loaded model can be
    /// shared between threads. Returns `None` on an input length mismatch.
    pub fn forward(&self, input: &[f64]) -> Option<Vec<f64>> {
        let mut z = self.weights.row_product(input)?;
        if let Some(bias) = self.biases.data.first() {
            for (v, b) in z.iter_mut().zip(bias.iter()) {
                *v += b;
            }
        }
        self.activator.apply(&mut z);
        Some(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_applies_weights_bias_and_activation() {
        let layer = Layer {
            size: 1,
            weights: Matrix::from_data(vec![vec![2.0], vec![-1.0]]),
            biases: Matrix::from_data(vec![vec![0.5]]),
            activator: ActivationFunction::Identity,
        };
        assert_eq!(layer.forward(&[1.0, 1.0]), Some(vec![1.5]));
        assert_eq!(layer.forward(&[1.0]), None);
    }

    #[test]
    fn new_layer_has_expected_shapes() {
        let layer = Layer::new(4, 6, ActivationFunction::ReLU);
        assert_eq!(layer.input_size(), 6);
        assert_eq!((layer.weights.rows, layer.weights.cols), (6, 4));
        assert_eq!((layer.biases.rows, layer.biases.cols), (1, 4));
    }
}
