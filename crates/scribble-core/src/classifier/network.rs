//! Dense classification network
//!
//! A small fully-connected network (784 -> hidden ReLU -> classes softmax)
//! trained with minibatch SGD and cross-entropy loss. It trains in a few
//! seconds on the synthetic set at startup; there is no persistence and no
//! pretrained weights.

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::TrainingDefaults;
use crate::verbose_println;

/// Probabilities below this floor are clamped before taking the log.
const LOG_FLOOR: f32 = 1e-7;

/// Two-layer dense network with softmax output.
pub struct Network {
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
}

impl Network {
    /// Create an untrained network with He-initialized weights.
    pub fn new(inputs: usize, hidden: usize, classes: usize, rng: &mut StdRng) -> Self {
        Self {
            w1: he_init(inputs, hidden, rng),
            b1: Array1::zeros(hidden),
            w2: he_init(hidden, classes, rng),
            b2: Array1::zeros(classes),
        }
    }

    /// Number of input features the network expects.
    pub fn input_len(&self) -> usize {
        self.w1.nrows()
    }

    /// Number of output classes.
    pub fn class_count(&self) -> usize {
        self.w2.ncols()
    }

    /// Forward pass for a single feature vector.
    ///
    /// Returns a probability distribution: non-negative values summing to
    /// ~1.0, one per class in label-alphabet order.
    pub fn predict(&self, features: &[f32]) -> Result<Vec<f32>, String> {
        if features.len() != self.input_len() {
            return Err(format!(
                "feature vector has {} values, network expects {}",
                features.len(),
                self.input_len()
            ));
        }

        let x = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| format!("failed to shape feature vector: {}", e))?;
        let (_, probs) = self.forward(&x);
        Ok(probs.row(0).to_vec())
    }

    /// Train on the given set with minibatch SGD.
    ///
    /// `features` is `[n, inputs]`, `labels` is one-hot `[n, classes]`.
    pub fn train(
        &mut self,
        features: &Array2<f32>,
        labels: &Array2<f32>,
        params: &TrainingDefaults,
        rng: &mut StdRng,
    ) -> Result<(), String> {
        if features.nrows() != labels.nrows() {
            return Err(format!(
                "feature/label row mismatch: {} vs {}",
                features.nrows(),
                labels.nrows()
            ));
        }
        if features.ncols() != self.input_len() || labels.ncols() != self.class_count() {
            return Err(format!(
                "training set shape [{}x{}] / [{}x{}] does not fit network [{} -> {}]",
                features.nrows(),
                features.ncols(),
                labels.nrows(),
                labels.ncols(),
                self.input_len(),
                self.class_count()
            ));
        }

        let n = features.nrows();
        let mut order: Vec<usize> = (0..n).collect();

        for epoch in 0..params.epochs {
            order.shuffle(rng);

            let mut epoch_loss = 0.0;
            let mut batches = 0usize;
            for chunk in order.chunks(params.batch_size) {
                let x = features.select(Axis(0), chunk);
                let y = labels.select(Axis(0), chunk);
                epoch_loss += self.train_batch(&x, &y, params.learning_rate);
                batches += 1;
            }

            verbose_println!(
                "[scribble] epoch {}/{}: mean loss {:.4}",
                epoch + 1,
                params.epochs,
                epoch_loss / batches.max(1) as f32
            );
        }

        Ok(())
    }

    /// One gradient step on a minibatch; returns the batch cross-entropy loss.
    fn train_batch(&mut self, x: &Array2<f32>, y: &Array2<f32>, learning_rate: f32) -> f32 {
        let batch = x.nrows() as f32;

        // Forward
        let z1 = x.dot(&self.w1) + &self.b1;
        let a1 = z1.mapv(|v| v.max(0.0));
        let z2 = a1.dot(&self.w2) + &self.b2;
        let probs = softmax_rows(z2);

        let loss = cross_entropy(&probs, y);

        // Backward
        let dz2 = (&probs - y) / batch;
        let dw2 = a1.t().dot(&dz2);
        let db2 = dz2.sum_axis(Axis(0));

        let da1 = dz2.dot(&self.w2.t());
        let relu_mask = z1.mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });
        let dz1 = da1 * relu_mask;
        let dw1 = x.t().dot(&dz1);
        let db1 = dz1.sum_axis(Axis(0));

        self.w2.scaled_add(-learning_rate, &dw2);
        self.b2.scaled_add(-learning_rate, &db2);
        self.w1.scaled_add(-learning_rate, &dw1);
        self.b1.scaled_add(-learning_rate, &db1);

        loss
    }

    /// Forward pass for a batch; returns hidden activations and class probabilities.
    fn forward(&self, x: &Array2<f32>) -> (Array2<f32>, Array2<f32>) {
        let a1 = (x.dot(&self.w1) + &self.b1).mapv(|v| v.max(0.0));
        let probs = softmax_rows(a1.dot(&self.w2) + &self.b2);
        (a1, probs)
    }

    /// Fraction of rows whose argmax matches the one-hot label.
    pub fn accuracy(&self, features: &Array2<f32>, labels: &Array2<f32>) -> f32 {
        let (_, probs) = self.forward(features);
        let mut correct = 0usize;
        for (p_row, y_row) in probs.axis_iter(Axis(0)).zip(labels.axis_iter(Axis(0))) {
            if argmax(p_row.as_slice().unwrap_or(&[])) == argmax(y_row.as_slice().unwrap_or(&[])) {
                correct += 1;
            }
        }
        correct as f32 / features.nrows().max(1) as f32
    }
}

/// He initialization: normal-ish weights scaled by sqrt(2 / fan_in).
fn he_init(rows: usize, cols: usize, rng: &mut StdRng) -> Array2<f32> {
    let scale = (2.0 / rows.max(1) as f32).sqrt();
    Array2::from_shape_fn((rows, cols), |_| {
        // Sum of uniforms approximates a normal well enough for init.
        let u: f32 = rng.gen::<f32>() + rng.gen::<f32>() + rng.gen::<f32>() - 1.5;
        u * scale
    })
}

/// Row-wise numerically stable softmax.
fn softmax_rows(mut z: Array2<f32>) -> Array2<f32> {
    for mut row in z.rows_mut() {
        let max = row.fold(f32::NEG_INFINITY, |m, &v| m.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        if sum > 0.0 {
            row.mapv_inplace(|v| v / sum);
        }
    }
    z
}

/// Mean cross-entropy between predicted distributions and one-hot labels.
fn cross_entropy(probs: &Array2<f32>, labels: &Array2<f32>) -> f32 {
    let n = probs.nrows().max(1) as f32;
    let mut loss = 0.0;
    for (p_row, y_row) in probs.axis_iter(Axis(0)).zip(labels.axis_iter(Axis(0))) {
        for (&p, &y) in p_row.iter().zip(y_row.iter()) {
            if y > 0.0 {
                loss -= y * p.max(LOG_FLOOR).ln();
            }
        }
    }
    loss / n
}

fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}
