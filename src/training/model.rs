use ndarray::{Array1, Array2};

/// Logistic-regression classifier fit by batch gradient descent.
#[derive(Debug, Clone)]
pub struct LogisticModel {
    weights: Array1<f64>,
    bias: f64,
}

impl LogisticModel {
    pub fn fit(
        features: &Array2<f64>,
        targets: &Array1<f64>,
        epochs: usize,
        learning_rate: f64,
    ) -> Self {
        let samples = features.nrows().max(1) as f64;
        let mut weights = Array1::<f64>::zeros(features.ncols());
        let mut bias = 0.0;

        for _ in 0..epochs {
            let logits = features.dot(&weights) + bias;
            let predictions = logits.mapv(sigmoid);
            let errors = &predictions - targets;

            let gradient = features.t().dot(&errors) / samples;
            let bias_gradient = errors.sum() / samples;

            weights.scaled_add(-learning_rate, &gradient);
            bias -= learning_rate * bias_gradient;
        }

        Self { weights, bias }
    }

    pub fn predict_proba(&self, features: &Array2<f64>) -> Array1<f64> {
        (features.dot(&self.weights) + self.bias).mapv(sigmoid)
    }

    /// Fraction of rows whose thresholded prediction matches the target.
    pub fn accuracy(&self, features: &Array2<f64>, targets: &Array1<f64>) -> f64 {
        if targets.is_empty() {
            return 0.0;
        }

        let predictions = self.predict_proba(features);
        let correct = predictions
            .iter()
            .zip(targets.iter())
            .filter(|(probability, target)| {
                let predicted = if **probability >= 0.5 { 1.0 } else { 0.0 };
                predicted == **target
            })
            .count();

        correct as f64 / targets.len() as f64
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
