use rand::{thread_rng, Rng};

use crate::nn::NeuralNetwork;

impl NeuralNetwork {
    /// Nudges each weight and bias by `U(-1, 1)` with probability `rate`.
    pub fn mutate(&mut self, rate: f64) {
        self.mutate_with_rng(rate, &mut thread_rng())
    }

    pub fn mutate_with_rng<R: Rng + ?Sized>(&mut self, rate: f64, rng: &mut R) {
        // Also keeps copy-on-write storage shared when nothing would change.
        if rate <= 0. {
            return;
        }

        for m in self.params_mut() {
            m.map_inplace(|v| {
                if rng.gen::<f64>() < rate {
                    v + rng.gen_range(-1.0..1.0)
                } else {
                    v
                }
            });
        }
        self.apply_clamp();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::config::ParameterClamp;
    use crate::nn::NeuralNetwork;

    fn params(nn: &NeuralNetwork) -> Vec<f64> {
        nn.weights()
            .chain(nn.biases())
            .flat_map(|m| m.iter().copied())
            .collect()
    }

    #[test]
    fn zero_rate_is_a_no_op() {
        let mut nn = NeuralNetwork::new(vec![3, 5, 2]).unwrap();
        let before = nn.copy();
        nn.mutate(0.);
        assert_eq!(nn, before);
    }

    #[test]
    fn full_rate_touches_every_parameter() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut nn = NeuralNetwork::with_rng(vec![3, 5, 2], &mut rng).unwrap();
        let before = params(&nn);

        nn.mutate_with_rng(1., &mut rng);
        let after = params(&nn);

        for (b, a) in before.iter().zip(after.iter()) {
            assert_ne!(a, b);
            assert!((a - b).abs() < 1.);
        }
    }

    #[test]
    fn partial_rate_touches_some() {
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut nn = NeuralNetwork::with_rng(vec![10, 10, 10], &mut rng).unwrap();
        let before = params(&nn);

        nn.mutate_with_rng(0.5, &mut rng);
        let changed = before
            .iter()
            .zip(params(&nn).iter())
            .filter(|(b, a)| a != b)
            .count();

        // 220 parameters at 50%.
        assert!(changed > 60 && changed < 160, "changed {}", changed);
    }

    #[test]
    fn mutating_a_copy_leaves_the_original() {
        let original = NeuralNetwork::new(vec![2, 4, 1]).unwrap();
        let snapshot = params(&original);

        let mut copy = original.copy();
        assert_eq!(params(&copy), snapshot);

        copy.mutate(1.);
        assert_eq!(params(&original), snapshot);
        assert_ne!(params(&copy), snapshot);
    }

    #[test]
    fn clamp_holds_under_mutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut nn = NeuralNetwork::with_rng(vec![4, 4], &mut rng).unwrap();
        nn.set_clamp(Some(ParameterClamp::new(-0.5, 0.5).unwrap()));

        for _ in 0..10 {
            nn.mutate_with_rng(1., &mut rng);
        }
        assert!(params(&nn).iter().all(|v| v.abs() <= 0.5));
    }
}
