use std::f64::consts::E;

pub fn sigmoid(x: f64) -> f64 {
    1. / (1. + E.powf(-x))
}

/// Takes the sigmoid output `y`, not its input.
pub fn sigmoid_derivative(y: f64) -> f64 {
    y * (1. - y)
}

pub fn relu(x: f64) -> f64 {
    if x < 0. {
        return 0.;
    }
    x
}

/// Takes the relu output `y`, not its input.
pub fn relu_derivative(y: f64) -> f64 {
    if y > 0. {
        return 1.;
    }
    0.
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        assert_abs_diff_eq!(sigmoid(0.), 0.5, epsilon = 1e-12);
        assert!(sigmoid(8.) < 1. && sigmoid(8.) > 0.99);
        assert!(sigmoid(-8.) > 0. && sigmoid(-8.) < 0.01);
    }

    #[test]
    fn sigmoid_derivative_uses_output() {
        let y = sigmoid(0.3);
        assert_abs_diff_eq!(sigmoid_derivative(y), y * (1. - y), epsilon = 1e-15);
        assert_abs_diff_eq!(sigmoid_derivative(0.5), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn relu_pair() {
        assert_eq!(relu(-3.), 0.);
        assert_eq!(relu(2.5), 2.5);
        assert_eq!(relu_derivative(0.), 0.);
        assert_eq!(relu_derivative(2.5), 1.);
    }
}
