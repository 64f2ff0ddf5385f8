// demos/train_polynomial.rs
use log::info;
use tricklearn::{
    polynomial_regression, polynomial_regression_regularized, BatchMode, Penalty, TrainConfig,
};

fn main() -> tricklearn::Result<()> {
    env_logger::init();

    // y = x^2 - 2x + 1 sampled on [-2, 3]
    let xs: Vec<f64> = (0..11).map(|i| -2.0 + 0.5 * i as f64).collect();
    let ys: Vec<f64> = xs.iter().map(|x| x * x - 2.0 * x + 1.0).collect();

    let config = TrainConfig::default()
        .with_learning_rate(0.0005)
        .with_epochs(5000)
        .with_mode(BatchMode::Full);

    for degree in 1..=3 {
        let fit = polynomial_regression(&xs, &ys, degree, &config)?;
        info!(
            "degree {}: {:.3}, final rmse = {:.4}",
            degree,
            fit.model,
            fit.loss_history.last().copied().unwrap_or(f64::NAN)
        );
        info!("  p(4) = {:.3} (true value 9)", fit.model.evaluate(4.0));
    }

    // the cubic fit again, with and without weight penalties
    for (penalty, alpha) in [(Penalty::None, 0.0), (Penalty::L1, 0.05), (Penalty::L2, 0.05)] {
        let fit = polynomial_regression_regularized(&xs, &ys, 3, penalty, alpha, &config)?;
        info!(
            "degree 3, penalty {} (alpha {}): {:.3}",
            penalty, alpha, fit.model
        );
    }
    Ok(())
}
