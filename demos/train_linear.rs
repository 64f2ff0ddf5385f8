// demos/train_linear.rs
// RUST_LOG=info cargo run --example train_linear
use log::info;
use tricklearn::{linear_regression, predict, BatchMode, RegressionMetric, TrainConfig, Trick};

fn main() -> tricklearn::Result<()> {
    env_logger::init();

    // rooms -> price, roughly price = 50 * rooms + 100
    let rooms = [1.0, 2.0, 3.0, 5.0, 6.0, 7.0];
    let prices = [155.0, 197.0, 244.0, 356.0, 407.0, 448.0];

    for trick in [Trick::Simple, Trick::Absolute, Trick::Square] {
        for mode in [BatchMode::Stochastic, BatchMode::Full, BatchMode::MiniBatch] {
            let config = TrainConfig::default()
                .with_trick(trick)
                .with_mode(mode)
                .with_error(RegressionMetric::Rmse)
                .with_learning_rate(0.01)
                .with_epochs(10_000)
                .with_batch_size(3);
            let outcome = linear_regression(&rooms, &prices, &config)?;
            let four_rooms = predict(&outcome.params, &[4.0])?;
            info!(
                "{:>8} / {:<5}: {:.3}, rmse = {:8.3}, price(4) = {:7.2}",
                trick.to_string(),
                mode.to_string(),
                outcome.params,
                outcome.last_loss().unwrap_or(f64::NAN),
                four_rooms
            );
        }
    }
    Ok(())
}
