// demos/train_classifiers.rs
use log::info;
use ndarray::ArrayView1;
use tricklearn::model::{accuracy, LogisticModel, PerceptronModel};
use tricklearn::{
    logistic_regression_algorithm, perceptron_algorithm, InferenceModel, TrainConfig,
};

fn main() -> tricklearn::Result<()> {
    env_logger::init();

    // sentiment toy set: (count of "aack", count of "beep") -> happy?
    let x = vec![
        vec![1.0, 0.0],
        vec![0.0, 2.0],
        vec![1.0, 1.0],
        vec![1.0, 2.0],
        vec![1.0, 3.0],
        vec![2.0, 2.0],
        vec![2.0, 3.0],
        vec![3.0, 2.0],
    ];
    let y = vec![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

    let config = TrainConfig::perceptron().with_learning_rate(0.05);
    let outcome = perceptron_algorithm(x.clone(), y.clone(), &config)?;
    info!(
        "perceptron: w = {}, b = {:.3}, error {:.3} -> {:.3}",
        outcome.final_weights(),
        outcome.final_bias(),
        outcome.loss_history[0],
        outcome.last_loss().unwrap_or(f64::NAN)
    );
    let perceptron = PerceptronModel::from(outcome);
    let predictions = x
        .iter()
        .map(|row| perceptron.predict(ArrayView1::from(row.as_slice())))
        .collect::<tricklearn::Result<Vec<f64>>>()?;
    info!("perceptron accuracy: {:.2}", accuracy(&y, &predictions)?);

    let config = TrainConfig::default().with_learning_rate(0.1);
    let outcome = logistic_regression_algorithm(x.clone(), y.clone(), &config)?;
    info!(
        "logistic: w = {}, b = {:.3}, log loss {:.3} -> {:.3}",
        outcome.final_weights(),
        outcome.final_bias(),
        outcome.loss_history[0],
        outcome.last_loss().unwrap_or(f64::NAN)
    );
    let logistic = LogisticModel::from(outcome);
    let mut classes = Vec::with_capacity(x.len());
    for row in &x {
        let view = ArrayView1::from(row.as_slice());
        info!(
            "  {:?} -> p = {:.3}",
            row,
            logistic.predict(view)?
        );
        classes.push(logistic.predict_class(view)?);
    }
    info!("logistic accuracy: {:.2}", accuracy(&y, &classes)?);
    Ok(())
}
