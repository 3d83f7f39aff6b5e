use mixem::{
    ConvergenceCriterion, EmConfig, GaussianMixtureEm, SampleSet, TraceWriter,
};
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Three-Component Gaussian Mixture (EM) ===\n");

    // Three well separated groups, one per component
    let samples = SampleSet::from_slice(&[1.0, 2.0, 3.0, 10.0, 11.0, 12.0, 20.0, 21.0, 22.0])?;
    println!("Dataset: {} samples in [{}, {}]", samples.len(), samples.min(), samples.max());
    println!("Expected means: about 2, 11 and 21\n");

    let em = GaussianMixtureEm::new();
    let result = em.fit(&samples)?;

    let mut writer = TraceWriter::new(std::io::stdout().lock());
    writer.write_all(&result.trace)?;

    println!("\nTermination: {:?} after {} rounds", result.termination, result.n_rounds());
    println!("Final means: {}", result.means);
    println!(
        "Reported objective (Q): {:.5}",
        result.final_objective().unwrap_or(0.0)
    );
    println!(
        "Marginal log-likelihood: {:.5}",
        result.marginal_log_likelihood(&samples)
    );

    println!("\n=== Assigning New Points ===");
    let new_points = array![0.0, 6.0, 7.0, 15.5, 30.0];
    let labels = result.predict(&new_points)?;
    let proba = result.predict_proba(&new_points)?;
    for (i, x) in new_points.iter().enumerate() {
        println!(
            "  x = {:>5.1} -> component {} (p = [{:.3}, {:.3}, {:.3}])",
            x,
            labels[i],
            proba[[i, 0]],
            proba[[i, 1]],
            proba[[i, 2]]
        );
    }

    println!("\n=== Synthetic Data: Signed vs Absolute Convergence ===");
    let synthetic = SampleSet::synthetic([-4.0, 0.0, 5.0], 50, 1.0, 42)?;
    for criterion in [ConvergenceCriterion::Signed, ConvergenceCriterion::Absolute] {
        let em = GaussianMixtureEm::with_config(EmConfig::new().criterion(criterion).max_iter(500));
        match em.fit(&synthetic) {
            Ok(result) => println!(
                "{:?}: {} rounds, means {}, {:?}",
                criterion,
                result.n_rounds(),
                result.means,
                result.termination
            ),
            Err(e) => println!("{:?} failed: {}", criterion, e),
        }
    }

    Ok(())
}
