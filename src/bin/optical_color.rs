//! Driver: fit the i-r correction against the g-r rest-frame color.
//!
//! Mirrors the optical workflow: clean the catalog, cut to the higher
//! redshifts to avoid selection effects, fit the correction model, then
//! apply the predicted coefficients to recover rest-frame colors for the
//! whole catalog. The catalog here is synthesized in place of the survey
//! pickle the real workflow loads.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use kcorr::prelude::*;

/// True correction coefficient as a function of the reference color, used
/// to synthesize the catalog and to check the recovered model against.
fn a1_true(gr: f64) -> f64 {
    1.8 + 0.6 * gr
}

struct Catalog {
    observed_i: Vec<f64>,
    observed_r: Vec<f64>,
    gabs_minus_rabs: Vec<f64>,
    redshift: Vec<f64>,
}

/// Synthesize a catalog with a tight i-r vs g-r relation, redshifted
/// observed colors, and a sprinkling of sentinel rows the cleaning step
/// must remove.
fn synthesize(n: usize, seed: u64) -> Catalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let color_dist = Normal::new(0.65, 0.15).unwrap();
    let noise = Normal::new(0.0, 0.05).unwrap();

    let mut observed_i = Vec::with_capacity(n);
    let mut observed_r = Vec::with_capacity(n);
    let mut gabs_minus_rabs = Vec::with_capacity(n);
    let mut redshift = Vec::with_capacity(n);

    for i in 0..n {
        let gr: f64 = color_dist.sample(&mut rng);
        let z: f64 = rng.gen_range(0.0..0.30);

        let rest_ir = 0.35 * gr + 0.10;
        let obs_r = 17.0 + rng.gen_range(0.0..2.0);
        let obs_ir = rest_ir + a1_true(gr) * z + noise.sample(&mut rng);

        // Sentinel rows the survey pipeline leaves behind
        if i % 5000 == 0 {
            observed_i.push(f64::INFINITY);
        } else {
            observed_i.push(obs_r + obs_ir);
        }
        observed_r.push(obs_r);
        gabs_minus_rabs.push(gr);
        redshift.push(z);
    }

    Catalog {
        observed_i,
        observed_r,
        gabs_minus_rabs,
        redshift,
    }
}

fn main() -> Result<(), KcorrError> {
    env_logger::init();

    let catalog = synthesize(120_000, 20240917);

    // Clean catalog; remove rows where values are undefined, and only fit
    // in the higher redshifts to avoid selection effects.
    let mut observed_color = Vec::new();
    let mut restframe_color = Vec::new();
    let mut redshift = Vec::new();
    for i in 0..catalog.redshift.len() {
        let obs_ir = catalog.observed_i[i] - catalog.observed_r[i];
        if !obs_ir.is_finite() || catalog.redshift[i] <= 0.04 {
            continue;
        }
        observed_color.push(obs_ir);
        restframe_color.push(catalog.gabs_minus_rabs[i]);
        redshift.push(catalog.redshift[i]);
    }
    log::info!(
        "{} of {} rows pass the cleaning cuts",
        redshift.len(),
        catalog.redshift.len()
    );

    let model = Kcorrection::new()
        .sample_per_bin(5350)
        .color_name("i-r")
        .build()?;
    let fit = model.fit(&observed_color, &restframe_color, &redshift)?;

    println!("{fit}");

    // Determine a1 for each galaxy and recover the rest-frame color
    let a1s = fit.predict_many(&restframe_color);
    let mut max_dev: f64 = 0.0;
    let mut sum_abs_err = 0.0;
    for (i, a1) in a1s.iter().enumerate() {
        let rest_ir = observed_color[i] - a1 * redshift[i];
        let truth = 0.35 * restframe_color[i] + 0.10;
        sum_abs_err += (rest_ir - truth).abs();
        max_dev = max_dev.max((a1 - a1_true(restframe_color[i])).abs());
    }
    log::info!("largest |a1 - a1_true| over the catalog: {max_dev:.4}");
    log::info!(
        "mean |recovered - true| rest-frame i-r: {:.4}",
        sum_abs_err / a1s.len() as f64
    );

    Ok(())
}
