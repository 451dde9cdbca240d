//! Driver: fit the r-W4 correction against the g-r rest-frame color.
//!
//! Mirrors the infrared workflow: clean the catalog, cut to the higher
//! redshifts, cut on the W4 photometric error, fit the correction model,
//! then apply the predicted coefficients to recover rest-frame colors for
//! the whole catalog. The catalog here is synthesized in place of the
//! survey pickle the real workflow loads.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use kcorr::prelude::*;

/// True correction coefficient as a function of the reference color.
/// The W4 correction runs steeper and redder than the optical one.
fn a1_true(gr: f64) -> f64 {
    3.1 - 1.2 * gr
}

struct Catalog {
    observed_r: Vec<f64>,
    observed_w4: Vec<f64>,
    observed_e_w4: Vec<f64>,
    kcorrect_g_minus_r: Vec<f64>,
    redshift: Vec<f64>,
}

/// Synthesize a catalog with a loose r-W4 vs g-r relation, redshifted
/// observed colors, a W4 error column, and sentinel rows the cleaning step
/// must remove.
fn synthesize(n: usize, seed: u64) -> Catalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let color_dist = Normal::new(0.55, 0.18).unwrap();
    let noise = Normal::new(0.0, 0.12).unwrap();

    let mut observed_r = Vec::with_capacity(n);
    let mut observed_w4 = Vec::with_capacity(n);
    let mut observed_e_w4 = Vec::with_capacity(n);
    let mut kcorrect_g_minus_r = Vec::with_capacity(n);
    let mut redshift = Vec::with_capacity(n);

    for i in 0..n {
        let gr: f64 = color_dist.sample(&mut rng);
        let z: f64 = rng.gen_range(0.0..0.28);

        let rest_rw4 = 5.2 - 1.4 * gr;
        let obs_r = 16.5 + rng.gen_range(0.0..2.5);
        let obs_rw4 = rest_rw4 + a1_true(gr) * z + noise.sample(&mut rng);

        // W4 is shallow; errors are broad and sometimes flagged -99
        let e_w4 = if i % 4000 == 0 {
            -99.0
        } else {
            rng.gen_range(0.02..0.40)
        };

        observed_r.push(obs_r);
        observed_w4.push(obs_r - obs_rw4);
        observed_e_w4.push(e_w4);
        kcorrect_g_minus_r.push(gr);
        redshift.push(z);
    }

    Catalog {
        observed_r,
        observed_w4,
        observed_e_w4,
        kcorrect_g_minus_r,
        redshift,
    }
}

fn main() -> Result<(), KcorrError> {
    env_logger::init();

    let catalog = synthesize(60_000, 20241104);

    // Clean catalog; drop flagged errors, only fit in the higher redshifts
    // to avoid selection effects, and apply the W4 error cut.
    let mut observed_color = Vec::new();
    let mut restframe_color = Vec::new();
    let mut redshift = Vec::new();
    for i in 0..catalog.redshift.len() {
        let e_w4 = catalog.observed_e_w4[i];
        if e_w4 == -99.0 || !(e_w4 < 0.25) || catalog.redshift[i] <= 0.04 {
            continue;
        }
        observed_color.push(catalog.observed_r[i] - catalog.observed_w4[i]);
        restframe_color.push(catalog.kcorrect_g_minus_r[i]);
        redshift.push(catalog.redshift[i]);
    }
    log::info!(
        "{} of {} rows pass the cleaning cuts",
        redshift.len(),
        catalog.redshift.len()
    );

    let model = Kcorrection::new()
        .sample_per_bin(1030)
        .color_name("r-W4")
        .build()?;
    let fit = model.fit(&observed_color, &restframe_color, &redshift)?;

    println!("{fit}");

    // Determine a1 for each galaxy and recover the rest-frame color
    let a1s = fit.predict_many(&restframe_color);
    let mut max_dev: f64 = 0.0;
    let mut sum_abs_err = 0.0;
    for (i, a1) in a1s.iter().enumerate() {
        let rest_rw4 = observed_color[i] - a1 * redshift[i];
        let truth = 5.2 - 1.4 * restframe_color[i];
        sum_abs_err += (rest_rw4 - truth).abs();
        max_dev = max_dev.max((a1 - a1_true(restframe_color[i])).abs());
    }
    log::info!("largest |a1 - a1_true| over the catalog: {max_dev:.4}");
    log::info!(
        "mean |recovered - true| rest-frame r-W4: {:.4}",
        sum_abs_err / a1s.len() as f64
    );

    Ok(())
}
