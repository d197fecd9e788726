use std::env;

use anyhow::{bail, Context};
use log::info;

use mlp_eval::config::{self, CONFIG_VAR};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let Some(path) = config::config_path(env::args().skip(1)) else {
        bail!("usage: mlp-eval <config.json> (or set {CONFIG_VAR})");
    };

    let spec = config::load(&path)
        .with_context(|| format!("loading config '{}'", path.display()))?;
    let report = mlp_eval::verify(&spec).context("verification run")?;

    for row in &report.rows {
        match &row.comparison {
            Some(cmp) => println!(
                "{}\t{}\t{}\t{:e}",
                row.index,
                row.output,
                if cmp.passed { "ok" } else { "MISMATCH" },
                cmp.max_abs_diff
            ),
            None => println!("{}\t{}", row.index, row.output),
        }
    }

    if !report.compared() {
        info!("no reference columns, nothing to compare");
        return Ok(());
    }

    println!(
        "{} rows, {} mismatched, max abs diff {:e}, max rel diff {:e}",
        report.rows.len(),
        report.failed,
        report.max_abs_diff,
        report.max_rel_diff
    );

    if !report.passed() {
        bail!("{} of {} rows diverged from the reference", report.failed, report.rows.len());
    }

    Ok(())
}
