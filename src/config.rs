use std::{
    env,
    path::{Path, PathBuf},
};

use exchange::specs::VerifySpec;
use machine_learning::Tolerance;

use crate::error::Result;

/// The environment variable read when no configuration path is given on the command line.
pub const CONFIG_VAR: &str = "MLP_EVAL_CONFIG";

/// Resolves the configuration path from the first command line argument, falling back to
/// `MLP_EVAL_CONFIG`.
pub fn config_path<I>(mut args: I) -> Option<PathBuf>
where
    I: Iterator<Item = String>,
{
    args.next()
        .map(PathBuf::from)
        .or_else(|| env::var_os(CONFIG_VAR).map(PathBuf::from))
}

/// Loads a verification run from a JSON file.
///
/// Relative `model` and `dataset.path` entries are resolved against the directory holding the
/// configuration file, so a run can be moved around as a whole.
pub fn load<P: AsRef<Path>>(path: P) -> Result<VerifySpec> {
    let path = path.as_ref();
    let mut spec: VerifySpec = exchange::from_path(path)?;

    if let Some(dir) = path.parent() {
        spec.model = resolve(dir, &spec.model);
        spec.dataset.path = resolve(dir, &spec.dataset.path);
    }

    log::debug!("loaded config from '{}': {spec:?}", path.display());
    Ok(spec)
}

/// Returns the `Tolerance` a run asks for, defaults filled in.
pub fn tolerance(spec: &VerifySpec) -> Tolerance {
    let default = Tolerance::default();
    Tolerance::new(
        spec.tolerance.relative.unwrap_or(default.relative()),
        spec.tolerance.absolute.unwrap_or(default.absolute()),
    )
}

fn resolve(dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        dir.join(path)
    }
}
