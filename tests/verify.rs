use std::{env, fs, path::PathBuf, process};

use mlp_eval::{config, verify, EvalErr};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos/shp_mlp")
        .join(name)
}

/// A scratch directory unique to this test process and case.
fn scratch(case: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("mlp-eval-{}-{case}", process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn demo_run_reproduces_expected_outputs() {
    let spec = config::load(demo("verify.json")).unwrap();
    assert_eq!(spec.model, demo("model.json"));

    let report = verify(&spec).unwrap();
    assert_eq!(report.rows.len(), 5);
    assert!(report.compared());
    assert!(report.passed(), "{report:?}");
    assert!(report.max_rel_diff < 1e-6);
}

#[test]
fn limit_caps_the_evaluated_rows() {
    let mut spec = config::load(demo("verify.json")).unwrap();
    spec.limit = Some(2);
    spec.parallel = false;

    let report = verify(&spec).unwrap();
    assert_eq!(report.rows.len(), 2);
    assert!(report.passed());
}

#[test]
fn tampered_predictions_fail_the_run() {
    let dir = scratch("tampered");
    let csv = fs::read_to_string(demo("inputs.csv"))
        .unwrap()
        .replace("1.6567749999999999", "1.66");
    fs::write(dir.join("inputs.csv"), csv).unwrap();
    fs::copy(demo("model.json"), dir.join("model.json")).unwrap();
    fs::copy(demo("verify.json"), dir.join("verify.json")).unwrap();

    let spec = config::load(dir.join("verify.json")).unwrap();
    let report = verify(&spec).unwrap();

    assert!(!report.passed());
    assert_eq!(report.failed, 1);
    let failed = &report.rows[1];
    assert!(!failed.comparison.unwrap().passed);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn model_expecting_more_features_is_rejected() {
    let dir = scratch("features");
    let model = serde_json::json!({
        "kind": "sequential",
        "layers": [
            { "type": "dense", "weights": [[1.0], [1.0], [1.0], [1.0], [1.0]], "biases": [0.0] }
        ]
    });
    fs::write(dir.join("model.json"), model.to_string()).unwrap();
    fs::write(dir.join("inputs.csv"), "a,b,c,d\n1,2,3,4\n").unwrap();
    fs::write(
        dir.join("verify.json"),
        r#"{ "model": "model.json", "dataset": { "path": "inputs.csv", "x_size": 4 } }"#,
    )
    .unwrap();

    let spec = config::load(dir.join("verify.json")).unwrap();
    let err = verify(&spec).unwrap_err();
    assert!(matches!(err, EvalErr::Ml(_)), "{err}");

    fs::remove_dir_all(dir).ok();
}

#[test]
fn unsupported_activation_is_reported() {
    let dir = scratch("activation");
    let model = serde_json::json!({
        "kind": "mlp",
        "coefs": [[[1.0]]],
        "intercepts": [[0.0]],
        "activation": "tanh",
        "out_activation": "tanh"
    });
    fs::write(dir.join("model.json"), model.to_string()).unwrap();
    fs::write(dir.join("inputs.csv"), "x\n1\n").unwrap();
    fs::write(
        dir.join("verify.json"),
        r#"{ "model": "model.json", "dataset": { "path": "inputs.csv", "x_size": 1 } }"#,
    )
    .unwrap();

    let spec = config::load(dir.join("verify.json")).unwrap();
    let err = verify(&spec).unwrap_err();
    assert_eq!(err.to_string(), "unsupported activation function 'tanh'");

    fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_dataset_is_an_io_error() {
    let mut spec = config::load(demo("verify.json")).unwrap();
    spec.dataset.path = demo("nope.csv");

    assert!(matches!(verify(&spec), Err(EvalErr::Io { .. })));
}
