//! Environment overrides live in their own test binary: env vars are
//! process-wide and would leak into the other config tests. All cases run
//! sequentially inside one test for the same reason.

use std::env;
use std::path::PathBuf;

use cathier::config::Settings;
use cathier::domain::CascadeMode;

const KEYS: [&str; 5] = [
    "CATHIER_CASCADE",
    "CATHIER_STRICT_PARENT",
    "CATHIER_STORE_TIMEOUT_MS",
    "CATHIER_LIST_SOFT_LIMIT",
    "CATHIER_DATA_FILE",
];

fn clear_env() {
    for key in KEYS {
        env::remove_var(key);
    }
}

#[test]
fn given_cathier_env_vars_when_loading_then_they_override_defaults() {
    clear_env();
    env::set_var("CATHIER_CASCADE", "shallow");
    env::set_var("CATHIER_STRICT_PARENT", "true");
    env::set_var("CATHIER_STORE_TIMEOUT_MS", "1234");
    env::set_var("CATHIER_LIST_SOFT_LIMIT", "7");
    env::set_var("CATHIER_DATA_FILE", "/tmp/cathier-env/data.json");

    let settings = Settings::load_from(None, None);
    clear_env();
    let settings = settings.expect("load settings");

    assert_eq!(settings.cascade, CascadeMode::Shallow);
    assert!(settings.strict_parent);
    assert_eq!(settings.store_timeout_ms, 1234);
    assert_eq!(settings.list_soft_limit, 7);
    assert_eq!(
        settings.data_file,
        PathBuf::from("/tmp/cathier-env/data.json")
    );

    env::set_var("CATHIER_CASCADE", "sideways");
    let invalid_cascade = Settings::load_from(None, None);
    clear_env();
    let err = invalid_cascade.unwrap_err();
    assert!(err.to_string().contains("CATHIER_CASCADE"), "{err}");

    env::set_var("CATHIER_LIST_SOFT_LIMIT", "-1");
    let negative_limit = Settings::load_from(None, None);
    clear_env();
    let err = negative_limit.unwrap_err();
    assert!(
        err.to_string()
            .contains("CATHIER_LIST_SOFT_LIMIT must not be negative"),
        "{err}"
    );

    env::set_var("CATHIER_STORE_TIMEOUT_MS", "-5");
    let negative_timeout = Settings::load_from(None, None);
    clear_env();
    assert!(negative_timeout.is_err());
}
