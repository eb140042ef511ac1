#[test]
fn config_has_usable_defaults() {
    let cfg = checkout_payments::config::AppConfig::from_env();
    assert!(!cfg.admin_api_key.is_empty());
    assert!(cfg.db_max_connections > 0);
    assert!(cfg.list_limit > 0);
}
