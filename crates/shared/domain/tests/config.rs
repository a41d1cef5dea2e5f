use ampa_domain::config::{AmpaConfig, DatabaseConfig, LimitsConfig, NotificationConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let limits = LimitsConfig::default();
    assert_eq!(limits.featured_cap, 4);
    assert_eq!(limits.showcase_size, 3);
    assert_eq!(limits.image_max_bytes, 5 * 1024 * 1024);
    assert_eq!(limits.pdf_max_bytes, 3 * 1024 * 1024);

    let db = DatabaseConfig::default();
    assert!(db.persist);
    assert_eq!(db.snapshot, "entities.bin");

    let notifications = NotificationConfig::default();
    assert_eq!(notifications.fallback_recipient, "ampa.mirassol@hotmail.com");
}

#[test]
fn ampa_config_deserializes_partial_sections() {
    let raw = json!({
        "storage": { "data_dir": "/srv/ampa" },
        "limits": { "featured_cap": 6 },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: AmpaConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.storage.data_dir, std::path::PathBuf::from("/srv/ampa"));
    assert!(cfg.storage.create);
    assert_eq!(cfg.limits.featured_cap, 6);
    assert_eq!(cfg.limits.showcase_size, 3);
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.notifications.fallback_recipient, "ampa.mirassol@hotmail.com");
}

#[test]
fn cloned_config_is_copy_on_write() {
    let base = AmpaConfig::default();
    let mut tuned = base.clone();
    tuned.limits.featured_cap = 2;

    assert_eq!(base.limits.featured_cap, 4);
    assert_eq!(tuned.limits.featured_cap, 2);
}
