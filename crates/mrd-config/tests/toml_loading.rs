//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use mrd_config::MrdConfig;
use std::path::PathBuf;

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/cds/data/device_config/db.json"
"#,
        )?;

        let config: MrdConfig = Figment::from(Serialized::defaults(MrdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/cds/data/device_config/db.json"))
        );
        assert!(config.database.is_configured());
        Ok(())
    });
}

#[test]
fn loads_audit_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[audit]
probe_timeout_secs = 3
python = "python3.11"
index_url = "https://mirror.example.org/pypi"
"#,
        )?;

        let config: MrdConfig = Figment::from(Serialized::defaults(MrdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.audit.probe_timeout_secs, 3);
        assert_eq!(config.audit.python, "python3.11");
        assert_eq!(config.audit.index_url, "https://mirror.example.org/pypi");
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[audit]
probe_timeout_secs = 30
"#,
        )?;

        let config: MrdConfig = Figment::from(Serialized::defaults(MrdConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.audit.probe_timeout_secs, 30);
        assert_eq!(config.audit.python, "python3");
        assert!(!config.database.is_configured());
        Ok(())
    });
}
