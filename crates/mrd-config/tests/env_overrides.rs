use figment::Jail;
use mrd_config::MrdConfig;
use std::path::PathBuf;

#[test]
fn env_vars_fill_config_values() {
    Jail::expect_with(|jail| {
        jail.set_env("MERIDIAN_DATABASE__PATH", "/tmp/audit/db.json");
        jail.set_env("MERIDIAN_AUDIT__PROBE_TIMEOUT_SECS", "5");

        let config = MrdConfig::load(None).expect("config loads");
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/audit/db.json")));
        assert_eq!(config.audit.probe_timeout_secs, 5);
        Ok(())
    });
}

#[test]
fn config_file_named_by_env_var_is_read() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "from_env.toml",
            r#"
[audit]
probe_timeout_secs = 7
"#,
        )?;
        jail.set_env("MERIDIAN_CONFIG", "from_env.toml");

        let config = MrdConfig::load(None).expect("config loads");
        assert_eq!(config.audit.probe_timeout_secs, 7);
        Ok(())
    });
}

#[test]
fn explicit_file_beats_env_named_file() {
    Jail::expect_with(|jail| {
        jail.create_file("from_env.toml", "[audit]\npython = \"python-env\"\n")?;
        jail.create_file("explicit.toml", "[audit]\npython = \"python-explicit\"\n")?;
        jail.set_env("MERIDIAN_CONFIG", "from_env.toml");

        let config =
            MrdConfig::load(Some(std::path::Path::new("explicit.toml"))).expect("config loads");
        assert_eq!(config.audit.python, "python-explicit");
        Ok(())
    });
}

#[test]
fn env_beats_explicit_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "override.toml",
            r#"
[audit]
python = "python2"
"#,
        )?;
        jail.set_env("MERIDIAN_AUDIT__PYTHON", "python3.12");

        let config =
            MrdConfig::load(Some(std::path::Path::new("override.toml"))).expect("config loads");
        assert_eq!(config.audit.python, "python3.12");
        Ok(())
    });
}
