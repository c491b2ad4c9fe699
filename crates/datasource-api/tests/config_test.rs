//! Unit tests for datasource-api configuration and password codec

use datasource_api::config::{DatasourceConfig, DEFAULT_ENCRYPTION_SALT};
use datasource_api::error::ErrorCategory;
use datasource_api::password::PasswordCodec;

fn codec_from_yaml(yaml: &str) -> PasswordCodec {
    PasswordCodec::new(DatasourceConfig::from_yaml_str(yaml).unwrap().encryption)
}

#[test]
fn test_env_var_default_applies() {
    let config = DatasourceConfig::from_yaml_str(
        r#"
encryption:
  enable: true
  salt: "${DATASOURCE_TEST_UNSET_SALT_VAR:-pepper}"
"#,
    )
    .unwrap();

    assert!(config.encryption.enable);
    assert_eq!(config.encryption.salt, "pepper");
}

#[test]
fn test_env_var_expanded() {
    std::env::set_var("DATASOURCE_TEST_SALT_VAR", "from-env");
    let config = DatasourceConfig::from_yaml_str(
        r#"
encryption:
  enable: true
  salt: "${DATASOURCE_TEST_SALT_VAR:-unused}"
"#,
    )
    .unwrap();

    assert_eq!(config.encryption.salt, "from-env");
}

#[test]
fn test_empty_salt_rejected() {
    let err = DatasourceConfig::from_yaml_str(
        r#"
encryption:
  enable: true
  salt: ""
"#,
    )
    .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!(
        "datasource-config-test-{}.yaml",
        std::process::id()
    ));
    std::fs::write(&path, "encryption:\n  enable: true\n").unwrap();

    let config = DatasourceConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert!(config.encryption.enable);
    assert_eq!(config.encryption.salt, DEFAULT_ENCRYPTION_SALT);
}

#[test]
fn test_from_missing_file() {
    let err = DatasourceConfig::from_file("/nonexistent/datasource.yaml").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);
}

#[test]
fn test_codec_from_config() {
    let config = DatasourceConfig::from_yaml_str("encryption:\n  enable: true\n").unwrap();
    let codec = PasswordCodec::new(config.encryption);

    let stored = codec.encode("123456");
    assert_eq!(stored, "IUAjJCVNVEl6TkRVMg==");
    assert_eq!(codec.decode(&stored).unwrap(), "123456");
}

#[test]
fn test_codec_salt_mismatch_returns_input() {
    let writer = codec_from_yaml("encryption:\n  enable: true\n  salt: one\n");
    let reader = codec_from_yaml("encryption:\n  enable: true\n  salt: two\n");

    let stored = writer.encode("secret");
    assert_eq!(reader.decode(&stored).unwrap(), stored);
}

#[test]
fn test_codec_rejects_invalid_base64() {
    let codec = codec_from_yaml("encryption:\n  enable: true\n");

    let err = codec.decode("not base64!").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Authentication);
}
