use std::fs;

use spot::config::{
    CLIENT_ID_FIELD, CLIENT_ID_KEY, CLIENT_SECRET_FIELD, CLIENT_SECRET_KEY, ConfigError,
    DEFAULT_REDIRECT_URI, DEFAULT_SERVER_ADDRESS, load_credentials_from, load_credentials_in,
    load_dotenv_credentials,
};

fn write_home_file(home: &std::path::Path, name: &str, content: &str) {
    let dir = home.join(".spot");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

#[tokio::test]
async fn test_load_credentials_from_home_config_yaml() {
    let home = tempfile::tempdir().unwrap();
    write_home_file(home.path(), "config.yaml", "clientId: xxx\nclientSecret: yyy\n");

    let credentials = load_credentials_in(home.path()).await.unwrap();

    assert_eq!(credentials.client_id, "xxx");
    assert_eq!(credentials.client_secret, "yyy");
}

#[tokio::test]
async fn test_config_yaml_wins_over_dotenv() {
    let home = tempfile::tempdir().unwrap();
    write_home_file(home.path(), "config.yaml", "clientId: xxx\nclientSecret: yyy\n");
    write_home_file(
        home.path(),
        ".env",
        "SPOTIFY_CLIENT_ID=aaa\nSPOTIFY_CLIENT_SECRET=bbb\n",
    );

    let credentials = load_credentials_in(home.path()).await.unwrap();

    assert_eq!(credentials.client_id, "xxx");
}

#[tokio::test]
async fn test_dotenv_fallback_without_config_yaml() {
    let home = tempfile::tempdir().unwrap();
    write_home_file(
        home.path(),
        ".env",
        "# spotify app\nSPOTIFY_CLIENT_ID=xxx\nSPOTIFY_CLIENT_SECRET=\"yyy\"\nOTHER=zzz\n",
    );

    let credentials = load_credentials_in(home.path()).await.unwrap();

    assert_eq!(credentials.client_id, "xxx");
    assert_eq!(credentials.client_secret, "yyy");
}

#[tokio::test]
async fn test_empty_home_names_config_yaml() {
    let home = tempfile::tempdir().unwrap();

    let err = load_credentials_in(home.path()).await.unwrap_err();

    assert!(matches!(&err, ConfigError::Read(path, _) if path.ends_with(".spot/config.yaml")));
}

#[tokio::test]
async fn test_debug_output_hides_secret() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "clientId: xxx\nclientSecret: very-secret\n").unwrap();

    let credentials = load_credentials_from(&path).await.unwrap();
    let debug = format!("{:?}", credentials);

    assert!(debug.contains("xxx"));
    assert!(!debug.contains("very-secret"));
}

#[tokio::test]
async fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_credentials_from(&dir.path().join("config.yaml"))
        .await
        .unwrap_err();

    assert!(matches!(err, ConfigError::Read(_, _)));
}

#[tokio::test]
async fn test_yaml_missing_secret() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "clientId: xxx\n").unwrap();

    let err = load_credentials_from(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Missing(key) if key == CLIENT_SECRET_FIELD));
}

#[tokio::test]
async fn test_yaml_empty_client_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "clientId: \"\"\nclientSecret: yyy\n").unwrap();

    let err = load_credentials_from(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Missing(key) if key == CLIENT_ID_FIELD));
}

#[tokio::test]
async fn test_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "clientId: [xxx\n").unwrap();

    let err = load_credentials_from(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[tokio::test]
async fn test_dotenv_missing_secret() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "SPOTIFY_CLIENT_ID=xxx\n").unwrap();

    let err = load_dotenv_credentials(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Missing(key) if key == CLIENT_SECRET_KEY));
}

#[tokio::test]
async fn test_dotenv_empty_client_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "SPOTIFY_CLIENT_ID=\nSPOTIFY_CLIENT_SECRET=yyy\n").unwrap();

    let err = load_dotenv_credentials(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Missing(key) if key == CLIENT_ID_KEY));
}

#[tokio::test]
async fn test_malformed_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".env");
    fs::write(&path, "NOT A VALID LINE\n").unwrap();

    let err = load_dotenv_credentials(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_defaults_point_at_the_same_callback() {
    let port = DEFAULT_SERVER_ADDRESS.rsplit(':').next().unwrap();
    assert_eq!(port, "1024");
    assert!(DEFAULT_REDIRECT_URI.contains(DEFAULT_SERVER_ADDRESS));
    assert!(DEFAULT_REDIRECT_URI.ends_with("/callback"));
}
