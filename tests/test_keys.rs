use cnft_minter::keys::{get_or_create_keypair, keypair_from_json, keypair_to_json};
use cnft_minter::{EnvFile, Keypair, Pubkey, Signer};
use std::collections::HashMap;
use std::path::PathBuf;

fn temp_env_path() -> PathBuf {
    std::env::temp_dir().join(format!("cnft-minter-keys-{}.env", Pubkey::new_unique()))
}

#[tokio::test]
async fn test_existing_keypair_is_loaded_without_writing() {
    let keypair = Keypair::new();
    let mut vars = HashMap::new();
    vars.insert("PAYER", keypair_to_json(&keypair).expect("failed to encode"));

    let path = temp_env_path();
    let env_file = EnvFile::new(&path);

    let loaded = get_or_create_keypair("PAYER", |name| vars.get(name).cloned(), &env_file)
        .await
        .expect("failed to load keypair");

    assert_eq!(loaded.pubkey(), keypair.pubkey());
    assert!(!path.exists());
}

#[tokio::test]
async fn test_generated_keypair_reloads_with_same_pubkey() {
    let path = temp_env_path();
    let env_file = EnvFile::new(&path);

    let generated = get_or_create_keypair("RECEIVER", |_| None, &env_file)
        .await
        .expect("failed to create keypair");

    let stored = env_file
        .read_var("RECEIVER")
        .await
        .expect("failed to read env file")
        .expect("keypair was not written");
    let reloaded = get_or_create_keypair("RECEIVER", |_| Some(stored.clone()), &env_file)
        .await
        .expect("failed to reload keypair");
    let _ = std::fs::remove_file(&path);

    assert_eq!(reloaded.pubkey(), generated.pubkey());
    assert_eq!(
        keypair_from_json(&stored).expect("invalid stored key").pubkey(),
        generated.pubkey()
    );
}

#[tokio::test]
async fn test_appends_keep_earlier_entries() {
    let path = temp_env_path();
    let env_file = EnvFile::new(&path);

    env_file
        .append_var("FIRST", "1")
        .await
        .expect("failed to append");
    env_file
        .append_var("SECOND", "2")
        .await
        .expect("failed to append");

    let first = env_file.read_var("FIRST").await.expect("failed to read");
    let second = env_file.read_var("SECOND").await.expect("failed to read");
    let missing = env_file.read_var("THIRD").await.expect("failed to read");
    let _ = std::fs::remove_file(&path);

    assert_eq!(first.as_deref(), Some("1"));
    assert_eq!(second.as_deref(), Some("2"));
    assert_eq!(missing, None);
}
