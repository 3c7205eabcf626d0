use solana_sdk::signer::{keypair::Keypair, Signer};
use std::path::{Path, PathBuf};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use crate::{constants::DEFAULT_ENV_FILE, error::Error, models::MinterResult};

/// A dotenv-style file that generated secrets are appended to.
#[derive(Clone, Debug)]
pub struct EnvFile {
    path: PathBuf,
}

impl Default for EnvFile {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_FILE)
    }
}

impl EnvFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_owned(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `\n<name>=<value>`, creating the file if needed.
    /// The handle is flushed and dropped before returning, on success and error alike.
    pub async fn append_var(&self, name: &str, value: &str) -> MinterResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;

        file.write_all(format!("\n{}={}", name, value).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }

    /// Last value assigned to `name` in the file, if any.
    pub async fn read_var(&self, name: &str) -> MinterResult<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::FileSystemError(e)),
        };

        Ok(contents
            .lines()
            .filter_map(|line| line.split_once('='))
            .filter(|(key, _)| key.trim() == name)
            .map(|(_, value)| value.trim().to_string())
            .last())
    }
}

/// JSON array of the 64 secret key bytes, the format Solana CLI keypair files use.
pub fn keypair_to_json(keypair: &Keypair) -> MinterResult<String> {
    serde_json::to_string(&keypair.to_bytes()[..]).map_err(Error::from)
}

pub fn keypair_from_json(json: &str) -> MinterResult<Keypair> {
    let bytes: Vec<u8> = serde_json::from_str(json.trim())?;
    Keypair::from_bytes(&bytes).map_err(|e| Error::InvalidKeypair(e.to_string()))
}

/// Loads the keypair stored under `name`, or generates one and appends it to `env_file`.
pub async fn get_or_create_keypair<F>(
    name: &str,
    lookup: F,
    env_file: &EnvFile,
) -> MinterResult<Keypair>
where
    F: Fn(&str) -> Option<String>,
{
    let keypair = match lookup(name).filter(|value| !value.trim().is_empty()) {
        Some(secret) => keypair_from_json(&secret)?,
        None => {
            tracing::info!(
                "Writing {} keypair to {} file...",
                name,
                env_file.path().display()
            );
            let keypair = Keypair::new();
            env_file.append_var(name, &keypair_to_json(&keypair)?).await?;
            keypair
        }
    };

    tracing::info!("{} PublicKey: {}", name, keypair.pubkey());
    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_round_trip_keeps_identity() {
        let keypair = Keypair::new();
        let restored = keypair_from_json(&keypair_to_json(&keypair).unwrap()).unwrap();

        assert_eq!(restored.pubkey(), keypair.pubkey());
        assert_eq!(restored.to_bytes(), keypair.to_bytes());
    }

    #[test]
    fn short_secret_is_rejected() {
        assert!(matches!(
            keypair_from_json("[1, 2, 3]"),
            Err(Error::InvalidKeypair(_))
        ));
        assert!(matches!(
            keypair_from_json("not json"),
            Err(Error::InvalidJson(_))
        ));
    }
}
