use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use common::leaderboard::sort_scores;
use common::{Score, Username, log};

/// Win counts per username, optionally mirrored to a YAML file.
#[derive(Debug, Clone)]
pub struct WinStore {
    wins: Arc<RwLock<HashMap<String, u64>>>,
    data_file: Option<PathBuf>,
}

impl WinStore {
    pub fn in_memory() -> Self {
        Self {
            wins: Arc::new(RwLock::new(HashMap::new())),
            data_file: None,
        }
    }

    /// Opens a file-backed store. A missing file starts empty; an unreadable
    /// or malformed one is an error so existing counts are never overwritten.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, String> {
        let path = path.into();
        let wins = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let stored: BTreeMap<String, u64> = serde_yaml_ng::from_str(&content)
                    .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
                stored.into_iter().collect()
            }
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(format!("Failed to read {}: {}", path.display(), err)),
        };

        log!("Loaded {} player records from {}", wins.len(), path.display());

        Ok(Self {
            wins: Arc::new(RwLock::new(wins)),
            data_file: Some(path),
        })
    }

    pub async fn leaderboard(&self) -> Vec<Score> {
        let wins = self.wins.read().await;
        let mut scores: Vec<Score> = wins
            .iter()
            .map(|(username, &wins)| Score {
                username: username.clone(),
                wins,
            })
            .collect();
        sort_scores(&mut scores);
        scores
    }

    pub async fn wins(&self, username: &Username) -> u64 {
        let wins = self.wins.read().await;
        wins.get(username.as_str()).copied().unwrap_or(0)
    }

    /// Adds one win and returns the new total. Persistence failures are logged,
    /// the in-memory count still moves forward.
    pub async fn record_win(&self, username: &Username) -> u64 {
        let mut wins = self.wins.write().await;
        let total = {
            let entry = wins.entry(username.to_string()).or_insert(0);
            *entry = entry.saturating_add(1);
            *entry
        };

        if let Err(e) = self.persist(&wins).await {
            log!("Failed to persist win for {}: {}", username, e);
        }

        total
    }

    async fn persist(&self, wins: &HashMap<String, u64>) -> Result<(), String> {
        let Some(ref path) = self.data_file else {
            return Ok(());
        };

        let ordered: BTreeMap<&String, &u64> = wins.iter().collect();
        let content = serde_yaml_ng::to_string(&ordered)
            .map_err(|e| format!("Failed to serialize win counts: {}", e))?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }

        tokio::fs::write(path, content)
            .await
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}
