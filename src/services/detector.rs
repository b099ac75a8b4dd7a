//! Spam detector and its learning hooks
//!
//! [`SampleDetector`] is a deliberately small classifier: a message is spam
//! when it matches a learned spam sample and no ham sample, and approved users
//! are never flagged. Samples are appended to plain text files, one per line,
//! so admin decisions survive restarts.

use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::config::SamplesConfig;
use crate::models::records::{CheckResult, DetectorResponse};
use crate::utils::errors::{ModerationError, Result};
use crate::utils::helpers::{shrink, single_line};

/// Classifier plus the approved-user list it consults
#[async_trait]
pub trait Detector: Send + Sync {
    /// Classify a message
    async fn on_message(&self, user_id: i64, username: &str, text: &str) -> DetectorResponse;

    /// Learn the text as spam
    async fn update_spam(&self, text: &str) -> Result<()>;

    /// Learn the text as ham
    async fn update_ham(&self, text: &str) -> Result<()>;

    async fn add_approved_user(&self, user_id: i64, name: &str) -> Result<()>;

    async fn remove_approved_user(&self, user_id: i64) -> Result<()>;
}

#[derive(Default)]
struct Samples {
    spam: HashSet<String>,
    ham: HashSet<String>,
}

/// Exact-sample [`Detector`] persisted to text files
#[derive(Clone)]
pub struct SampleDetector {
    samples: Arc<RwLock<Samples>>,
    approved: Arc<RwLock<HashMap<i64, String>>>,
    spam_path: PathBuf,
    ham_path: PathBuf,
}

impl SampleDetector {
    /// Create a detector, loading samples already stored on disk
    pub async fn load(config: &SamplesConfig) -> Result<Self> {
        let spam_path = PathBuf::from(&config.spam_path);
        let ham_path = PathBuf::from(&config.ham_path);

        let samples = Samples {
            spam: read_samples(&spam_path).await?,
            ham: read_samples(&ham_path).await?,
        };
        info!(
            spam = samples.spam.len(),
            ham = samples.ham.len(),
            "Loaded spam and ham samples"
        );

        Ok(Self {
            samples: Arc::new(RwLock::new(samples)),
            approved: Arc::new(RwLock::new(HashMap::new())),
            spam_path,
            ham_path,
        })
    }

    pub async fn is_approved(&self, user_id: i64) -> bool {
        self.approved.read().await.contains_key(&user_id)
    }
}

#[async_trait]
impl Detector for SampleDetector {
    async fn on_message(&self, user_id: i64, username: &str, text: &str) -> DetectorResponse {
        if let Some(name) = self.approved.read().await.get(&user_id) {
            return DetectorResponse {
                spam: false,
                check_results: vec![CheckResult::new(
                    "pre-approved",
                    false,
                    format!("user {:?} is approved", name),
                )],
            };
        }

        let key = normalize(text);
        let samples = self.samples.read().await;
        let spam = samples.spam.contains(&key) && !samples.ham.contains(&key);
        let details = if spam {
            "matches a spam sample"
        } else if samples.ham.contains(&key) {
            "matches a ham sample"
        } else {
            "no sample matched"
        };
        debug!(user_id = user_id, username = %username, text = %shrink(text, 50), spam = spam, "Message classified");

        DetectorResponse {
            spam,
            check_results: vec![CheckResult::new("samples", spam, details)],
        }
    }

    async fn update_spam(&self, text: &str) -> Result<()> {
        let key = normalize(text);
        append_sample(&self.spam_path, &key).await?;
        let mut samples = self.samples.write().await;
        samples.ham.remove(&key);
        samples.spam.insert(key);
        info!(text = %shrink(text, 50), "Spam sample added");
        Ok(())
    }

    async fn update_ham(&self, text: &str) -> Result<()> {
        let key = normalize(text);
        append_sample(&self.ham_path, &key).await?;
        let mut samples = self.samples.write().await;
        samples.spam.remove(&key);
        samples.ham.insert(key);
        info!(text = %shrink(text, 50), "Ham sample added");
        Ok(())
    }

    async fn add_approved_user(&self, user_id: i64, name: &str) -> Result<()> {
        self.approved.write().await.insert(user_id, name.to_string());
        info!(user_id = user_id, name = %name, "User approved");
        Ok(())
    }

    async fn remove_approved_user(&self, user_id: i64) -> Result<()> {
        let removed = self.approved.write().await.remove(&user_id);
        debug!(user_id = user_id, was_approved = removed.is_some(), "User removed from approved list");
        Ok(())
    }
}

fn normalize(text: &str) -> String {
    single_line(text).trim().to_lowercase()
}

async fn read_samples(path: &Path) -> Result<HashSet<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashSet::new()),
        Err(e) => Err(ModerationError::Storage(format!(
            "failed to read samples from {}: {}",
            path.display(),
            e
        ))),
    }
}

async fn append_sample(path: &Path, sample: &str) -> Result<()> {
    let storage_error =
        |e: std::io::Error| ModerationError::Storage(format!("failed to write {}: {}", path.display(), e));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(storage_error)?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(storage_error)?;
    file.write_all(format!("{}\n", sample).as_bytes())
        .await
        .map_err(storage_error)?;
    file.flush().await.map_err(storage_error)?;
    Ok(())
}
