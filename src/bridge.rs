//! # Design System Bridge
//!
//! The engine asks its design system synchronously, but loading one (reading a catalog,
//! resolving a theme) is asynchronous work. The bridge runs loaders on a dedicated worker
//! thread with its own tokio runtime and blocks the caller until the answer arrives.
//!
//! Loaded design systems are kept in an [`OracleCache`] for a short time-to-live, keyed by
//! the request, so repeated lookups for the same configuration skip the loader. A failed
//! load is logged and answered with an [`InertDesignSystem`], which makes every rule report
//! nothing instead of failing the whole run.

use crate::catalog::CatalogDesignSystem;
use crate::oracle::{DesignSystem, InertDesignSystem};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

/// What to load. Equal requests share a cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadRequest {
    /// A catalog file; the embedded default catalog when absent.
    pub catalog: Option<PathBuf>,
    /// Overrides the catalog's required prefix.
    pub prefix: Option<String>,
}

impl LoadRequest {
    /// The SHA-1 of the request's JSON form.
    pub fn cache_key(&self) -> String {
        let serialized = serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"));
        let mut hasher = Sha1::new();
        hasher.update(serialized.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Loads a design system. Implementations may do I/O.
#[async_trait]
pub trait DesignSystemLoader: Send + Sync {
    async fn load(&self, request: &LoadRequest) -> Result<Arc<dyn DesignSystem>>;
}

/// Loads [`CatalogDesignSystem`]s from catalog files or the embedded default.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogLoader;

#[async_trait]
impl DesignSystemLoader for CatalogLoader {
    async fn load(&self, request: &LoadRequest) -> Result<Arc<dyn DesignSystem>> {
        let design_system = match &request.catalog {
            Some(path) => {
                let source = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read catalog '{}'", path.display()))?;
                CatalogDesignSystem::from_toml_str(&source)
                    .with_context(|| format!("Invalid catalog '{}'", path.display()))?
            }
            None => CatalogDesignSystem::builtin()?,
        };
        let design_system = match &request.prefix {
            Some(prefix) => design_system.with_prefix(Some(prefix.clone())),
            None => design_system,
        };
        Ok(Arc::new(design_system))
    }
}

struct CacheEntry {
    design_system: Arc<dyn DesignSystem>,
    expires_at: Instant,
}

/// A time-bounded cache of loaded design systems.
///
/// Expired entries are dropped when they are next looked up; nothing sweeps in the
/// background.
pub struct OracleCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl OracleCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn DesignSystem>> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<Arc<dyn DesignSystem>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.design_system.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&self, key: String, design_system: Arc<dyn DesignSystem>) {
        self.insert_at(key, design_system, Instant::now());
    }

    fn insert_at(&self, key: String, design_system: Arc<dyn DesignSystem>, now: Instant) {
        let entry = CacheEntry {
            design_system,
            expires_at: now + self.ttl,
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, entry);
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct LoadJob {
    request: LoadRequest,
    reply: oneshot::Sender<Result<Arc<dyn DesignSystem>>>,
}

/// Synchronous access to an asynchronous [`DesignSystemLoader`].
///
/// [`resolve`](Self::resolve) blocks the calling thread, so it must not be called from
/// inside an async runtime. Dropping the bridge stops its worker thread.
pub struct DesignSystemBridge {
    sender: Option<mpsc::UnboundedSender<LoadJob>>,
    worker: Option<JoinHandle<()>>,
    cache: Arc<OracleCache>,
}

impl DesignSystemBridge {
    pub fn new(loader: Arc<dyn DesignSystemLoader>, cache: Arc<OracleCache>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build the design system runtime")?;
        let (sender, mut receiver) = mpsc::unbounded_channel::<LoadJob>();

        let worker = std::thread::Builder::new()
            .name("design-system-loader".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(job) = receiver.recv().await {
                        let result = loader.load(&job.request).await;
                        // The caller may have given up waiting.
                        let _ = job.reply.send(result);
                    }
                });
            })
            .context("Failed to spawn the design system worker")?;

        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<OracleCache> {
        &self.cache
    }

    /// The design system for `request`, from the cache or freshly loaded.
    ///
    /// Never fails: a load error is logged and answered with [`InertDesignSystem`], which
    /// is not cached so the next call tries again.
    pub fn resolve(&self, request: &LoadRequest) -> Arc<dyn DesignSystem> {
        let key = request.cache_key();
        if let Some(design_system) = self.cache.get(&key) {
            log::debug!("Design system cache hit for {key}");
            return design_system;
        }

        match self.load_blocking(request) {
            Ok(design_system) => {
                log::debug!("Loaded design system for {key}");
                self.cache.insert(key, design_system.clone());
                design_system
            }
            Err(e) => {
                log::warn!("Failed to load design system, no classes will be reported: {e:#}");
                Arc::new(InertDesignSystem)
            }
        }
    }

    fn load_blocking(&self, request: &LoadRequest) -> Result<Arc<dyn DesignSystem>> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| anyhow!("Design system bridge is shut down"))?;
        let (reply, response) = oneshot::channel();
        sender
            .send(LoadJob {
                request: request.clone(),
                reply,
            })
            .map_err(|_| anyhow!("Design system worker has stopped"))?;
        response
            .blocking_recv()
            .map_err(|_| anyhow!("Design system worker dropped the request"))?
    }
}

impl Drop for DesignSystemBridge {
    fn drop(&mut self) {
        // Closing the channel ends the worker's receive loop.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::warn!("Design system worker panicked");
            }
        }
    }
}
