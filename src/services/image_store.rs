use crate::error::ServiceError;
use crate::models::{ImageId, StoredImage};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of inserting an original into a repository
#[derive(Debug)]
pub struct InsertOutcome {
    /// The stored image (the existing one if the content was already present)
    pub image: Arc<StoredImage>,
    /// Whether the image was newly added
    pub created: bool,
    /// Images dropped to make room
    pub evicted: Vec<ImageId>,
}

/// Trait for storage of uploaded originals
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Store an original, or return the existing entry with the same id
    async fn insert(&self, image: StoredImage) -> Result<InsertOutcome, ServiceError>;

    /// Find an original by id
    async fn find_by_id(&self, id: &ImageId) -> Result<Option<Arc<StoredImage>>, ServiceError>;

    /// Number of stored originals
    async fn count(&self) -> usize;
}

struct StoreInner {
    images: HashMap<ImageId, Arc<StoredImage>>,
    /// Insertion order, oldest first
    order: VecDeque<ImageId>,
}

/// In-memory original storage with oldest-first eviction
pub struct InMemoryImageStore {
    inner: Arc<RwLock<StoreInner>>,
    capacity: usize,
}

impl InMemoryImageStore {
    /// Create a store holding at most `capacity` originals (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                images: HashMap::new(),
                order: VecDeque::new(),
            })),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageStore {
    async fn insert(&self, image: StoredImage) -> Result<InsertOutcome, ServiceError> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.images.get(&image.id) {
            return Ok(InsertOutcome {
                image: existing.clone(),
                created: false,
                evicted: Vec::new(),
            });
        }

        let mut evicted = Vec::new();
        while inner.images.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.images.remove(&oldest);
            tracing::debug!(id = %oldest, "Evicted image from store");
            evicted.push(oldest);
        }

        let image = Arc::new(image);
        inner.order.push_back(image.id.clone());
        inner.images.insert(image.id.clone(), image.clone());

        Ok(InsertOutcome {
            image,
            created: true,
            evicted,
        })
    }

    async fn find_by_id(&self, id: &ImageId) -> Result<Option<Arc<StoredImage>>, ServiceError> {
        let inner = self.inner.read().await;
        Ok(inner.images.get(id).cloned())
    }

    async fn count(&self) -> usize {
        self.inner.read().await.images.len()
    }
}
