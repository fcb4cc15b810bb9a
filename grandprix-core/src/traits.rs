use async_trait::async_trait;

use crate::error::Result;

/// Transactional persistence boundary. The evaluation core never owns
/// persisted state; callers implement this over their storage of choice.
#[async_trait]
pub trait Repository<T, ID> {
    async fn find_by_id(&self, id: &ID) -> Result<Option<T>>;
    async fn save(&self, entity: &T) -> Result<T>;
    async fn delete(&self, id: &ID) -> Result<()>;
}
