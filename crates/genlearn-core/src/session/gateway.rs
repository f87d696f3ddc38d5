//! Learning session gateway trait.

use super::model::{Session, SessionConfig, SessionEnd, SessionProgress, SessionSummary};
use super::segment::SessionContent;
use crate::error::Result;
use async_trait::async_trait;

/// Backend operations for one learning run.
///
/// Implementations perform exactly one request per call.
#[async_trait]
pub trait LearningGateway: Send + Sync {
    async fn start_session(&self, config: &SessionConfig) -> Result<Session>;

    async fn fetch_content(&self, session_id: &str) -> Result<SessionContent>;

    async fn update_progress(&self, session_id: &str, progress: &SessionProgress) -> Result<()>;

    async fn end_session(&self, session_id: &str, end: &SessionEnd) -> Result<SessionSummary>;
}
