//! History screen aggregation.

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use genlearn_core::Result;
use genlearn_core::history::{
    HistoryEntry, HistoryGateway, HistorySource, Page, SessionRecord, TeachingSessionRecord,
};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

enum Section {
    Learning(Vec<HistoryEntry>),
    Sessions(Vec<SessionRecord>),
    Teaching(Vec<TeachingSessionRecord>),
}

/// A history source that could not be loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub source: HistorySource,
    pub message: String,
}

/// Everything the history screen shows. A source that failed is listed in
/// `failures` and its section stays empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryOverview {
    pub learning: Vec<HistoryEntry>,
    pub sessions: Vec<SessionRecord>,
    pub teaching: Vec<TeachingSessionRecord>,
    pub failures: Vec<SourceFailure>,
}

impl HistoryOverview {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct HistoryService {
    gateway: Arc<dyn HistoryGateway>,
}

impl HistoryService {
    pub fn new(gateway: Arc<dyn HistoryGateway>) -> Self {
        Self { gateway }
    }

    /// Fetches every source concurrently and waits for all of them.
    pub async fn overview(&self, user_id: &str, page: Page) -> HistoryOverview {
        let fetches = HistorySource::iter().map(|source| self.fetch(source, user_id, page));

        let mut overview = HistoryOverview::default();
        for (source, result) in join_all(fetches).await {
            match result {
                Ok(Section::Learning(items)) => overview.learning = items,
                Ok(Section::Sessions(items)) => overview.sessions = items,
                Ok(Section::Teaching(items)) => overview.teaching = items,
                Err(e) => {
                    warn!(source = %source, error = %e, "History source failed");
                    overview.failures.push(SourceFailure {
                        source,
                        message: e.to_string(),
                    });
                }
            }
        }
        debug!(
            learning = overview.learning.len(),
            sessions = overview.sessions.len(),
            teaching = overview.teaching.len(),
            failed = overview.failures.len(),
            "History loaded"
        );
        overview
    }

    fn fetch<'a>(
        &'a self,
        source: HistorySource,
        user_id: &'a str,
        page: Page,
    ) -> BoxFuture<'a, (HistorySource, Result<Section>)> {
        async move {
            let result = match source {
                HistorySource::Learning => self
                    .gateway
                    .learning_history(page)
                    .await
                    .map(Section::Learning),
                HistorySource::Sessions => self.gateway.sessions(page).await.map(Section::Sessions),
                HistorySource::Teaching => self
                    .gateway
                    .teaching_sessions(user_id, page.limit)
                    .await
                    .map(Section::Teaching),
            };
            (source, result)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use genlearn_core::GenlearnError;
    use genlearn_core::session::{SessionStatus, VisualStyle};

    struct MockHistory {
        failing: Option<HistorySource>,
    }

    impl MockHistory {
        fn check(&self, source: HistorySource) -> Result<()> {
            if self.failing == Some(source) {
                return Err(GenlearnError::Api {
                    status: 500,
                    message: "Internal Server Error".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl HistoryGateway for MockHistory {
        async fn learning_history(&self, _: Page) -> Result<Vec<HistoryEntry>> {
            self.check(HistorySource::Learning)?;
            Ok(vec![HistoryEntry {
                history_id: "HIS1".into(),
                session_id: "SES1".into(),
                content_type: "story".into(),
                content_id: "CNT1".into(),
                content_path: None,
                topic: "Volcanoes".into(),
                viewed_at: "2026-10-01T09:00:00".into(),
            }])
        }

        async fn sessions(&self, _: Page) -> Result<Vec<SessionRecord>> {
            self.check(HistorySource::Sessions)?;
            Ok(vec![SessionRecord {
                session_id: "SES1".into(),
                topic: "Volcanoes".into(),
                difficulty_level: 3,
                status: SessionStatus::Completed,
                story_style: None,
                visual_style: VisualStyle::default(),
                score: 40,
                started_at: None,
                completed_at: None,
            }])
        }

        async fn teaching_sessions(
            &self,
            user_id: &str,
            _: u32,
        ) -> Result<Vec<TeachingSessionRecord>> {
            self.check(HistorySource::Teaching)?;
            assert_eq!(user_id, "USR1");
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_all_sources_loaded() {
        let service = HistoryService::new(Arc::new(MockHistory { failing: None }));
        let overview = service.overview("USR1", Page::default()).await;
        assert!(overview.is_complete());
        assert_eq!(overview.learning.len(), 1);
        assert_eq!(overview.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_failing_source_is_isolated() {
        let service = HistoryService::new(Arc::new(MockHistory {
            failing: Some(HistorySource::Sessions),
        }));
        let overview = service.overview("USR1", Page::default()).await;

        assert_eq!(overview.learning.len(), 1);
        assert!(overview.sessions.is_empty());
        assert_eq!(overview.failures.len(), 1);
        assert_eq!(overview.failures[0].source, HistorySource::Sessions);
        assert!(overview.failures[0].message.contains("500"));
    }
}
