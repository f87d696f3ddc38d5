//! `/feynman/*` endpoints.

use crate::client::ApiClient;
use crate::decode::{ANALOGIES_KEY, GAPS_KEY, decode_field, decode_list};
use async_trait::async_trait;
use genlearn_core::feynman::{
    Analogy, AnalogyAttempt, AnalogyEvaluation, AnalogyQuery, CompressionAttempt,
    CompressionEvaluation, FeynmanGateway, KnowledgeGap, LayerIntro, LectureHallReply,
    LectureMessage, RittyReply, TeachMessage, TeachingLayer, TeachingSession,
    TeachingSessionDraft, TeachingSummary, Vote, WhyAnswer, WhySpiralStep,
};
use genlearn_core::{GenlearnError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize)]
struct ChangeLayer<'a> {
    session_id: &'a str,
    target_layer: TeachingLayer,
}

/// `{"success": true}` replies to fire-and-forget actions.
#[derive(Deserialize)]
struct Acknowledgement {
    #[serde(default)]
    success: bool,
}

impl ApiClient {
    async fn acknowledged(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        let ack: Acknowledgement = self.post_query(path, query).await?;
        if ack.success {
            Ok(())
        } else {
            Err(GenlearnError::unexpected_shape(path, "a success acknowledgement"))
        }
    }
}

#[async_trait]
impl FeynmanGateway for ApiClient {
    async fn start_teaching(&self, draft: &TeachingSessionDraft) -> Result<TeachingSession> {
        draft.validate()?;
        self.post("/feynman/session/start", draft).await
    }

    async fn teaching_session(&self, session_id: &str) -> Result<TeachingSession> {
        self.get(&format!("/feynman/session/{session_id}"), &[]).await
    }

    async fn change_layer(&self, session_id: &str, layer: TeachingLayer) -> Result<TeachingLayer> {
        let path = "/feynman/session/change-layer";
        let body = ChangeLayer {
            session_id,
            target_layer: layer,
        };
        let value: Value = self.post(path, &body).await?;
        decode_field(path, value, "new_layer")
    }

    async fn open_layer(&self, session_id: &str, layer: TeachingLayer) -> Result<LayerIntro> {
        self.post_query(
            &format!("/feynman/layer{}/start", layer.number()),
            &[("session_id", session_id.to_string())],
        )
        .await
    }

    async fn teach_ritty(&self, message: &TeachMessage) -> Result<RittyReply> {
        self.post("/feynman/layer1/teach", message).await
    }

    async fn compress(&self, attempt: &CompressionAttempt) -> Result<CompressionEvaluation> {
        if attempt.explanation.trim().is_empty() {
            return Err(GenlearnError::validation("Write the compressed explanation"));
        }
        self.post("/feynman/layer2/compress", attempt).await
    }

    async fn answer_why(&self, answer: &WhyAnswer) -> Result<WhySpiralStep> {
        self.post("/feynman/layer3/respond", answer).await
    }

    async fn submit_analogy(&self, attempt: &AnalogyAttempt) -> Result<AnalogyEvaluation> {
        self.post("/feynman/layer4/submit", attempt).await
    }

    async fn lecture(&self, message: &LectureMessage) -> Result<LectureHallReply> {
        self.post("/feynman/layer5/explain", message).await
    }

    async fn complete_teaching(&self, session_id: &str) -> Result<TeachingSummary> {
        self.post_query(&format!("/feynman/session/{session_id}/complete"), &[])
            .await
    }

    async fn knowledge_gaps(&self, user_id: &str) -> Result<Vec<KnowledgeGap>> {
        let path = format!("/feynman/gaps/user/{user_id}");
        let value = self.get_value(&path, &[]).await?;
        decode_list(&path, value, &[GAPS_KEY])
    }

    async fn resolve_gap(&self, gap_id: &str) -> Result<()> {
        self.acknowledged(&format!("/feynman/gaps/{gap_id}/resolve"), &[])
            .await
    }

    async fn analogies(&self, query: &AnalogyQuery) -> Result<Vec<Analogy>> {
        let path = "/feynman/analogies";
        let mut params = vec![
            ("featured_only", query.featured_only.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(topic) = &query.topic {
            params.push(("topic", topic.clone()));
        }
        if let Some(subject) = &query.subject {
            params.push(("subject", subject.clone()));
        }
        let value = self.get_value(path, &params).await?;
        decode_list(path, value, &[ANALOGIES_KEY])
    }

    async fn vote_analogy(&self, analogy_id: &str, vote: Vote) -> Result<()> {
        self.acknowledged(
            &format!("/feynman/analogies/{analogy_id}/vote"),
            &[("vote_type", vote.to_string())],
        )
        .await
    }
}
