//! `/chat/*` and `/features/*` endpoints.

use crate::client::ApiClient;
use crate::decode::{FIGURES_KEY, TOPICS_KEY, decode_list};
use async_trait::async_trait;
use genlearn_core::Result;
use genlearn_core::features::{
    ChatMessage, ChatReply, DebateTopic, DebateTurn, FeatureGateway, FeatureReply,
    HistoricalFigure, InterviewTurn, TeachingTurn,
};

#[async_trait]
impl FeatureGateway for ApiClient {
    async fn chat(&self, message: &ChatMessage) -> Result<ChatReply> {
        self.post("/chat/message", message).await
    }

    async fn debate_topics(&self) -> Result<Vec<DebateTopic>> {
        let path = "/features/debate/topics";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[TOPICS_KEY])
    }

    async fn debate_round(&self, turn: &DebateTurn) -> Result<FeatureReply> {
        self.post("/features/debate/round", turn).await
    }

    async fn interview_figures(&self) -> Result<Vec<HistoricalFigure>> {
        let path = "/features/interview/figures";
        let value = self.get_value(path, &[]).await?;
        decode_list(path, value, &[FIGURES_KEY])
    }

    async fn interview(&self, turn: &InterviewTurn) -> Result<FeatureReply> {
        self.post("/features/interview/chat", turn).await
    }

    async fn teach(&self, turn: &TeachingTurn) -> Result<FeatureReply> {
        self.post("/features/reverse-classroom/chat", turn).await
    }
}
