//! Chat endpoints.
//!
//! - `GET /api/chat/messages`: conversation so far + loading flag
//! - `POST /api/chat/send`: send a message; the reply arrives after a delay
//! - `POST /api/chat/abandon`: leave the chat, dropping pending replies
//! - `POST /api/chat/classify`: triage text without touching the conversation
//! - `GET /api/chat/quick-questions`: one-tap prompts

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::chat::{self, ChatView, QuickQuestion};
use crate::models::Message;
use crate::triage::{self, TriageResponse};

#[derive(Deserialize)]
pub struct ChatSendRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct ChatAckResponse {
    pub message: Message,
    pub is_loading: bool,
    pub disclaimer: &'static str,
}

/// `GET /api/chat/messages`
pub async fn messages(State(ctx): State<ApiContext>) -> Result<Json<ChatView>, ApiError> {
    Ok(Json(ctx.core.chat().view()?))
}

/// `POST /api/chat/send`: returns the stored user message.
/// Poll `/chat/messages` for the assistant reply.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatSendRequest>,
) -> Result<Json<ChatAckResponse>, ApiError> {
    let message = ctx.core.chat().send(&req.message)?;

    Ok(Json(ChatAckResponse {
        message,
        is_loading: ctx.core.chat().is_loading(),
        disclaimer: "This assistant gives general guidance only. Always confirm with your healthcare provider.",
    }))
}

#[derive(Serialize)]
pub struct AbandonResponse {
    pub aborted: usize,
}

/// `POST /api/chat/abandon`
pub async fn abandon(State(ctx): State<ApiContext>) -> Result<Json<AbandonResponse>, ApiError> {
    Ok(Json(AbandonResponse {
        aborted: ctx.core.chat().abandon_pending()?,
    }))
}

#[derive(Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// `POST /api/chat/classify`
pub async fn classify(Json(req): Json<ClassifyRequest>) -> Json<TriageResponse> {
    Json(triage::classify(&req.text))
}

/// `GET /api/chat/quick-questions`
pub async fn quick_questions() -> Json<Vec<QuickQuestion>> {
    Json(chat::quick_questions())
}
