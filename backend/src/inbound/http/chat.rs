//! Chat handlers: per-pair threads and the doctor inbox.
//!
//! ```text
//! GET /api/v1/chat/{other_user_id}
//! POST /api/v1/chat/{other_user_id} {"messageContent":"Hello"}
//! GET /api/v1/inbox
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Message, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::current_user;
use crate::inbound::http::validation::parse_other_user;

/// Message sent to a patient who opens the inbox.
pub const INBOX_FORBIDDEN: &str = "You are not authorized to view this page.";

/// Body for `POST /api/v1/chat/{other_user_id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub message_content: String,
}

/// The other participant and the full thread, oldest first.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub other_user: User,
    pub messages: Vec<Message>,
}

/// Accounts that have written to the signed-in doctor.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    pub senders: Vec<User>,
}

async fn other_participant(state: &HttpState, raw: &str) -> ApiResult<User> {
    let id = parse_other_user(raw)?;
    state
        .users
        .find_user(&id)
        .await?
        .ok_or_else(|| Error::not_found("User not found."))
}

async fn chat_view(state: &HttpState, me: &UserId, other: User) -> ApiResult<ChatResponse> {
    let messages = state.messaging_query.thread(me, &other.id()).await?;
    Ok(ChatResponse {
        other_user: other,
        messages,
    })
}

/// Show the thread with another account.
#[utoipa::path(
    get,
    path = "/api/v1/chat/{other_user_id}",
    params(("other_user_id" = String, Path, description = "Other participant")),
    responses(
        (status = 200, description = "Thread", body = ChatResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["chat"],
    operation_id = "getChat"
)]
#[get("/chat/{other_user_id}")]
pub async fn chat(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ChatResponse>> {
    let me = current_user(&state, &session).await?;
    let other = other_participant(&state, &path).await?;
    Ok(web::Json(chat_view(&state, &me.id(), other).await?))
}

/// Append a message to the thread and return the updated thread.
#[utoipa::path(
    post,
    path = "/api/v1/chat/{other_user_id}",
    params(("other_user_id" = String, Path, description = "Other participant")),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Updated thread", body = ChatResponse),
        (status = 400, description = "Empty message", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["chat"],
    operation_id = "sendChatMessage"
)]
#[post("/chat/{other_user_id}")]
pub async fn send_message(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<SendMessageRequest>,
) -> ApiResult<web::Json<ChatResponse>> {
    let me = current_user(&state, &session).await?;
    let other = other_participant(&state, &path).await?;
    state
        .messaging
        .send(&me.id(), &other.id(), &payload.message_content)
        .await?;
    Ok(web::Json(chat_view(&state, &me.id(), other).await?))
}

/// List the accounts that have messaged the signed-in doctor.
#[utoipa::path(
    get,
    path = "/api/v1/inbox",
    responses(
        (status = 200, description = "Inbox", body = InboxResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Patients have no inbox", body = Error)
    ),
    tags = ["chat"],
    operation_id = "getInbox"
)]
#[get("/inbox")]
pub async fn inbox(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<InboxResponse>> {
    let me = current_user(&state, &session).await?;
    if !me.is_doctor() {
        return Err(Error::forbidden(INBOX_FORBIDDEN));
    }
    let senders = state.messaging_query.inbox(&me.id()).await?;
    Ok(web::Json(InboxResponse { senders }))
}

#[cfg(test)]
mod tests;
