//! Tests for chat and inbox handlers.

use super::*;
use crate::domain::{MessageContent, Role};
use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware, user};
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

const PATIENT_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const DOCTOR_ID: &str = "9b2d3c1e-0f6a-4c1b-8a8e-1f2d3c4b5a69";

async fn sign_in(session: SessionContext, path: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.as_str()).map_err(|e| Error::internal(e.to_string()))?;
    session.persist_user(&id)?;
    Ok(HttpResponse::Ok().finish())
}

fn patient() -> User {
    user(PATIENT_ID, "pat", 30, Role::Patient)
}

fn doctor() -> User {
    user(DOCTOR_ID, "dr_smith", 52, Role::Doctor)
}

fn message(from: &User, to: &User, text: &str, secs: i64) -> Message {
    Message {
        id: Uuid::new_v4(),
        sender_id: from.id(),
        receiver_id: to.id(),
        content: MessageContent::new(text).expect("fixture content"),
        sent_at: Utc.timestamp_opt(secs, 0).single().expect("fixture time"),
    }
}

/// Resolves the two fixture accounts and nothing else.
fn directory_ports() -> MockPorts {
    let mut ports = MockPorts::default();
    ports.users.expect_find_user().returning(|id| {
        Ok([patient(), doctor()]
            .into_iter()
            .find(|candidate| candidate.id() == *id))
    });
    ports
}

fn test_app(
    ports: MockPorts,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(ports.into_state()))
        .wrap(test_session_middleware())
        .route("/sign-in/{id}", web::get().to(sign_in))
        .service(
            web::scope("/api/v1")
                .service(chat)
                .service(send_message)
                .service(inbox),
        )
}

fn sign_in_as(id: &str) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(&format!("/sign-in/{id}"))
}

fn get(uri: &str, cookie: Cookie<'static>) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(uri).cookie(cookie)
}

async fn json_body(res: ServiceResponse) -> Value {
    let body = actix_test::read_body(res).await;
    serde_json::from_slice(&body).expect("JSON body")
}

#[rstest]
#[actix_web::test]
async fn chat_returns_other_user_and_thread() {
    let mut ports = directory_ports();
    ports
        .messaging_query
        .expect_thread()
        .withf(|a, b| a.to_string() == PATIENT_ID && b.to_string() == DOCTOR_ID)
        .return_once(|_, _| {
            Ok(vec![
                message(&patient(), &doctor(), "hello", 10),
                message(&doctor(), &patient(), "hi", 20),
            ])
        });
    let app = actix_test::init_service(test_app(ports)).await;
    let res = actix_test::call_service(&app, sign_in_as(PATIENT_ID).to_request()).await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        get(&format!("/api/v1/chat/{DOCTOR_ID}"), cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["otherUser"]["username"], "dr_smith");
    assert_eq!(body["messages"][0]["content"], "hello");
    assert_eq!(body["messages"][1]["senderId"], DOCTOR_ID);
}

#[rstest]
#[case("not-a-uuid")]
#[case("00000000-0000-0000-0000-000000000001")]
#[actix_web::test]
async fn unknown_other_user_is_not_found(#[case] other: &str) {
    let app = actix_test::init_service(test_app(directory_ports())).await;
    let res = actix_test::call_service(&app, sign_in_as(PATIENT_ID).to_request()).await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        get(&format!("/api/v1/chat/{other}"), cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(res).await["message"], "User not found.");
}

#[rstest]
#[actix_web::test]
async fn send_appends_then_returns_thread() {
    let mut ports = directory_ports();
    ports
        .messaging
        .expect_send()
        .withf(|from, to, content| {
            from.to_string() == PATIENT_ID && to.to_string() == DOCTOR_ID && content == "  hi  "
        })
        .times(1)
        .return_once(|_, _, _| Ok(message(&patient(), &doctor(), "  hi  ", 5)));
    ports
        .messaging_query
        .expect_thread()
        .return_once(|_, _| Ok(vec![message(&patient(), &doctor(), "  hi  ", 5)]));
    let app = actix_test::init_service(test_app(ports)).await;
    let res = actix_test::call_service(&app, sign_in_as(PATIENT_ID).to_request()).await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/chat/{DOCTOR_ID}"))
            .cookie(cookie)
            .set_json(json!({"messageContent": "  hi  "}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn send_surfaces_empty_content_as_bad_request() {
    let mut ports = directory_ports();
    ports.messaging.expect_send().return_once(|_, _, _| {
        Err(Error::invalid_request("message content must not be empty")
            .with_details(json!({"field": "messageContent", "code": "empty_content"})))
    });
    ports.messaging_query.expect_thread().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let res = actix_test::call_service(&app, sign_in_as(PATIENT_ID).to_request()).await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/chat/{DOCTOR_ID}"))
            .cookie(cookie)
            .set_json(json!({"messageContent": ""}))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["details"]["field"], "messageContent");
}

#[rstest]
#[actix_web::test]
async fn inbox_lists_senders_for_doctors() {
    let mut ports = directory_ports();
    ports
        .messaging_query
        .expect_inbox()
        .withf(|doctor_id| doctor_id.to_string() == DOCTOR_ID)
        .return_once(|_| Ok(vec![patient()]));
    let app = actix_test::init_service(test_app(ports)).await;
    let res = actix_test::call_service(&app, sign_in_as(DOCTOR_ID).to_request()).await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(&app, get("/api/v1/inbox", cookie).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["senders"][0]["username"], "pat");
}

#[rstest]
#[actix_web::test]
async fn inbox_is_forbidden_for_patients() {
    let mut ports = directory_ports();
    ports.messaging_query.expect_inbox().never();
    let app = actix_test::init_service(test_app(ports)).await;
    let res = actix_test::call_service(&app, sign_in_as(PATIENT_ID).to_request()).await;
    let cookie = session_cookie(&res);

    let res = actix_test::call_service(&app, get("/api/v1/inbox", cookie).to_request()).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(res).await["message"], INBOX_FORBIDDEN);
}
