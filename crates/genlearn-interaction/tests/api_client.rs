//! ApiClient against an in-process axum backend.

use axum::body::Bytes;
use axum::extract::{Multipart, OriginalUri, Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, get, post};
use axum::{Json, Router};
use genlearn_core::GenlearnError;
use genlearn_core::auth::{AuthGateway, Credentials, Navigator, Route, TokenStore};
use genlearn_core::features::FeatureGateway;
use genlearn_core::feynman::{
    AnalogyQuery, FeynmanGateway, TeachMessage, TeachingLayer, TeachingSessionDraft, Vote,
};
use genlearn_core::history::{HistoryGateway, Page};
use genlearn_core::media::{
    AudioClip, AvatarStyle, MediaGateway, PhotoUpload, SpeechRequest, VoiceGateway,
};
use genlearn_core::session::{LearningGateway, SessionConfig, SessionEnd};
use genlearn_core::social::{
    AdminGateway, CompetitionGateway, EntryType, LeaderboardScope, TournamentDraft,
};
use genlearn_core::user::{ProfileUpdate, UserGateway, VoicePreference};
use genlearn_interaction::ApiClient;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const API_KEY: &str = "test-app-key";

#[derive(Default)]
struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    fn with(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> genlearn_core::Result<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    fn save(&self, token: &str) -> genlearn_core::Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> genlearn_core::Result<()> {
        *self.token.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// A request as the backend received it, without the `/api` prefix.
#[derive(Debug, Clone, PartialEq)]
struct Recorded {
    method: String,
    path: String,
    query: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Seen {
    headers: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
    uploads: Arc<Mutex<Vec<(String, String, usize)>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl Seen {
    fn last(&self) -> Recorded {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn user_json() -> Value {
    json!({
        "user_id": "USR1",
        "username": "asha",
        "display_name": "Asha",
        "role": "user",
        "xp_points": 120,
        "level": 1,
        "streak_days": 2
    })
}

async fn me(State(seen): State<Seen>, headers: HeaderMap) -> impl IntoResponse {
    seen.headers.lock().unwrap().push((
        header(&headers, "x-api-key"),
        header(&headers, "authorization"),
    ));
    Json(user_json())
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "correct-horse" {
        (
            StatusCode::OK,
            Json(json!({"access_token": "jwt-1", "token_type": "bearer", "user": user_json()})),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Incorrect username or password"})),
        )
    }
}

async fn unauthorized() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Could not validate credentials"})),
    )
}

async fn missing_session(Path(id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": format!("Session {id} not found")})),
    )
}

async fn sessions() -> impl IntoResponse {
    Json(json!({"sessions": [{
        "session_id": "SES1",
        "topic": "Volcanoes",
        "subject": "Learning Session",
        "difficulty_level": 3,
        "status": "completed",
        "story_style": "",
        "visual_style": "cartoon",
        "score": 40,
        "started_at": "2026-10-01T09:00:00",
        "completed_at": "2026-10-01T09:20:00"
    }]}))
}

async fn reshaped_topics() -> impl IntoResponse {
    Json(json!({"items": [{"topic": "Should homework be abolished?"}]}))
}

async fn leaderboard(
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> impl IntoResponse {
    Json(json!([{
        "rank": 1,
        "user_id": "USR1",
        "display_name": format!("{}:{}", params.get("scope").cloned().unwrap_or_default(),
            params.get("tournament_id").cloned().unwrap_or_default()),
        "score": 90
    }]))
}

async fn tts(Json(body): Json<Value>) -> impl IntoResponse {
    let payload = format!("ID3-{}", body["voice_type"].as_str().unwrap_or("?"));
    ([("content-type", "audio/mpeg")], payload.into_bytes())
}

async fn stt(State(seen): State<Seen>, mut multipart: Multipart) -> impl IntoResponse {
    let mut file_name = String::new();
    let mut language = String::new();
    let mut size = 0;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("audio") => {
                file_name = field.file_name().unwrap_or_default().to_string();
                size = field.bytes().await.unwrap().len();
            }
            Some("language") => language = field.text().await.unwrap(),
            _ => {}
        }
    }
    seen.uploads
        .lock()
        .unwrap()
        .push((file_name, language.clone(), size));
    Json(json!({"transcribed_text": "plants need light", "language": language}))
}

fn tournament_json(draft: &Value) -> Value {
    json!({
        "tournament_id": "TRN9",
        "name": draft["name"],
        "topic": draft["topic"],
        "difficulty_level": draft["difficulty_level"],
        "start_datetime": draft["start_datetime"],
        "end_datetime": draft["end_datetime"],
        "duration_minutes": draft["duration_minutes"],
        "max_participants": draft["max_participants"],
        "entry_type": draft["entry_type"],
        "status": "upcoming"
    })
}

/// Canned backend answers for the recorded routes.
fn canned(method: &str, path: &str, body: &Value) -> Value {
    match (method, path) {
        ("DELETE", "/avatar/AV1") => {
            json!({"message": "Avatar deleted successfully", "avatar_id": "AV1"})
        }
        ("DELETE", "/characters/CHR1") => {
            json!({"message": "Character deleted successfully", "character_id": "CHR1"})
        }
        ("GET", "/teams/TEAM1") => json!({
            "team_id": "TEAM1",
            "team_name": "Comets",
            "created_by": "USR1",
            "tournament_id": "",
            "total_score": 340,
            "description": "",
            "max_members": 5,
            "current_members": 2,
            "is_private": false
        }),
        ("POST", "/admin/tournaments/create") => {
            json!({"message": "Tournament created", "tournament": tournament_json(body)})
        }
        ("GET", "/users/profile") => user_json(),
        ("PUT", "/users/profile") => {
            let mut user = user_json();
            user["display_name"] = body["display_name"].clone();
            user
        }
        ("POST", "/feynman/session/start") => json!({
            "session_id": "FEY1",
            "user_id": body["user_id"],
            "topic": body["topic"],
            "subject": body["subject"],
            "difficulty_level": body["difficulty_level"],
            "current_layer": body["starting_layer"],
            "status": "active",
            "clarity_score": 0.0,
            "teaching_xp_earned": 0,
            "started_at": "2026-10-16T10:00:00",
            "completed_at": null
        }),
        ("POST", "/feynman/session/change-layer") => {
            json!({"success": true, "new_layer": body["target_layer"]})
        }
        ("POST", "/feynman/layer2/start") => json!({
            "message": "Explain it in 100 words or less.",
            "current_word_limit": 100,
            "progression": [100, 50, 25, 15, 10, 1]
        }),
        ("POST", "/feynman/layer1/teach") => json!({
            "response": "Wait, why does the moon pull the water?",
            "confusion_level": 0.4,
            "curiosity_level": 0.9,
            "question_type": "why",
            "follow_up_question": "Does it pull me too?",
            "gap_detected": null,
            "encouragement": "Great start!",
            "emoji_reaction": "?",
            "layer_complete": false,
            "avatar_state": "curious"
        }),
        ("POST", "/feynman/session/FEY1/complete") => json!({
            "session_id": "FEY1",
            "topic": "Tides",
            "total_time_minutes": 14.5,
            "layers_completed": [1, 2],
            "final_clarity_score": 0.72,
            "compression_score": 4.0,
            "analogy_score": null,
            "why_depth_reached": 0,
            "gaps_discovered": [{
                "gap_id": "GAP1",
                "topic": "Spring tides",
                "description": "Could not say why tides are higher at full moon",
                "layer_discovered": 1,
                "why_depth": null,
                "resolved": false
            }],
            "teaching_xp_earned": 85,
            "achievements_unlocked": ["First Lesson"]
        }),
        ("GET", "/feynman/gaps/user/USR1") => json!({
            "user_id": "USR1",
            "gaps": [{
                "id": "GAP1",
                "session_id": "FEY1",
                "user_id": "USR1",
                "gap_topic": "Spring tides",
                "gap_description": "Could not say why tides are higher at full moon",
                "layer_discovered": 1,
                "why_depth": 2,
                "resolved": false
            }]
        }),
        ("POST", "/feynman/gaps/GAP1/resolve") => json!({"success": true}),
        ("POST", "/feynman/gaps/GAP2/resolve") => json!({"detail": null}),
        ("GET", "/feynman/analogies") => json!({"analogies": [{
            "id": "ANA1",
            "user_id": "USR2",
            "topic": "Tides",
            "subject": "Science",
            "analogy_text": "The ocean is a blanket the moon keeps tugging",
            "community_rating": 4.5,
            "upvotes": 9,
            "downvotes": 1,
            "is_featured": true
        }]}),
        ("POST", "/feynman/analogies/ANA1/vote") => json!({"success": true}),
        _ => json!({"detail": format!("no canned answer for {method} {path}")}),
    }
}

async fn record(
    State(seen): State<Seen>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().trim_start_matches("/api").to_string();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let response = canned(method.as_str(), &path, &body);
    seen.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path,
        query: uri.query().map(str::to_string),
        body,
    });
    Json(response)
}

/// Photo uploads: text fields are recorded by name, the file by its name and size.
async fn photo(
    State(seen): State<Seen>,
    OriginalUri(uri): OriginalUri,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut fields = serde_json::Map::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let value = match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let size = field.bytes().await.unwrap().len();
                format!("{file_name}|{content_type}|{size}")
            }
            None => field.text().await.unwrap(),
        };
        fields.insert(name, Value::String(value));
    }
    let path = uri.path().trim_start_matches("/api").to_string();
    let response = if path == "/avatar/upload" {
        json!({"avatar_id": "AV2", "name": fields["name"], "creation_method": "upload",
               "style": fields["style"], "image_url": "/media/avatars/AV2.png"})
    } else {
        json!({"character_id": "CHR2", "name": fields["name"],
               "description": fields["description"], "usage_count": 0})
    };
    seen.requests.lock().unwrap().push(Recorded {
        method: "POST".to_string(),
        path,
        query: None,
        body: Value::Object(fields),
    });
    Json(response)
}

async fn spawn_backend() -> (String, Seen) {
    let seen = Seen::default();
    let api = Router::new()
        .route("/auth/me", get(me))
        .route("/auth/login", post(login))
        .route("/learning/start", post(unauthorized))
        .route("/users/history", get(unauthorized))
        .route("/learning/session/:id/content", get(missing_session))
        .route("/learning/session/:id/end", post(unauthorized))
        .route("/sessions", get(sessions))
        .route("/features/debate/topics", get(reshaped_topics))
        .route("/tournaments/leaderboard", get(leaderboard))
        .route("/voice/tts", post(tts))
        .route("/voice/stt", post(stt))
        .route("/avatar/AV1", any(record))
        .route("/characters/CHR1", any(record))
        .route("/teams/TEAM1", any(record))
        .route("/admin/tournaments/create", any(record))
        .route("/users/profile", any(record))
        .route("/avatar/upload", post(photo))
        .route("/characters/upload", post(photo))
        .route("/feynman/session/start", any(record))
        .route("/feynman/session/change-layer", any(record))
        .route("/feynman/session/FEY1/complete", any(record))
        .route("/feynman/layer1/teach", any(record))
        .route("/feynman/layer2/start", any(record))
        .route("/feynman/gaps/user/USR1", any(record))
        .route("/feynman/gaps/:id/resolve", any(record))
        .route("/feynman/analogies", any(record))
        .route("/feynman/analogies/ANA1/vote", any(record))
        .with_state(seen.clone());
    let app = Router::new().nest("/api", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), seen)
}

fn client(
    base_url: &str,
    tokens: Arc<MemoryTokenStore>,
    navigator: Arc<RecordingNavigator>,
) -> ApiClient {
    ApiClient::new(base_url, API_KEY, Duration::from_secs(5), tokens, navigator).unwrap()
}

#[tokio::test]
async fn injects_api_key_and_bearer_token() {
    let (base_url, seen) = spawn_backend().await;
    let tokens = Arc::new(MemoryTokenStore::default());
    let api = client(&base_url, tokens.clone(), Arc::default());

    api.current_user().await.unwrap();
    tokens.save("jwt-42").unwrap();
    let user = api.current_user().await.unwrap();
    assert_eq!(user.username, "asha");

    let headers = seen.headers.lock().unwrap().clone();
    assert_eq!(headers[0], (Some(API_KEY.to_string()), None));
    assert_eq!(
        headers[1],
        (Some(API_KEY.to_string()), Some("Bearer jwt-42".to_string()))
    );
}

#[tokio::test]
async fn unauthorized_from_any_endpoint_clears_token_and_navigates_to_login() {
    let (base_url, _) = spawn_backend().await;

    for call in 0..3 {
        let tokens = Arc::new(MemoryTokenStore::with("stale"));
        let navigator = Arc::new(RecordingNavigator::default());
        let api = client(&base_url, tokens.clone(), navigator.clone());

        let err = match call {
            0 => api
                .start_session(&SessionConfig::new("Volcanoes", 3, 15))
                .await
                .unwrap_err(),
            1 => api.learning_history(Page::default()).await.unwrap_err(),
            _ => api
                .end_session(
                    "SES1",
                    &SessionEnd {
                        final_score: 10,
                        total_time_seconds: 60,
                        completed: true,
                    },
                )
                .await
                .unwrap_err(),
        };

        assert!(err.is_unauthorized(), "call {call}: {err}");
        assert_eq!(tokens.load().unwrap(), None);
        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Login]);
    }
}

#[tokio::test]
async fn failed_login_is_unauthorized_with_detail() {
    let (base_url, _) = spawn_backend().await;
    let navigator = Arc::new(RecordingNavigator::default());
    let api = client(&base_url, Arc::default(), navigator);

    let creds = Credentials::new("asha", "wrong-password").unwrap();
    let err = api.login(&creds).await.unwrap_err();
    assert_eq!(
        err,
        GenlearnError::Unauthorized {
            message: "Incorrect username or password".into()
        }
    );

    let creds = Credentials::new("asha", "correct-horse").unwrap();
    let response = api.login(&creds).await.unwrap();
    assert_eq!(response.access_token, "jwt-1");
}

#[tokio::test]
async fn other_statuses_map_to_api_errors_with_detail() {
    let (base_url, _) = spawn_backend().await;
    let tokens = Arc::new(MemoryTokenStore::with("jwt"));
    let api = client(&base_url, tokens.clone(), Arc::default());

    let err = api.fetch_content("SES404").await.unwrap_err();
    assert_eq!(
        err,
        GenlearnError::Api {
            status: 404,
            message: "Session SES404 not found".into()
        }
    );
    assert!(!err.is_retryable());
    assert_eq!(tokens.load().unwrap().as_deref(), Some("jwt"));
}

#[tokio::test]
async fn list_responses_decode_wrapped_arrays_and_fail_closed() {
    let (base_url, _) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let sessions = api.sessions(Page::default()).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].story_style, None);

    let err = api.debate_topics().await.unwrap_err();
    assert!(matches!(
        err,
        GenlearnError::UnexpectedResponseShape { ref endpoint, .. }
            if endpoint == "/features/debate/topics"
    ));
}

#[tokio::test]
async fn leaderboard_sends_scope_query() {
    let (base_url, _) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let entries = api
        .leaderboard(&LeaderboardScope::Tournament("TRN7".into()), 10)
        .await
        .unwrap();
    assert_eq!(entries[0].display_name, "tournament:TRN7");
}

#[tokio::test]
async fn voice_round_trip() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let audio = api
        .synthesize(&SpeechRequest::new("Hello", "en", VoicePreference::Male))
        .await
        .unwrap();
    assert_eq!(audio, b"ID3-male".to_vec());

    let transcription = api
        .transcribe(&AudioClip {
            file_name: "answer.webm".into(),
            bytes: vec![1, 2, 3, 4],
            language: "hi".into(),
        })
        .await
        .unwrap();
    assert_eq!(transcription.transcribed_text, "plants need light");
    assert_eq!(
        seen.uploads.lock().unwrap()[0],
        ("answer.webm".to_string(), "hi".to_string(), 4)
    );
}

#[tokio::test]
async fn transport_failure_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{addr}/api"), Arc::default(), Arc::default());
    let err = api.current_user().await.unwrap_err();
    assert!(matches!(err, GenlearnError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn delete_avatar_and_character_send_delete_without_body() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    api.delete_avatar("AV1").await.unwrap();
    assert_eq!(
        seen.last(),
        Recorded {
            method: "DELETE".into(),
            path: "/avatar/AV1".into(),
            query: None,
            body: Value::Null,
        }
    );

    api.delete_character("CHR1").await.unwrap();
    let request = seen.last();
    assert_eq!(
        (request.method.as_str(), request.path.as_str()),
        ("DELETE", "/characters/CHR1")
    );
    assert_eq!(request.body, Value::Null);
}

#[tokio::test]
async fn team_details_decode_blank_columns_as_none() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let team = api.team("TEAM1").await.unwrap();
    assert_eq!(team.team_name, "Comets");
    assert_eq!(team.current_members, 2);
    assert_eq!(team.tournament_id, None);
    assert_eq!(team.description, None);
    assert_eq!(seen.last().method, "GET");
}

fn tournament_draft() -> TournamentDraft {
    TournamentDraft {
        name: "Volcano Cup".into(),
        topic: "Volcanoes".into(),
        difficulty_level: 4,
        start_datetime: "2026-11-01T18:00:00".into(),
        end_datetime: "2026-11-01T19:00:00".into(),
        duration_minutes: 45,
        max_participants: 64,
        team_size_min: 1,
        team_size_max: 4,
        entry_type: EntryType::InviteOnly,
        description: None,
    }
}

#[tokio::test]
async fn create_tournament_posts_draft_and_unwraps_envelope() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let tournament = api.create_tournament(&tournament_draft()).await.unwrap();
    assert_eq!(tournament.tournament_id, "TRN9");
    assert_eq!(tournament.name, "Volcano Cup");
    assert_eq!(tournament.entry_type, EntryType::InviteOnly);

    let request = seen.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/admin/tournaments/create");
    assert_eq!(request.body["entry_type"], "invite_only");
    assert_eq!(request.body["team_size_max"], 4);
    assert!(request.body.get("description").is_none());
}

#[tokio::test]
async fn invalid_tournament_draft_is_rejected_before_sending() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let draft = TournamentDraft {
        duration_minutes: 5,
        ..tournament_draft()
    };
    let err = api.create_tournament(&draft).await.unwrap_err();
    assert!(matches!(err, GenlearnError::Validation(_)));

    let draft = TournamentDraft {
        team_size_min: 5,
        ..tournament_draft()
    };
    assert!(api.create_tournament(&draft).await.is_err());
    assert_eq!(seen.count(), 0);
}

#[tokio::test]
async fn profile_get_and_partial_put() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let profile = api.profile().await.unwrap();
    assert_eq!(profile.username, "asha");
    assert_eq!(seen.last().method, "GET");

    let update = ProfileUpdate {
        display_name: Some("Asha K".into()),
        ..Default::default()
    };
    let profile = api.update_profile(&update).await.unwrap();
    assert_eq!(profile.display_name, "Asha K");

    let request = seen.last();
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path, "/users/profile");
    assert_eq!(request.body, json!({"display_name": "Asha K"}));
}

#[tokio::test]
async fn photo_uploads_send_multipart_forms() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let mut photo = PhotoUpload::new("Me", "selfie.png", vec![0x89, 0x50, 0x4e, 0x47]).unwrap();
    photo.style = AvatarStyle::Anime;
    let avatar = api.upload_avatar(&photo).await.unwrap();
    assert_eq!(avatar.avatar_id, "AV2");
    assert_eq!(avatar.style, "anime");
    let fields = seen.last().body;
    assert_eq!(fields["file"], "selfie.png|image/png|4");
    assert_eq!(fields["name"], "Me");
    assert_eq!(fields["custom_prompt"], "");

    assert!(matches!(
        api.upload_character(&photo).await.unwrap_err(),
        GenlearnError::Validation(_)
    ));
    photo.description = "A brave explorer".into();
    let character = api.upload_character(&photo).await.unwrap();
    assert_eq!(character.character_id, "CHR2");
    assert_eq!(character.description, "A brave explorer");
    assert_eq!(seen.last().path, "/characters/upload");

    let notes = PhotoUpload::new("Me", "notes.txt", vec![1]).unwrap();
    assert!(matches!(
        api.upload_avatar(&notes).await.unwrap_err(),
        GenlearnError::Validation(_)
    ));
    assert_eq!(seen.count(), 2);
}

#[tokio::test]
async fn feynman_session_start_teach_and_complete() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let session = api
        .start_teaching(&TeachingSessionDraft::new("USR1", "Tides"))
        .await
        .unwrap();
    assert_eq!(session.session_id, "FEY1");
    assert_eq!(session.current_layer, TeachingLayer::CuriousChild);
    assert_eq!(session.completed_at, None);
    let request = seen.last();
    assert_eq!(request.path, "/feynman/session/start");
    assert_eq!(request.body["starting_layer"], 1);
    assert_eq!(request.body["subject"], "General");

    let message = TeachMessage::new("FEY1", "The moon pulls the ocean").unwrap();
    let reply = api.teach_ritty(&message).await.unwrap();
    assert_eq!(reply.follow_up_question.as_deref(), Some("Does it pull me too?"));
    assert!(!reply.layer_complete);
    assert_eq!(seen.last().body["layer"], 1);

    let summary = api.complete_teaching("FEY1").await.unwrap();
    assert_eq!(summary.layers_completed, vec![1, 2]);
    assert_eq!(summary.gaps_discovered[0].topic, "Spring tides");
    assert_eq!(summary.teaching_xp_earned, 85);
    assert_eq!(seen.last().method, "POST");
}

#[tokio::test]
async fn feynman_layer_change_and_intro() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let layer = api
        .change_layer("FEY1", TeachingLayer::Compression)
        .await
        .unwrap();
    assert_eq!(layer, TeachingLayer::Compression);
    assert_eq!(
        seen.last().body,
        json!({"session_id": "FEY1", "target_layer": 2})
    );

    let intro = api
        .open_layer("FEY1", TeachingLayer::Compression)
        .await
        .unwrap();
    assert_eq!(intro.word_limit(), Some(100));
    let request = seen.last();
    assert_eq!(request.path, "/feynman/layer2/start");
    assert_eq!(request.query.as_deref(), Some("session_id=FEY1"));
}

#[tokio::test]
async fn feynman_gaps_and_analogy_library() {
    let (base_url, seen) = spawn_backend().await;
    let api = client(&base_url, Arc::default(), Arc::default());

    let gaps = api.knowledge_gaps("USR1").await.unwrap();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].gap_id, "GAP1");
    assert_eq!(gaps[0].why_depth, Some(2));

    api.resolve_gap("GAP1").await.unwrap();
    let err = api.resolve_gap("GAP2").await.unwrap_err();
    assert!(matches!(err, GenlearnError::UnexpectedResponseShape { .. }));

    let query = AnalogyQuery {
        topic: Some("Tides".into()),
        featured_only: true,
        ..AnalogyQuery::default()
    };
    let analogies = api.analogies(&query).await.unwrap();
    assert_eq!(analogies[0].analogy_id, "ANA1");
    assert!(analogies[0].is_featured);
    assert_eq!(
        seen.last().query.as_deref(),
        Some("featured_only=true&limit=20&topic=Tides")
    );

    api.vote_analogy("ANA1", Vote::Downvote).await.unwrap();
    let request = seen.last();
    assert_eq!(request.method, "POST");
    assert_eq!(request.query.as_deref(), Some("vote_type=downvote"));
}
