//! End-to-end API tests: sign-up, join requests and a full bracket run over HTTP.

use actix_web::{http::StatusCode, test, web::Data, App};
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::RwLock;
use tournament_manager::{api, Store, TokenIssuer};

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(Data::new(RwLock::new(Store::new(8))))
                .app_data(Data::new(TokenIssuer::new(b"api-test-secret", Duration::hours(1))))
                .configure(api::configure),
        )
        .await
    };
}

/// Send a request and return the status plus the JSON body (Null when empty).
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let bytes = test::read_body(resp).await;
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }};
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! login {
    ($app:expr, $user:expr, $password:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": $user, "password": $password }))
        );
        assert_eq!(status, StatusCode::OK, "login {}: {}", $user, body);
        body
    }};
}

macro_rules! register_team {
    ($app:expr, $user:expr, $team:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post().uri("/api/auth/register-team").set_json(json!({
                "username": $user,
                "password": "pw",
                "teamName": $team,
                "city": "Bergen",
                "country": "Norway"
            }))
        );
        assert_eq!(status, StatusCode::OK, "{}", body);
        body["teamId"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn health_is_public() {
    let app = app!();
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[actix_web::test]
async fn protected_routes_need_a_valid_token() {
    let app = app!();
    let (status, body) = send!(app, test::TestRequest::get().uri("/api/tournaments"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/tournaments")
            .insert_header(bearer("not-a-token"))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn only_the_first_admin_registers_freely() {
    let app = app!();
    let admin = json!({ "username": "root", "password": "pw" });
    let (status, body) = send!(
        app,
        test::TestRequest::post().uri("/api/auth/register-admin").set_json(&admin)
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], json!("ADMIN"));
    assert!(body.get("passwordHash").is_none());

    let second = json!({ "username": "other", "password": "pw" });
    let (status, _) = send!(
        app,
        test::TestRequest::post().uri("/api/auth/register-admin").set_json(&second)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let token = login!(app, "root", "pw")["token"].as_str().unwrap().to_string();
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register-admin")
            .insert_header(bearer(&token))
            .set_json(&second)
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register-admin")
            .insert_header(bearer(&token))
            .set_json(json!({ "username": "ROOT", "password": "pw" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() {
    let app = app!();
    register_team!(app, "falcons", "Falcons");
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "falcons", "password": "nope" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Invalid username or password"));
}

#[actix_web::test]
async fn me_reports_dashboard_and_routes() {
    let app = app!();
    register_team!(app, "falcons", "Falcons");
    let token = login!(app, "falcons", "pw")["token"].as_str().unwrap().to_string();
    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(bearer(&token))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], json!("TEAM"));
    assert_eq!(body["dashboard"], json!("/team-dashboard"));
    let routes: Vec<&str> = body["routes"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(routes.contains(&"/tournament-registration"));
    assert!(!routes.contains(&"/join-requests"));
}

#[actix_web::test]
async fn full_tournament_over_http() {
    let app = app!();
    send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register-admin")
            .set_json(json!({ "username": "root", "password": "pw" }))
    );
    let admin = login!(app, "root", "pw")["token"].as_str().unwrap().to_string();

    let falcons = register_team!(app, "falcons", "Falcons");
    let otters = register_team!(app, "otters", "Otters");
    let bears = register_team!(app, "bears", "Bears");
    let wolves = register_team!(app, "wolves", "Wolves");
    let falcons_login = login!(app, "falcons", "pw");
    assert_eq!(falcons_login["teamId"], json!(falcons));
    let team_token = falcons_login["token"].as_str().unwrap().to_string();

    // Teams cannot create tournaments.
    let body = json!({ "name": "Spring Cup", "startDate": "2025-04-01T10:00", "endDate": "2025-04-03" });
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/tournaments")
            .insert_header(bearer(&team_token))
            .set_json(&body)
    );
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, tournament) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/tournaments")
            .insert_header(bearer(&admin))
            .set_json(&body)
    );
    assert_eq!(status, StatusCode::OK, "{}", tournament);
    assert_eq!(tournament["status"], json!("UPCOMING"));
    assert_eq!(tournament["startDate"], json!("2025-04-01T10:00:00"));
    let tid = tournament["id"].as_str().unwrap().to_string();

    // A team asks to join for itself only.
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/tournaments/{tid}/register-team"))
            .insert_header(bearer(&team_token))
            .set_json(json!({ "team": { "id": otters } }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, request) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/tournaments/{tid}/register-team"))
            .insert_header(bearer(&team_token))
            .set_json(json!({ "team": { "id": falcons } }))
    );
    assert_eq!(status, StatusCode::CREATED, "{}", request);
    assert_eq!(request["status"], json!("PENDING"));
    let request_id = request["id"].as_str().unwrap().to_string();

    let (status, requests) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/tournaments/registration-requests")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(requests.as_array().unwrap().len(), 1);
    assert_eq!(requests[0]["tournament"]["id"], json!(tid));

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!(
                "/api/tournaments/{tid}/registration-requests/{request_id}/approve"
            ))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    for team in [&otters, &bears, &wolves] {
        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri(&format!("/api/tournaments/{tid}/teams/{team}"))
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK);
    }
    let (_, teams) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/tournaments/{tid}/teams"))
            .insert_header(bearer(&team_token))
    );
    let order: Vec<&str> = teams
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["name"].as_str())
        .collect();
    assert_eq!(order, ["Falcons", "Otters", "Bears", "Wolves"]);

    // Only admins generate, and only once.
    let generate = format!("/api/tournaments/{tid}/bracket/generate");
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&generate)
            .insert_header(bearer(&team_token))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, matches) = send!(
        app,
        test::TestRequest::post()
            .uri(&generate)
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK, "{}", matches);
    assert_eq!(matches.as_array().unwrap().len(), 3);
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&generate)
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, bracket) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/tournaments/{tid}/bracket"))
            .insert_header(bearer(&team_token))
    );
    assert_eq!(bracket[0]["round"], json!(1));
    assert_eq!(bracket[0]["matchNumber"], json!(1));
    assert_eq!(bracket[0]["team1"]["id"], json!(falcons));
    assert_eq!(bracket[0]["team2"]["id"], json!(otters));
    assert_eq!(bracket[2]["round"], json!(2));
    assert_eq!(bracket[2]["team1"], Value::Null);
    let m1 = bracket[0]["id"].as_str().unwrap().to_string();
    let m2 = bracket[1]["id"].as_str().unwrap().to_string();
    let m3 = bracket[2]["id"].as_str().unwrap().to_string();

    let (_, rounds) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/tournaments/{tid}/bracket/rounds"))
            .insert_header(bearer(&team_token))
    );
    assert_eq!(rounds.as_array().unwrap().len(), 2);
    assert_eq!(rounds[0]["matches"].as_array().unwrap().len(), 2);

    let winner = |m: &str| format!("/api/tournaments/{tid}/bracket/matches/{m}/winner");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&winner(&m1))
            .insert_header(bearer(&admin))
            .set_json(json!({ "winnerTeamId": bears }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, outcome) = send!(
        app,
        test::TestRequest::post()
            .uri(&winner(&m1))
            .insert_header(bearer(&admin))
            .set_json(json!({ "winnerTeamId": falcons }))
    );
    assert_eq!(status, StatusCode::OK, "{}", outcome);
    assert_eq!(outcome["completed"]["status"], json!("COMPLETED"));
    assert_eq!(outcome["next"]["id"], json!(m3));
    assert_eq!(outcome["next"]["team1"]["id"], json!(falcons));
    assert_eq!(outcome["champion"], Value::Null);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&winner(&m1))
            .insert_header(bearer(&admin))
            .set_json(json!({ "winnerTeamId": falcons }))
    );
    assert_eq!(status, StatusCode::CONFLICT);

    send!(
        app,
        test::TestRequest::post()
            .uri(&winner(&m2))
            .insert_header(bearer(&admin))
            .set_json(json!({ "winnerTeamId": wolves }))
    );
    let (status, outcome) = send!(
        app,
        test::TestRequest::post()
            .uri(&winner(&m3))
            .insert_header(bearer(&admin))
            .set_json(json!({ "winnerTeamId": wolves }))
    );
    assert_eq!(status, StatusCode::OK, "{}", outcome);
    assert_eq!(outcome["champion"]["name"], json!("Wolves"));
    assert_eq!(outcome["next"], Value::Null);

    let (_, tournament) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/tournaments/{tid}"))
            .insert_header(bearer(&team_token))
    );
    assert_eq!(tournament["status"], json!("COMPLETED"));

    let (status, _) = send!(
        app,
        test::TestRequest::delete()
            .uri(&format!("/api/tournaments/{tid}/teams/{bears}"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::CONFLICT);
}

#[actix_web::test]
async fn unknown_ids_are_not_found_and_bad_bodies_are_bad_requests() {
    let app = app!();
    send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register-admin")
            .set_json(json!({ "username": "root", "password": "pw" }))
    );
    let admin = login!(app, "root", "pw")["token"].as_str().unwrap().to_string();

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/tournaments/{}", uuid::Uuid::new_v4()))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/tournaments")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Cup", "startDate": "2025-05-02", "endDate": "2025-05-01" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("End date cannot be before start date"));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/tournaments")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Cup" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
