//! Page flows driven through the full router on the in-memory backend.

#![allow(clippy::panic)]

mod common;

use axum::http::{Method, StatusCode};
use common::{TestApp, email_of};
use eventflow::backend::Backend;
use eventflow::domain::{EventId, Role};
use serde_json::{Value, json};

/// Element of the array at `pointer` whose `key` equals `value`.
fn find<'a>(body: &'a Value, pointer: &str, key: &str, value: &str) -> &'a Value {
    let Some(found) = body
        .pointer(pointer)
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .find(|item| item.get(key).and_then(Value::as_str) == Some(value))
        })
    else {
        panic!("no {key}={value} under {pointer}");
    };
    found
}

#[tokio::test]
async fn tech_meetup_from_registration_to_ticket() {
    let app = TestApp::new();
    let plan = app.plan("Básico", 5).await;
    let meetup = app.event_type("Meetup").await;

    let created = app
        .send(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "name": "Org",
                "email": "org@example.com",
                "password": "segredo",
                "role": "organizer",
                "plan_id": plan.id,
            })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.str_at("/redirect_to"), Some("/login"));
    assert_eq!(created.str_at("/toast/title"), Some("Conta criada com sucesso!"));

    let org = app.login("org@example.com").await;
    let event = app
        .send(
            Method::POST,
            "/dashboard/organizer/events",
            Some(&org),
            Some(json!({
                "title": "Tech Meetup",
                "description": "",
                "type_id": meetup.id,
                "price": 0,
            })),
        )
        .await;
    assert_eq!(event.status, StatusCode::CREATED);
    assert_eq!(event.str_at("/toast/variant"), Some("default"));
    let row = find(&event.body, "/page/events", "title", "Tech Meetup");
    assert_eq!(row.get("status_label").and_then(Value::as_str), Some("Ativo"));
    let Some(event_id) = row.get("id").and_then(Value::as_str).map(str::to_string) else {
        panic!("event id missing");
    };

    let joined = app
        .send(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "segredo",
                "role": "participant",
            })),
        )
        .await;
    assert_eq!(joined.status, StatusCode::CREATED);
    let ana = app.login("ana@example.com").await;

    let before = app.get("/dashboard/participant", Some(&ana)).await;
    assert_eq!(before.status, StatusCode::OK);
    let card = find(&before.body, "/available_events", "id", &event_id);
    assert_eq!(card.get("participant_count"), Some(&json!(0)));
    assert_eq!(card.get("user_registered"), Some(&json!(false)));
    assert_eq!(before.body.get("registered_count"), Some(&json!(0)));

    let ticket_path = format!("/dashboard/participant/events/{event_id}/ticket");
    let bought = app.send(Method::POST, &ticket_path, Some(&ana), None).await;
    assert_eq!(bought.status, StatusCode::CREATED);
    assert_eq!(bought.str_at("/toast/title"), Some("Ingresso adquirido!"));
    let card = find(&bought.body, "/page/available_events", "id", &event_id);
    assert_eq!(card.get("participant_count"), Some(&json!(1)));
    assert_eq!(card.get("user_registered"), Some(&json!(true)));
    let held = find(&bought.body, "/page/registered_events", "event_id", &event_id);
    assert_eq!(held.get("title").and_then(Value::as_str), Some("Tech Meetup"));

    let again = app.send(Method::POST, &ticket_path, Some(&ana), None).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.str_at("/toast/variant"), Some("destructive"));

    let holders = app
        .get(
            &format!("/dashboard/organizer/events/{event_id}/participants"),
            Some(&org),
        )
        .await;
    assert_eq!(holders.status, StatusCode::OK);
    assert_eq!(holders.body.get("total"), Some(&json!(1)));
    let holder = find(&holders.body, "/participants", "email", "ana@example.com");
    assert_eq!(holder.get("name").and_then(Value::as_str), Some("Ana"));
}

#[tokio::test]
async fn admin_deactivates_a_user() {
    let app = TestApp::new();
    let root = app.user("Root", Role::Admin, None).await;
    let ana = app.user("Ana", Role::Participant, None).await;
    let cookie = app.login(&email_of("Root")).await;

    let reply = app
        .send(
            Method::POST,
            &format!("/dashboard/admin/users/{}/toggle-active", ana.id),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.str_at("/toast/description"),
        Some("Usuário desativado com sucesso.")
    );
    let row = find(&reply.body, "/page/users", "id", &ana.id.to_string());
    assert_eq!(row.get("active"), Some(&json!(false)));
    assert_eq!(row.get("toggle_label").and_then(Value::as_str), Some("Ativar"));

    let own = app
        .send(
            Method::POST,
            &format!("/dashboard/admin/users/{}/toggle-active", root.id),
            Some(&cookie),
            None,
        )
        .await;
    assert_eq!(own.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn toggling_an_event_twice_restores_it() {
    let app = TestApp::new();
    let plan = app.plan("Livre", -1).await;
    let show = app.event_type("Show").await;
    app.user("Org", Role::Organizer, Some(plan.id)).await;
    app.user("Root", Role::Admin, None).await;
    let org = app.login(&email_of("Org")).await;
    let admin = app.login(&email_of("Root")).await;

    let created = app
        .send(
            Method::POST,
            "/dashboard/organizer/events",
            Some(&org),
            Some(json!({ "title": "Show", "type_id": show.id, "price": 25.5 })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let row = find(&created.body, "/page/events", "title", "Show");
    let Some(id) = row.get("id").and_then(Value::as_str).map(str::to_string) else {
        panic!("event id missing");
    };

    let path = format!("/dashboard/admin/events/{id}/toggle-status");
    let first = app.send(Method::POST, &path, Some(&admin), None).await;
    assert_eq!(first.status, StatusCode::OK);
    let row = find(&first.body, "/page/events", "id", &id);
    assert_eq!(row.get("status").and_then(Value::as_str), Some("inactive"));
    assert_eq!(row.get("toggle_label").and_then(Value::as_str), Some("Ativar"));
    assert!(row
        .get("created_on")
        .and_then(Value::as_str)
        .is_some_and(|d| d.len() == 10 && d.matches('/').count() == 2));
    let summary = first.body.pointer("/page/summary");
    assert_eq!(
        summary.and_then(|s| s.get("active_users")).and_then(Value::as_i64),
        Some(2)
    );
    assert_eq!(
        summary.and_then(|s| s.get("active_events")).and_then(Value::as_i64),
        Some(0)
    );

    let second = app.send(Method::POST, &path, Some(&admin), None).await;
    let row = find(&second.body, "/page/events", "id", &id);
    assert_eq!(row.get("status").and_then(Value::as_str), Some("active"));
    assert_eq!(
        second.str_at("/toast/description"),
        Some("Evento ativado com sucesso.")
    );
}

#[tokio::test]
async fn plan_cap_blocks_extra_events() {
    let app = TestApp::new();
    let plan = app.plan("Grátis", 1).await;
    let talk = app.event_type("Palestra").await;
    app.user("Org", Role::Organizer, Some(plan.id)).await;
    let org = app.login(&email_of("Org")).await;

    let body = json!({ "title": "Primeira", "type_id": talk.id, "price": 0 });
    let first = app
        .send(Method::POST, "/dashboard/organizer/events", Some(&org), Some(body))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let body = json!({ "title": "Segunda", "type_id": talk.id, "price": 0 });
    let second = app
        .send(Method::POST, "/dashboard/organizer/events", Some(&org), Some(body))
        .await;
    assert_eq!(second.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(second.str_at("/toast/title"), Some("Limite do plano atingido"));
    assert_eq!(second.body.pointer("/error/code"), Some(&json!(4001)));
}

#[tokio::test]
async fn referenced_plan_cannot_be_deleted() {
    let app = TestApp::new();
    let plan = app.plan("Pro", 10).await;
    app.user("Org", Role::Organizer, Some(plan.id)).await;
    app.user("Root", Role::Admin, None).await;
    let admin = app.login(&email_of("Root")).await;

    let reply = app
        .send(
            Method::DELETE,
            &format!("/dashboard/admin/plans/{}", plan.id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);

    let page = app.get("/dashboard/admin", Some(&admin)).await;
    find(&page.body, "/plans", "name", "Pro");
}

#[tokio::test]
async fn login_failures_carry_a_toast() {
    let app = TestApp::new();

    let unknown = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "ninguem@example.com", "password": "x" })),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.str_at("/toast/title"), Some("Erro no login"));
    assert!(unknown.set_cookies().is_empty());

    let blank = app
        .send(
            Method::POST,
            "/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "" })),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn logout_clears_the_session() {
    let app = TestApp::new();
    app.user("Ana", Role::Participant, None).await;
    let cookie = app.login(&email_of("Ana")).await;

    let reply = app.send(Method::POST, "/logout", Some(&cookie), None).await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location(), Some("/"));
    assert!(
        reply
            .set_cookies()
            .iter()
            .any(|c| c.starts_with("eventflow_user=") && c.contains("Max-Age=0"))
    );
}

#[tokio::test]
async fn logged_in_home_shows_the_navbar() {
    let app = TestApp::new();
    app.user("Org", Role::Organizer, None).await;
    let cookie = app.login(&email_of("Org")).await;

    let home = app.get("/", Some(&cookie)).await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.str_at("/navbar/role_label"), Some("Organizador"));
    assert_eq!(
        home.str_at("/navbar/dashboard_path"),
        Some("/dashboard/organizer")
    );
}

#[tokio::test]
async fn unknown_type_filter_is_rejected() {
    let app = TestApp::new();
    app.user("Ana", Role::Participant, None).await;
    let cookie = app.login(&email_of("Ana")).await;

    let all = app
        .get("/dashboard/participant?search=&type=all", Some(&cookie))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.str_at("/type_filter"), Some("all"));

    let bad = app
        .get("/dashboard/participant?type=shows", Some(&cookie))
        .await;
    assert_eq!(bad.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_type_filter_leaves_tickets_untouched() {
    let app = TestApp::new();
    let show = app.event_type("Show").await;
    app.user("Ana", Role::Participant, None).await;
    let plan = app.plan("Livre", -1).await;
    app.user("Org", Role::Organizer, Some(plan.id)).await;
    let org = app.login(&email_of("Org")).await;
    let ana = app.login(&email_of("Ana")).await;

    let created = app
        .send(
            Method::POST,
            "/dashboard/organizer/events",
            Some(&org),
            Some(json!({ "title": "Show", "type_id": show.id, "price": 0 })),
        )
        .await;
    let row = find(&created.body, "/page/events", "title", "Show");
    let Some(id) = row
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<uuid::Uuid>().ok())
        .map(EventId::from)
    else {
        panic!("event id missing");
    };
    let ticket_path = format!("/dashboard/participant/events/{id}/ticket");

    let rejected = app
        .send(
            Method::POST,
            &format!("{ticket_path}?type=shows"),
            Some(&ana),
            None,
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    assert!(matches!(app.backend.count_tickets(id).await, Ok(0)));

    let bought = app
        .send(
            Method::POST,
            &format!("{ticket_path}?type=all"),
            Some(&ana),
            None,
        )
        .await;
    assert_eq!(bought.status, StatusCode::CREATED);
    assert!(matches!(app.backend.count_tickets(id).await, Ok(1)));

    let kept = app
        .send(
            Method::DELETE,
            &format!("{ticket_path}?type=shows"),
            Some(&ana),
            None,
        )
        .await;
    assert_eq!(kept.status, StatusCode::BAD_REQUEST);
    assert!(matches!(app.backend.count_tickets(id).await, Ok(1)));
}

#[tokio::test]
async fn unknown_paths_get_the_not_found_page() {
    let app = TestApp::new();
    let reply = app.get("/nao/existe", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.str_at("/path"), Some("/nao/existe"));
    assert_eq!(reply.str_at("/home_path"), Some("/"));
}
