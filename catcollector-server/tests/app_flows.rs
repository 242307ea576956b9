//! End-to-end page flow tests.
//!
//! These drive the full router the way a browser would: form posts, session
//! cookies, redirects. They need a disposable Postgres database:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/catcollector_test cargo test -- --ignored
//! ```
//!
//! Photo uploads land in the in-memory object store, so no bucket is needed.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use regex::Regex;
use tower::ServiceExt;
use uuid::Uuid;

use catcollector_server::db::{
    create_pool, migrations, CatRepo, DbError, FeedingRepo, PhotoRepo, ToyRepo, UserRepo,
};
use catcollector_server::render;
use catcollector_server::storage::MemoryStore;
use catcollector_server::{build_router, AppState};

struct TestApp {
    router: Router,
    pool: sqlx::PgPool,
    store: Arc<MemoryStore>,
}

async fn test_app() -> TestApp {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&url).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");

    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState {
        pool: pool.clone(),
        store: store.clone(),
        templates: render::build_registry().expect("template registry failed"),
    });

    TestApp {
        router: build_router(state, "static"),
        pool,
        store,
    }
}

async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> Response {
    let mut req = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.router
        .clone()
        .oneshot(req.body(Body::empty()).expect("request build failed"))
        .await
        .expect("request failed")
}

async fn post_form(app: &TestApp, uri: &str, cookie: Option<&str>, form: &str) -> Response {
    let mut req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    app.router
        .clone()
        .oneshot(req.body(Body::from(form.to_owned())).expect("request build failed"))
        .await
        .expect("request failed")
}

fn location(res: &Response) -> &str {
    res.headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .expect("Location header not utf-8")
}

async fn body_text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body read failed");
    String::from_utf8(bytes.to_vec()).expect("body not utf-8")
}

fn fresh_username() -> String {
    format!("collector_{}", Uuid::new_v4().simple())
}

/// Sign up a fresh collector and return their session cookie pair.
async fn signup(app: &TestApp, username: &str) -> String {
    let form = format!("username={username}&password1=meowmeow1&password2=meowmeow1");
    let res = post_form(app, "/accounts/signup", None, &form).await;
    assert_eq!(res.status(), StatusCode::FOUND, "signup should redirect");
    assert_eq!(location(&res), "/cats");

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .expect("signup set no session cookie")
        .to_str()
        .expect("cookie not utf-8");
    set_cookie
        .split(';')
        .next()
        .expect("empty Set-Cookie header")
        .to_owned()
}

async fn user_id(app: &TestApp, username: &str) -> Uuid {
    UserRepo::new(&app.pool)
        .find_by_username(username)
        .await
        .expect("user lookup failed")
        .expect("user missing")
        .id
}

fn id_from_redirect(res: &Response) -> Uuid {
    let tail = location(res)
        .rsplit('/')
        .next()
        .expect("redirect has no id segment");
    Uuid::parse_str(tail).expect("redirect did not end in an id")
}

async fn create_cat(app: &TestApp, cookie: &str, name: &str) -> Uuid {
    let form = format!("name={name}&breed=tabby&description=Keeps+the+desk+warm&age=3");
    let res = post_form(app, "/cats/create", Some(cookie), &form).await;
    assert_eq!(res.status(), StatusCode::FOUND, "cat create should redirect");
    id_from_redirect(&res)
}

async fn create_toy(app: &TestApp, cookie: &str, name: &str) -> Uuid {
    let form = format!("name={name}&color=red");
    let res = post_form(app, "/toys/create", Some(cookie), &form).await;
    assert_eq!(res.status(), StatusCode::FOUND, "toy create should redirect");
    id_from_redirect(&res)
}

const BOUNDARY: &str = "catcollector-test";

async fn upload_photo(app: &TestApp, cookie: &str, cat_id: Uuid, bytes: &[u8]) -> Response {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"photo-file\"; filename=\"whiskers.png\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: image/png\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let req = Request::builder()
        .method(Method::POST)
        .uri(format!("/cats/{cat_id}/add_photo"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::COOKIE, cookie)
        .body(Body::from(body))
        .expect("request build failed");

    app.router.clone().oneshot(req).await.expect("request failed")
}

#[tokio::test]
#[ignore = "requires database"]
async fn signup_logs_the_collector_in() {
    let app = test_app().await;
    let username = fresh_username();
    let cookie = signup(&app, &username).await;

    let res = get(&app, "/cats", Some(&cookie)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(
        body.contains(&format!("Log out ({username})")),
        "signed-in nav should show the new collector"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn signed_out_visitors_are_sent_to_login() {
    let app = test_app().await;

    let res = get(&app, "/cats", None).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/accounts/login?next=%2Fcats");

    let res = post_form(&app, "/toys/create", None, "name=Mouse&color=grey").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(location(&res).starts_with("/accounts/login?next="));
}

#[tokio::test]
#[ignore = "requires database"]
async fn signup_with_mismatched_passwords_creates_no_account() {
    let app = test_app().await;
    let username = fresh_username();
    let form = format!("username={username}&password1=meowmeow1&password2=woofwoof2");

    let res = post_form(&app, "/accounts/signup", None, &form).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(res.headers().get(header::SET_COOKIE).is_none());

    let user = UserRepo::new(&app.pool)
        .find_by_username(&username)
        .await
        .expect("user lookup failed");
    assert!(user.is_none(), "rejected signup must not insert a user");
}

#[tokio::test]
#[ignore = "requires database"]
async fn login_rejects_a_wrong_password_and_honors_next() {
    let app = test_app().await;
    let username = fresh_username();
    signup(&app, &username).await;

    let res = post_form(
        &app,
        "/accounts/login",
        None,
        &format!("username={username}&password=wrongwrong&next=/toys"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_text(res).await;
    assert!(body.contains("Username and password did not match."));

    let res = post_form(
        &app,
        "/accounts/login",
        None,
        &format!("username={username}&password=meowmeow1&next=/toys"),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/toys");
    assert!(res.headers().get(header::SET_COOKIE).is_some());
}

#[tokio::test]
#[ignore = "requires database"]
async fn cat_pages_are_scoped_to_their_owner() {
    let app = test_app().await;
    let alice = signup(&app, &fresh_username()).await;
    let bob = signup(&app, &fresh_username()).await;

    let cat_name = format!("Mittens{}", Uuid::new_v4().simple());
    let cat_id = create_cat(&app, &alice, &cat_name).await;

    let res = get(&app, "/cats", Some(&alice)).await;
    assert!(body_text(res).await.contains(&cat_name));

    let res = get(&app, "/cats", Some(&bob)).await;
    assert!(
        !body_text(res).await.contains(&cat_name),
        "another collector's index must not list the cat"
    );

    let res = get(&app, &format!("/cats/{cat_id}"), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = get(&app, &format!("/cats/{cat_id}"), Some(&alice)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn cat_owner_comes_from_the_session_not_the_form() {
    let app = test_app().await;
    let alice_name = fresh_username();
    let bob_name = fresh_username();
    let alice = signup(&app, &alice_name).await;
    signup(&app, &bob_name).await;

    let alice_id = user_id(&app, &alice_name).await;
    let bob_id = user_id(&app, &bob_name).await;

    // Smuggled owner fields are dropped by the form DTO
    let form = format!(
        "name=Loki&breed=void&description=Screams+at+4am&age=2\
         &user={bob_id}&user_id={bob_id}&owner={bob_id}"
    );
    let res = post_form(&app, "/cats/create", Some(&alice), &form).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    let cat_id = id_from_redirect(&res);

    let repo = CatRepo::new(&app.pool);
    assert!(repo.get_for_owner(cat_id, alice_id).await.is_ok());
    assert!(matches!(
        repo.get_for_owner(cat_id, bob_id).await,
        Err(DbError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn giving_a_toy_twice_keeps_a_single_link() {
    let app = test_app().await;
    let alice = signup(&app, &fresh_username()).await;
    let cat_id = create_cat(&app, &alice, "Patches").await;
    let toy_id = create_toy(&app, &alice, "Feather+wand").await;

    for _ in 0..2 {
        let res = get(
            &app,
            &format!("/cats/{cat_id}/assoc_toy/{toy_id}"),
            Some(&alice),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), format!("/cats/{cat_id}"));
    }

    let toys = CatRepo::new(&app.pool)
        .toys_for_cat(cat_id)
        .await
        .expect("toys lookup failed");
    assert_eq!(toys.len(), 1);
    assert_eq!(toys[0].id, toy_id);
}

#[tokio::test]
#[ignore = "requires database"]
async fn toys_are_shared_between_collectors() {
    let app = test_app().await;
    let alice = signup(&app, &fresh_username()).await;
    let bob = signup(&app, &fresh_username()).await;

    let toy_id = create_toy(&app, &alice, "Crinkle+ball").await;

    let res = get(&app, &format!("/toys/{toy_id}"), Some(&bob)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = post_form(
        &app,
        &format!("/toys/{toy_id}/update"),
        Some(&bob),
        "name=Crinkle+ball&color=gold",
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let toy = ToyRepo::new(&app.pool)
        .get(toy_id)
        .await
        .expect("toy lookup failed");
    assert_eq!(toy.color, "gold");
}

#[tokio::test]
#[ignore = "requires database"]
async fn rejected_feeding_adds_no_row_and_returns_to_the_cat() {
    let app = test_app().await;
    let alice = signup(&app, &fresh_username()).await;
    let cat_id = create_cat(&app, &alice, "Biscuit").await;
    let feedings = FeedingRepo::new(&app.pool);

    let res = post_form(
        &app,
        &format!("/cats/{cat_id}/add_feeding"),
        Some(&alice),
        "date=purrsday&meal=B",
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(
        location(&res).starts_with(&format!("/cats/{cat_id}?error=")),
        "rejection should land back on the detail page with a message"
    );
    assert!(feedings
        .list_for_cat(cat_id)
        .await
        .expect("feedings lookup failed")
        .is_empty());

    let res = post_form(
        &app,
        &format!("/cats/{cat_id}/add_feeding"),
        Some(&alice),
        "date=2026-08-25&meal=L",
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/cats/{cat_id}"));

    let rows = feedings
        .list_for_cat(cat_id)
        .await
        .expect("feedings lookup failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].meal, "L");
    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2026, 8, 25).unwrap());

    // An unknown meal code is rejected the same way as a bad date
    let res = post_form(
        &app,
        &format!("/cats/{cat_id}/add_feeding"),
        Some(&alice),
        "date=2026-08-26&meal=X",
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert!(location(&res).contains("error="));
    assert_eq!(
        feedings
            .list_for_cat(cat_id)
            .await
            .expect("feedings lookup failed")
            .len(),
        1
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn uploaded_photos_get_short_hex_keys_and_stored_urls() {
    let app = test_app().await;
    let alice = signup(&app, &fresh_username()).await;
    let cat_id = create_cat(&app, &alice, "Smokey").await;

    let bytes = b"\x89PNG not really a png".to_vec();
    let res = upload_photo(&app, &alice, cat_id, &bytes).await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), format!("/cats/{cat_id}"));

    let keys = app.store.keys();
    assert_eq!(keys.len(), 1);
    let key = &keys[0];
    let key_shape = Regex::new(r"^[0-9a-f]{6}\.png$").expect("bad regex");
    assert!(key_shape.is_match(key), "unexpected photo key {key}");
    assert_eq!(app.store.get(key), Some(bytes));

    let photos = PhotoRepo::new(&app.pool)
        .list_for_cat(cat_id)
        .await
        .expect("photos lookup failed");
    assert_eq!(photos.len(), 1);
    assert_eq!(photos[0].url, format!("memory://photos/{key}"));

    let res = get(&app, &format!("/cats/{cat_id}"), Some(&alice)).await;
    assert!(
        body_text(res).await.contains(key.as_str()),
        "detail page should show the uploaded photo"
    );
}

#[tokio::test]
#[ignore = "requires database"]
async fn deleting_a_cat_removes_feedings_and_photos_but_spares_toys() {
    let app = test_app().await;
    let alice_name = fresh_username();
    let alice = signup(&app, &alice_name).await;
    let alice_id = user_id(&app, &alice_name).await;

    let cat_id = create_cat(&app, &alice, "Pumpkin").await;
    let toy_id = create_toy(&app, &alice, "Bell+mouse").await;

    let res = get(
        &app,
        &format!("/cats/{cat_id}/assoc_toy/{toy_id}"),
        Some(&alice),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let res = post_form(
        &app,
        &format!("/cats/{cat_id}/add_feeding"),
        Some(&alice),
        "date=2026-08-25&meal=B",
    )
    .await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let res = upload_photo(&app, &alice, cat_id, b"bytes").await;
    assert_eq!(res.status(), StatusCode::FOUND);

    let res = post_form(&app, &format!("/cats/{cat_id}/delete"), Some(&alice), "").await;
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(location(&res), "/cats");

    assert!(matches!(
        CatRepo::new(&app.pool).get_for_owner(cat_id, alice_id).await,
        Err(DbError::NotFound { .. })
    ));
    assert!(FeedingRepo::new(&app.pool)
        .list_for_cat(cat_id)
        .await
        .expect("feedings lookup failed")
        .is_empty());
    assert!(PhotoRepo::new(&app.pool)
        .list_for_cat(cat_id)
        .await
        .expect("photos lookup failed")
        .is_empty());

    // The shared toy chest is untouched
    assert!(ToyRepo::new(&app.pool).get(toy_id).await.is_ok());
}

#[tokio::test]
#[ignore = "requires database"]
async fn health_endpoint_reports_database_status() {
    let app = test_app().await;

    let res = get(&app, "/health", None).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_text(res).await;
    assert!(body.contains("\"database\":\"ok\""));
}
