//! End-to-end router tests: register → login → stock a product → sell it,
//! all through `Router::oneshot` without opening a socket.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mostrador_db::{Database, DbConfig};
use mostrador_server::config::ServerConfig;
use mostrador_server::{routes, AppState};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(db, ServerConfig::for_tests());
    routes::router(state)
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie.to_string())
        .body(Body::empty())
        .unwrap()
}

fn form_post_with_cookie(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie.to_string())
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers and logs in, returning the session cookie pair.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_post("/registro", "usuario=marta&password=secreto123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(form_post("/login", "usuario=marta&password=secreto123"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set the session cookie")
        .to_str()
        .unwrap();

    // "mostrador_session=<token>; Path=/; HttpOnly; ..."
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn anonymous_requests_are_redirected_to_login() {
    let app = test_app().await;

    for uri in ["/", "/historial", "/buscar_precio"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}

#[tokio::test]
async fn duplicate_username_is_conflict() {
    let app = test_app().await;

    let first = app
        .clone()
        .oneshot(form_post("/registro", "usuario=marta&password=secreto123"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = app
        .clone()
        .oneshot(form_post("/registro", "usuario=marta&password=otraclave99"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app().await;

    app.clone()
        .oneshot(form_post("/registro", "usuario=marta&password=secreto123"))
        .await
        .unwrap();

    let wrong_password = app
        .clone()
        .oneshot(form_post("/login", "usuario=marta&password=equivocada1"))
        .await
        .unwrap();
    let unknown_user = app
        .clone()
        .oneshot(form_post("/login", "usuario=nadie&password=equivocada1"))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: the response never reveals which accounts exist
    let body_a = wrong_password.into_body().collect().await.unwrap().to_bytes();
    let body_b = unknown_user.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body_a, body_b);
}

#[tokio::test]
async fn full_counter_flow() {
    let app = test_app().await;
    let cookie = login(&app).await;

    // Stock a product: 10 pens at 2.00
    let response = app
        .clone()
        .oneshot(form_post_with_cookie(
            "/agregar",
            &cookie,
            "nombre=Lapicera&categoria=Libreria&stock=10&precio=2.00&stock_minimo=5",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let product = json_body(response).await;
    let id = product["id"].as_i64().unwrap();
    assert_eq!(product["price_cents"], 200);

    // Sell 3 → total 600 cents, stock goes to 7
    let response = app
        .clone()
        .oneshot(form_post_with_cookie(
            "/vender",
            &cookie,
            &format!("id={id}&cantidad=3"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let sale = json_body(response).await;
    assert_eq!(sale["product_name"], "Lapicera");
    assert_eq!(sale["total_cents"], 600);

    // Overselling is refused and names the remaining quantity
    let response = app
        .clone()
        .oneshot(form_post_with_cookie(
            "/vender",
            &cookie,
            &format!("id={id}&cantidad=20"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = json_body(response).await;
    assert_eq!(error["code"], "INSUFFICIENT_STOCK");
    assert!(error["message"].as_str().unwrap().contains('7'));

    // The public API sees the decremented stock without a session
    let response = app.clone().oneshot(get("/api/productos")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let products = json_body(response).await;
    assert_eq!(products[0]["stock"], 7);

    // The daily summary balances: one 600¢ sale, no services
    let response = app
        .clone()
        .oneshot(get_with_cookie("/historial", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let summary = json_body(response).await;
    assert_eq!(summary["sales"].as_array().unwrap().len(), 1);
    assert_eq!(summary["total_sales"], 600);
    assert_eq!(summary["grand_total"], 600);
}

#[tokio::test]
async fn services_count_toward_the_daily_total() {
    let app = test_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_post_with_cookie(
            "/registrar_servicio",
            &cookie,
            "tipo=fotocopias&monto=1.50",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let charge = json_body(response).await;
    assert_eq!(charge["amount_cents"], 150);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/historial", &cookie))
        .await
        .unwrap();
    let summary = json_body(response).await;
    assert_eq!(summary["total_services"], 150);
    assert_eq!(summary["grand_total"], 150);
}

#[tokio::test]
async fn malformed_numeric_field_is_bad_request() {
    let app = test_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_post_with_cookie(
            "/agregar",
            &cookie,
            "nombre=Lapicera&categoria=Libreria&stock=muchos&precio=2.00",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was inserted
    let response = app.clone().oneshot(get("/api/productos")).await.unwrap();
    let products = json_body(response).await;
    assert!(products.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn low_stock_alerts_fire_once_per_session() {
    let app = test_app().await;
    let cookie = login(&app).await;

    // stock 2 <= min_stock 5 → low from the start
    app.clone()
        .oneshot(form_post_with_cookie(
            "/agregar",
            &cookie,
            "nombre=Goma&categoria=Libreria&stock=2&precio=0.50",
        ))
        .await
        .unwrap();

    let first = json_body(
        app.clone()
            .oneshot(get_with_cookie("/", &cookie))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first["alertas"].as_array().unwrap().len(), 1);
    assert!(first["alertas"][0].as_str().unwrap().contains("Goma"));

    // Second render of the same session: alerts already delivered
    let second = json_body(
        app.clone()
            .oneshot(get_with_cookie("/", &cookie))
            .await
            .unwrap(),
    )
    .await;
    assert!(second["alertas"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = test_app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // The old cookie no longer opens the dashboard
    let response = app
        .clone()
        .oneshot(get_with_cookie("/", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}
