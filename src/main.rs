use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::response::Response;
use axum::Router;
use dotenvy::dotenv;
use tracker_core::{handle, AppState, CORS_HEADERS};

type GenericError = Box<dyn std::error::Error + Send + Sync + 'static>;

const BODY_LIMIT: usize = 64 * 1024;

/// Local development server: exposes the same two POST routes as the Lambda
/// by forwarding the raw method, path and body into the core router.
#[tokio::main]
async fn main() -> Result<(), GenericError> {
    dotenv().ok();

    let state = AppState::from_env().await?;

    let router = Router::new().fallback(forward).with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!("listening on 3000");
    axum::serve(listener, router).await?;

    Ok(())
}

async fn forward(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, BODY_LIMIT).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return envelope(400, r#"{"message":"Request body could not be read."}"#.into())
        }
    };
    let body = (!bytes.is_empty()).then(|| String::from_utf8_lossy(&bytes).into_owned());

    let api = handle(&state, parts.method.as_str(), parts.uri.path(), body.as_deref()).await;
    envelope(api.status, api.body)
}

fn envelope(status: u16, body: String) -> Response {
    let mut response = Response::builder()
        .status(status)
        .header("content-type", "application/json");
    for (name, value) in CORS_HEADERS {
        response = response.header(name, value);
    }
    response
        .body(Body::from(body))
        .expect("static response parts")
}
