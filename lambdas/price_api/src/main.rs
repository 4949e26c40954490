use lambda_http::{run, service_fn, tracing};
use lambda_http::{Body, Error, Request, RequestExt, Response};
use tracker_core::{handle, AppState, CORS_HEADERS};

async fn function_handler(state: &AppState, event: Request) -> Result<Response<Body>, Error> {
    let path = event.raw_http_path().to_string();
    let body = match event.body() {
        Body::Empty => None,
        Body::Text(text) => Some(text.as_str()),
        Body::Binary(bytes) => std::str::from_utf8(bytes).ok(),
    };

    let api = handle(state, event.method().as_str(), &path, body).await;

    let mut response = Response::builder()
        .status(api.status)
        .header("content-type", "application/json");
    for (name, value) in CORS_HEADERS {
        response = response.header(name, value);
    }

    Ok(response.body(api.body.into())?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let state = AppState::from_env().await?;

    run(service_fn(|event| function_handler(&state, event))).await
}
