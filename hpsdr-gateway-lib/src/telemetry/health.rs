use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

type BoxBody = http_body_util::combinators::BoxBody<Bytes, std::convert::Infallible>;

fn text_body(body: &'static str) -> BoxBody {
    Full::new(Bytes::from(body)).map_err(|never| match never {}).boxed()
}

/// Liveness: the process is up and servicing HTTP requests at all.
pub fn live_check_response() -> Result<Response<BoxBody>, Box<dyn std::error::Error + Send + Sync>>
{
    Ok(Response::builder()
        .status(StatusCode::OK)
        .body(text_body("OK"))?)
}

/// Health: same signal as liveness for this process; kept distinct so
/// orchestrators can probe either name.
pub fn health_check_response(
) -> Result<Response<BoxBody>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Response::builder()
        .status(StatusCode::OK)
        .body(text_body("OK"))?)
}

/// Readiness: the gateway has at least one usable radio route. Callers
/// pass whether radio resolution produced at least one descriptor.
pub fn ready_check_response(
    has_usable_radio: bool,
) -> Result<Response<BoxBody>, Box<dyn std::error::Error + Send + Sync>> {
    if has_usable_radio {
        Ok(Response::builder()
            .status(StatusCode::OK)
            .body(text_body("OK"))?)
    } else {
        Ok(Response::builder()
            .status(StatusCode::SERVICE_UNAVAILABLE)
            .body(text_body("no usable radio"))?)
    }
}
