use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use prometheus::{Encoder, Registry, TextEncoder};

type BoxBody = http_body_util::combinators::BoxBody<Bytes, std::convert::Infallible>;

fn text_body(body: Vec<u8>) -> BoxBody {
    Full::new(Bytes::from(body)).map_err(|never| match never {}).boxed()
}

/// Render the Prometheus registry in text exposition format.
pub fn handle_metrics(
    registry: &Registry,
) -> Result<Response<BoxBody>, Box<dyn std::error::Error + Send + Sync>> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", encoder.format_type())
        .body(text_body(buffer))?)
}
