//! # Panic Guard
//!
//! Tower layer that turns a panicking handler into an `INTERNAL` status
//! instead of a dropped connection. The panic payload is logged.

use std::any::Any;
use tonic::body::Body;
use tonic::codegen::http::Response;
use tower_http::catch_panic::CatchPanicLayer;

/// Converts a caught panic into a gRPC response.
pub type PanicResponder = fn(Box<dyn Any + Send + 'static>) -> Response<Body>;

/// Layer installed on the gRPC server.
pub type PanicGuardLayer = CatchPanicLayer<PanicResponder>;

/// Builds the panic guard layer.
#[must_use]
pub fn panic_guard() -> PanicGuardLayer {
    CatchPanicLayer::custom(internal_status as PanicResponder)
}

fn internal_status(panic: Box<dyn Any + Send + 'static>) -> Response<Body> {
    tracing::error!(panic = panic_message(panic.as_ref()), "handler panicked");
    tonic::Status::internal("internal error").into_http::<Body>()
}

/// Extracts the message of a panic payload.
#[must_use]
pub fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::future::Ready;
    use tonic::codegen::http::Request;
    use tower::{Layer, ServiceExt};

    #[tokio::test]
    async fn panicking_handler_becomes_internal_status() {
        let handler = tower::service_fn(
            |_req: Request<Body>| -> Ready<Result<Response<Body>, Infallible>> {
                panic!("catalog handler exploded")
            },
        );
        let service = panic_guard().layer(handler);

        let response = service.oneshot(Request::new(Body::empty())).await.unwrap();
        let grpc_status = response.headers().get("grpc-status").unwrap();
        assert_eq!(grpc_status, "13");
    }

    #[tokio::test]
    async fn healthy_handler_passes_through() {
        let handler = tower::service_fn(|_req: Request<Body>| async {
            Ok::<_, Infallible>(Response::new(Body::empty()))
        });
        let service = panic_guard().layer(handler);

        let response = service.oneshot(Request::new(Body::empty())).await.unwrap();
        assert!(response.headers().get("grpc-status").is_none());
    }

    #[test]
    fn panic_message_reads_string_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(owned.as_ref()), "owned");

        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        assert_eq!(panic_message(borrowed.as_ref()), "borrowed");

        let other: Box<dyn Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }
}
