//! The gas estimation JSON-RPC server.
//!
//! A single-method endpoint: `gas_requestGasEstimation` with params
//! `[chainId]`, responding with the speed-tier table as hex quantities. The
//! Polygon family is served through the gas station oracle; every other chain
//! is estimated from the fee history of the configured upstream node, which
//! should therefore point at the chain the server is deployed for.

use crate::rpc::{Request, Response, RpcError};
use alloy_provider::Provider;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use gaskit_oracle::GasOracle;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// The only method this server exposes.
pub const GAS_ESTIMATION_METHOD: &str = "gas_requestGasEstimation";

/// Builds the router for the gas estimation endpoint.
pub fn router<P>(oracle: GasOracle<P>) -> Router
where
    P: Provider + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(handle::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(oracle))
}

/// Binds `addr` and serves the gas estimation endpoint until the task is
/// cancelled.
pub async fn serve<P>(addr: SocketAddr, oracle: GasOracle<P>) -> eyre::Result<()>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "gaskit::server", %addr, "gas estimation server listening");
    axum::serve(listener, router(oracle)).await?;
    Ok(())
}

/// Handles one incoming JSON-RPC request.
async fn handle<P: Provider>(
    State(oracle): State<Arc<GasOracle<P>>>,
    request: Result<Json<Request>, JsonRejection>,
) -> Json<Response> {
    let request = match request {
        Ok(Json(request)) => request,
        Err(err) => {
            warn!(target: "gaskit::server", %err, "invalid request");
            return Json(Response::error(None, RpcError::invalid_request()));
        }
    };
    Json(on_request(&oracle, request).await)
}

/// Dispatches a parsed request to the oracle.
async fn on_request<P: Provider>(oracle: &GasOracle<P>, request: Request) -> Response {
    let Request { method, params, id, .. } = request;
    if method != GAS_ESTIMATION_METHOD {
        return Response::error(id, RpcError::method_not_found());
    }

    let (chain_id,) = match serde_json::from_value::<(u64,)>(params) {
        Ok(params) => params,
        Err(err) => return Response::error(id, RpcError::invalid_params(err.to_string())),
    };

    match oracle.estimate(chain_id).await {
        Ok(estimation) => match serde_json::to_value(estimation) {
            Ok(value) => Response::success(id, value),
            Err(err) => Response::error(id, RpcError::internal_error_with(err.to_string())),
        },
        Err(err) => {
            warn!(target: "gaskit::server", %err, chain_id, "gas estimation failed");
            Response::error(id, RpcError::internal_error_with(err.to_string()))
        }
    }
}
