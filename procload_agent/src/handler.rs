//! Content handler: sample host load, attach it as headers, send a fixed body.

use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use procload::HostLoad;
use tracing::warn;

use crate::state::AppState;

pub const HELLO_WORLD: &str = "hello world\r\n";

// Header names keep the spelling existing consumers already parse.
pub const MEM_HEADER: &str = "x-memutlization-percent";
pub const CPU_HEADER: &str = "x-cpuutlization-percent";

pub async fn hello_world_handler(State(state): State<AppState>) -> Response {
    match HostLoad::sample(&state.sources) {
        Ok(load) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/plain".to_string()),
                (HeaderName::from_static(MEM_HEADER), load.mem_header_value()),
                (HeaderName::from_static(CPU_HEADER), load.cpu_header_value()),
            ],
            HELLO_WORLD,
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, kind = ?e.kind(), "host load sampling failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                "host load unavailable\r\n",
            )
                .into_response()
        }
    }
}
