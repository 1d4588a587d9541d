use axum::Json;

use crate::response::ServiceInfo;

/// GET / - Service banner.
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Sales Insights API",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}
