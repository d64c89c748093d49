use async_trait::async_trait;
use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use crate::domain::analytics::{AnalyticsKind, ChartData, TimeUnit};
use crate::domain::ids::BusinessId;

// ============================================================================
// Analytics Endpoint
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsQuery<'a> {
    business_id: &'a BusinessId,
    unit: &'static str,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn fetch(
        &self,
        kind: AnalyticsKind,
        business_id: &BusinessId,
        unit: TimeUnit,
    ) -> Result<ChartData, ApiError>;
}

#[async_trait]
impl AnalyticsApi for ApiClient {
    async fn fetch(
        &self,
        kind: AnalyticsKind,
        business_id: &BusinessId,
        unit: TimeUnit,
    ) -> Result<ChartData, ApiError> {
        let url = self.endpoint(&["analytics", kind.path_segment()])?;
        let query = AnalyticsQuery {
            business_id,
            unit: unit.as_str(),
        };
        self.send("analytics.fetch", self.get(url).query(&query)).await
    }
}
