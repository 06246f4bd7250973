use std::sync::Arc;

use super::cached;
use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::models::{Report, ReportPeriod};
use crate::query::QueryKey;
use crate::types::Domain;

#[derive(Clone)]
pub struct ReportService {
    api: Arc<ApiClient>,
}

impl ReportService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get(&self, period: ReportPeriod) -> Result<Report, ClientError> {
        let pairs = period.query_pairs();
        cached(
            &self.api,
            QueryKey::new(Domain::Reports, period.path()).params(pairs.clone()),
            ApiRequest::get(endpoints::report(period.path())).query_pairs(pairs),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::QueryCache;
    use crate::store::AuthStore;
    use crate::testing::{json_response, MockTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_monthly_report_query() {
        let transport = MockTransport::new(|_req| {
            json_response(200, json!({"period": "2024-02", "total_invoiced": "1500.00", "by_client": []}))
        });
        let reports = ReportService::new(Arc::new(ApiClient::new(
            transport.clone(),
            AuthStore::in_memory(),
            QueryCache::disabled(),
        )));

        let report = reports.get(ReportPeriod::Monthly { year: 2024, month: 2 }).await.unwrap();

        assert_eq!(report.total_invoiced.to_string(), "1500.00");
        assert!(report.breakdown.contains_key("by_client"));
        let sent = &transport.requests()[0];
        assert_eq!(sent.path, "/reports/monthly");
        assert_eq!(
            sent.query,
            vec![("year".to_string(), "2024".to_string()), ("month".to_string(), "2".to_string())]
        );
    }
}
