//! Proposal inbox/outbox endpoints.

use reqwest::Method;
use serde::Serialize;
use tracing::{debug, info};

use market_types::{Proposal, ProposalId, Result};

use crate::ApiClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptBody<'a> {
    response_message: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody<'a> {
    response_message: &'a str,
    rejection_reason: &'a str,
}

impl ApiClient {
    /// `GET /api/v1/proposals`: the proposals visible to the signed-in member.
    pub async fn list_proposals(&self) -> Result<Vec<Proposal>> {
        let proposals: Vec<Proposal> = self
            .send_enveloped(self.request(Method::GET, "/api/v1/proposals"))
            .await?;
        debug!("Loaded {} proposals", proposals.len());
        Ok(proposals)
    }

    /// `PUT /api/v1/proposals/{id}/accept`
    pub async fn accept_proposal(&self, id: ProposalId, response_message: &str) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/api/v1/proposals/{id}/accept"))
            .json(&AcceptBody { response_message });
        self.send(request).await?;
        info!("Accepted proposal {}", id);
        Ok(())
    }

    /// `PUT /api/v1/proposals/{id}/reject`
    ///
    /// A missing reason is sent as an empty string.
    pub async fn reject_proposal(
        &self,
        id: ProposalId,
        response_message: &str,
        rejection_reason: Option<&str>,
    ) -> Result<()> {
        let request = self
            .request(Method::PUT, &format!("/api/v1/proposals/{id}/reject"))
            .json(&RejectBody {
                response_message,
                rejection_reason: rejection_reason.unwrap_or_default(),
            });
        self.send(request).await?;
        info!("Rejected proposal {}", id);
        Ok(())
    }

    /// `DELETE /api/v1/proposals/{id}`
    pub async fn cancel_proposal(&self, id: ProposalId) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("/api/v1/proposals/{id}")))
            .await?;
        info!("Cancelled proposal {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiConfig;
    use market_types::{ClientError, ProposalStatus};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROPOSAL_JSON: &str = r#"{
        "id": 3, "projectId": 7, "projectTitle": "Shop redesign",
        "pmId": 1, "pmName": "Lee", "freelancerId": 2, "freelancerName": "Kim",
        "message": "Interested?", "status": "PENDING",
        "createdAt": "2025-03-01T10:00:00", "updatedAt": "2025-03-01T10:00:00"
    }"#;

    #[tokio::test]
    async fn test_list_proposals_wrapped_in_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/proposals"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(format!(r#"{{"data":[{PROPOSAL_JSON}]}}"#)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(server.uri())).unwrap();
        let proposals = client.list_proposals().await.unwrap();

        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].id, 3);
        assert_eq!(proposals[0].status, ProposalStatus::Pending);
    }

    #[tokio::test]
    async fn test_accept_sends_response_message() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/proposals/3/accept"))
            .and(body_json(serde_json::json!({ "responseMessage": "Let's go" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(server.uri())).unwrap();
        client.accept_proposal(3, "Let's go").await.unwrap();
    }

    #[tokio::test]
    async fn test_reject_without_reason_sends_empty_reason() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/proposals/3/reject"))
            .and(body_json(serde_json::json!({
                "responseMessage": "Sorry",
                "rejectionReason": ""
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(server.uri())).unwrap();
        client.reject_proposal(3, "Sorry", None).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_failure_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/proposals/3"))
            .respond_with(ResponseTemplate::new(409).set_body_string("already accepted"))
            .mount(&server)
            .await;

        let client = ApiClient::new(ApiConfig::new(server.uri())).unwrap();
        let result = client.cancel_proposal(3).await;
        assert!(matches!(result, Err(ClientError::Status { status: 409, .. })));
    }
}
