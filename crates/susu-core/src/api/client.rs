//! Typed SusuPay API client.
//!
//! One method per backend endpoint, all routed through the authenticated
//! gateway. Login and join persist the issued credential pair; logout clears
//! it. Everything else is a thin request/response mapping.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::api::endpoints;
use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{
    ClientBalance, ClientJoinRequest, ClientLoginRequest, ClientPayoutItem, ClientProfile,
    ClientSmsSubmitRequest, ClientStatement, ClientTransactionItem, ClientUpdateRequest,
    CollectorDashboard, CollectorLoginRequest, CollectorProfile, CollectorRegisterRequest,
    CollectorRegisterResponse, CollectorResetPinRequest, CollectorSetMomoRequest,
    CollectorSetMomoResponse, CollectorSetPinRequest, CollectorSetPinResponse,
    CollectorUpdateRequest, GroupMemberItem, InviteInfoResponse, MonthlySummary, OtpPurpose,
    OtpSendRequest, OtpSendResponse, OtpVerifyRequest, OtpVerifyResponse, Paginated,
    PayoutDeclineRequest, PayoutListItem, PayoutRequest, PayoutResponse, SmsSubmitRequest,
    SubmitResponse, TokenResponse, TransactionActionResponse, TransactionFeedItem,
    TransactionNoteRequest, TransactionStatus,
};
use crate::auth::gateway::{ApiRequest, AuthGateway, MultipartSpec};
use crate::auth::store::{CredentialPair, TokenStore};
use crate::config::Config;

/// Offset pagination window.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 20 }
    }
}

/// Typed client over one SusuPay deployment.
pub struct SusuClient {
    gateway: AuthGateway,
}

impl SusuClient {
    /// Creates a client over an existing gateway.
    pub fn new(gateway: AuthGateway) -> Self {
        Self { gateway }
    }

    /// Creates a client from configuration, using the default credential
    /// store location.
    ///
    /// # Errors
    /// Returns an error if the credential store cannot be opened.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let store = Arc::new(TokenStore::open_default()?);
        let gateway = AuthGateway::new(config.api_base_url.clone(), store)
            .with_refresh_timeout(config.refresh_timeout());
        Ok(Self { gateway })
    }

    /// Returns the underlying gateway.
    pub fn gateway(&self) -> &AuthGateway {
        &self.gateway
    }

    /// Returns the credential store.
    pub fn store(&self) -> &Arc<TokenStore> {
        self.gateway.store()
    }

    // -- Auth ---------------------------------------------------------------

    /// Requests an OTP for the given phone and purpose.
    pub async fn otp_send(&self, phone: &str, purpose: OtpPurpose) -> ApiResult<OtpSendResponse> {
        self.post_json(
            endpoints::AUTH_OTP_SEND,
            &OtpSendRequest {
                phone: phone.to_string(),
                purpose,
            },
        )
        .await
    }

    /// Verifies an OTP, yielding a short-lived verification token.
    pub async fn otp_verify(
        &self,
        phone: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> ApiResult<OtpVerifyResponse> {
        self.post_json(
            endpoints::AUTH_OTP_VERIFY,
            &OtpVerifyRequest {
                phone: phone.to_string(),
                code: code.to_string(),
                purpose,
            },
        )
        .await
    }

    /// Starts collector registration.
    pub async fn collector_register(
        &self,
        request: &CollectorRegisterRequest,
    ) -> ApiResult<CollectorRegisterResponse> {
        self.post_json(endpoints::AUTH_COLLECTOR_REGISTER, request)
            .await
    }

    /// Sets the collector PIN during registration.
    pub async fn collector_set_pin(
        &self,
        request: &CollectorSetPinRequest,
    ) -> ApiResult<CollectorSetPinResponse> {
        self.post_json(endpoints::AUTH_COLLECTOR_SET_PIN, request)
            .await
    }

    /// Completes registration with mobile-money and contribution settings.
    pub async fn collector_set_momo(
        &self,
        request: &CollectorSetMomoRequest,
    ) -> ApiResult<CollectorSetMomoResponse> {
        self.post_json(endpoints::AUTH_COLLECTOR_SET_MOMO, request)
            .await
    }

    /// Logs a collector in and persists the issued credential pair.
    pub async fn collector_login(&self, phone: &str, pin: &str) -> ApiResult<TokenResponse> {
        let tokens: TokenResponse = self
            .post_json(
                endpoints::AUTH_COLLECTOR_LOGIN,
                &CollectorLoginRequest {
                    phone: phone.to_string(),
                    pin: pin.to_string(),
                },
            )
            .await?;
        self.persist_tokens(&tokens)?;
        Ok(tokens)
    }

    /// Resets the collector PIN using an OTP verification token.
    pub async fn collector_reset_pin(
        &self,
        request: &CollectorResetPinRequest,
    ) -> ApiResult<CollectorSetPinResponse> {
        self.post_json(endpoints::AUTH_COLLECTOR_RESET_PIN, request)
            .await
    }

    /// Looks up an invite code before joining.
    pub async fn invite_info(&self, code: &str) -> ApiResult<InviteInfoResponse> {
        self.get_json(&endpoints::auth_invite_info(code)).await
    }

    /// Joins a susu group and persists the issued credential pair.
    pub async fn client_join(&self, request: &ClientJoinRequest) -> ApiResult<TokenResponse> {
        let tokens: TokenResponse = self.post_json(endpoints::AUTH_CLIENT_JOIN, request).await?;
        self.persist_tokens(&tokens)?;
        Ok(tokens)
    }

    /// Logs a client in with an OTP code and persists the credential pair.
    pub async fn client_login(&self, phone: &str, code: &str) -> ApiResult<TokenResponse> {
        let tokens: TokenResponse = self
            .post_json(
                endpoints::AUTH_CLIENT_LOGIN,
                &ClientLoginRequest {
                    phone: phone.to_string(),
                    code: code.to_string(),
                },
            )
            .await?;
        self.persist_tokens(&tokens)?;
        Ok(tokens)
    }

    /// Clears the stored credential pair. Returns true if one was present.
    ///
    /// # Errors
    /// Returns an error if the credential file cannot be removed.
    pub fn logout(&self) -> anyhow::Result<bool> {
        self.store().clear()
    }

    // -- Collectors ---------------------------------------------------------

    /// Fetches the authenticated collector's profile.
    pub async fn collector_me(&self) -> ApiResult<CollectorProfile> {
        self.get_json(endpoints::COLLECTORS_ME).await
    }

    /// Updates the authenticated collector's profile.
    pub async fn collector_update(
        &self,
        update: &CollectorUpdateRequest,
    ) -> ApiResult<CollectorProfile> {
        let request = ApiRequest::patch_json(endpoints::COLLECTORS_ME, update)?;
        self.send_json(&request).await
    }

    /// Fetches the collector dashboard.
    pub async fn collector_dashboard(&self) -> ApiResult<CollectorDashboard> {
        self.get_json(endpoints::COLLECTORS_DASHBOARD).await
    }

    /// Lists the collector's clients.
    pub async fn collector_clients(
        &self,
        page: Page,
    ) -> ApiResult<Paginated<crate::api::types::ClientListItem>> {
        let request = ApiRequest::get(endpoints::COLLECTORS_CLIENTS)
            .query("skip", page.skip)
            .query("limit", page.limit);
        self.send_json(&request).await
    }

    /// Fetches one client as seen by their collector.
    pub async fn collector_client(&self, id: &str) -> ApiResult<ClientProfile> {
        self.get_json(&endpoints::collectors_client(id)).await
    }

    // -- Clients ------------------------------------------------------------

    /// Fetches the authenticated client's profile.
    pub async fn client_me(&self) -> ApiResult<ClientProfile> {
        self.get_json(endpoints::CLIENTS_ME).await
    }

    /// Updates the authenticated client's profile.
    pub async fn client_update(&self, update: &ClientUpdateRequest) -> ApiResult<ClientProfile> {
        let request = ApiRequest::patch_json(endpoints::CLIENTS_ME, update)?;
        self.send_json(&request).await
    }

    /// Fetches the authenticated client's balance.
    pub async fn client_balance(&self) -> ApiResult<ClientBalance> {
        self.get_json(endpoints::CLIENTS_BALANCE).await
    }

    /// Lists fellow members of the client's group.
    pub async fn client_group(&self) -> ApiResult<Vec<GroupMemberItem>> {
        self.get_json(endpoints::CLIENTS_GROUP).await
    }

    /// Pages through a fellow member's confirmed contribution history.
    pub async fn member_history(
        &self,
        member_id: &str,
        page: Page,
    ) -> ApiResult<Paginated<ClientTransactionItem>> {
        let request = ApiRequest::get(endpoints::clients_member_history(member_id))
            .query("skip", page.skip)
            .query("limit", page.limit);
        self.send_json(&request).await
    }

    // -- Transactions -------------------------------------------------------

    /// Submits a payment SMS on behalf of a client (collector flow).
    pub async fn submit_sms(&self, request: &SmsSubmitRequest) -> ApiResult<SubmitResponse> {
        self.post_json(endpoints::TRANSACTIONS_SUBMIT_SMS, request)
            .await
    }

    /// Submits the client's own payment SMS.
    pub async fn client_submit_sms(
        &self,
        request: &ClientSmsSubmitRequest,
    ) -> ApiResult<SubmitResponse> {
        self.post_json(endpoints::TRANSACTIONS_CLIENT_SUBMIT_SMS, request)
            .await
    }

    /// Submits a payment screenshot on behalf of a client (collector flow).
    pub async fn submit_screenshot(
        &self,
        client_id: &str,
        amount: f64,
        filename: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<SubmitResponse> {
        let spec = MultipartSpec::with_file("screenshot", filename, mime, bytes)
            .text("client_id", client_id)
            .text("amount", amount.to_string());
        let request = ApiRequest::post_multipart(endpoints::TRANSACTIONS_SUBMIT_SCREENSHOT, spec);
        self.send_json(&request).await
    }

    /// Submits the client's own payment screenshot.
    pub async fn client_submit_screenshot(
        &self,
        amount: f64,
        filename: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<SubmitResponse> {
        let spec = MultipartSpec::with_file("screenshot", filename, mime, bytes)
            .text("amount", amount.to_string());
        let request =
            ApiRequest::post_multipart(endpoints::TRANSACTIONS_CLIENT_SUBMIT_SCREENSHOT, spec);
        self.send_json(&request).await
    }

    /// Fetches the most recent pending submissions for the collector feed.
    pub async fn transaction_feed(&self, limit: u64) -> ApiResult<Paginated<TransactionFeedItem>> {
        let request = ApiRequest::get(endpoints::TRANSACTIONS_FEED)
            .query("skip", 0)
            .query("limit", limit);
        self.send_json(&request).await
    }

    /// Pages through the collector's transactions, optionally by status.
    pub async fn transactions(
        &self,
        status: Option<TransactionStatus>,
        page: Page,
    ) -> ApiResult<Paginated<TransactionFeedItem>> {
        let mut request = ApiRequest::get(endpoints::TRANSACTIONS_LIST)
            .query("skip", page.skip)
            .query("limit", page.limit);
        if let Some(status) = status {
            request = request.query("status", wire_name(&status)?);
        }
        self.send_json(&request).await
    }

    /// Confirms a pending transaction.
    pub async fn confirm_transaction(&self, id: &str) -> ApiResult<TransactionActionResponse> {
        let request = ApiRequest::post(endpoints::transaction_confirm(id));
        self.send_json(&request).await
    }

    /// Queries a transaction back to the client with a note.
    pub async fn query_transaction(
        &self,
        id: &str,
        note: &str,
    ) -> ApiResult<TransactionActionResponse> {
        self.post_json(
            &endpoints::transaction_query(id),
            &TransactionNoteRequest {
                note: note.to_string(),
            },
        )
        .await
    }

    /// Rejects a transaction with a note.
    pub async fn reject_transaction(
        &self,
        id: &str,
        note: &str,
    ) -> ApiResult<TransactionActionResponse> {
        self.post_json(
            &endpoints::transaction_reject(id),
            &TransactionNoteRequest {
                note: note.to_string(),
            },
        )
        .await
    }

    /// Pages through the authenticated client's own submission history.
    pub async fn my_history(
        &self,
        status: Option<TransactionStatus>,
        page: Page,
    ) -> ApiResult<Paginated<ClientTransactionItem>> {
        let mut request = ApiRequest::get(endpoints::TRANSACTIONS_MY_HISTORY)
            .query("skip", page.skip)
            .query("limit", page.limit);
        if let Some(status) = status {
            request = request.query("status", wire_name(&status)?);
        }
        self.send_json(&request).await
    }

    // -- Payouts ------------------------------------------------------------

    /// Requests a payout (client flow).
    pub async fn request_payout(&self, request: &PayoutRequest) -> ApiResult<PayoutResponse> {
        self.post_json(endpoints::PAYOUTS_REQUEST, request).await
    }

    /// Lists the authenticated client's payouts.
    pub async fn my_payouts(&self, page: Page) -> ApiResult<Paginated<ClientPayoutItem>> {
        let request = ApiRequest::get(endpoints::PAYOUTS_MINE)
            .query("skip", page.skip)
            .query("limit", page.limit);
        self.send_json(&request).await
    }

    /// Lists payouts across the collector's group.
    pub async fn payouts(&self, page: Page) -> ApiResult<Paginated<PayoutListItem>> {
        let request = ApiRequest::get(endpoints::PAYOUTS_LIST)
            .query("skip", page.skip)
            .query("limit", page.limit);
        self.send_json(&request).await
    }

    /// Approves a requested payout.
    pub async fn approve_payout(&self, id: &str) -> ApiResult<PayoutResponse> {
        let request = ApiRequest::post(endpoints::payout_approve(id));
        self.send_json(&request).await
    }

    /// Declines a requested payout with a reason.
    pub async fn decline_payout(&self, id: &str, reason: &str) -> ApiResult<PayoutResponse> {
        self.post_json(
            &endpoints::payout_decline(id),
            &PayoutDeclineRequest {
                reason: reason.to_string(),
            },
        )
        .await
    }

    /// Marks an approved payout as completed.
    pub async fn complete_payout(&self, id: &str) -> ApiResult<PayoutResponse> {
        let request = ApiRequest::post(endpoints::payout_complete(id));
        self.send_json(&request).await
    }

    // -- Reports ------------------------------------------------------------

    /// Fetches the monthly summary report.
    pub async fn monthly_summary(&self, year: i32, month: u32) -> ApiResult<MonthlySummary> {
        let request = ApiRequest::get(endpoints::REPORTS_MONTHLY_SUMMARY)
            .query("year", year)
            .query("month", month);
        self.send_json(&request).await
    }

    /// Downloads the monthly summary as PDF bytes.
    pub async fn monthly_summary_pdf(&self, year: i32, month: u32) -> ApiResult<Vec<u8>> {
        let request = ApiRequest::get(endpoints::REPORTS_MONTHLY_PDF)
            .query("year", year)
            .query("month", month);
        let response = self.gateway.send(&request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::transport(&err))?;
        Ok(bytes.to_vec())
    }

    /// Fetches a per-client monthly statement.
    pub async fn client_statement(
        &self,
        client_id: &str,
        year: i32,
        month: u32,
    ) -> ApiResult<ClientStatement> {
        let request = ApiRequest::get(endpoints::report_client_statement(client_id))
            .query("year", year)
            .query("month", month);
        self.send_json(&request).await
    }

    /// Checks API liveness.
    pub async fn health(&self) -> ApiResult<serde_json::Value> {
        self.get_json(endpoints::HEALTH).await
    }

    // -- Plumbing -----------------------------------------------------------

    fn persist_tokens(&self, tokens: &TokenResponse) -> ApiResult<()> {
        self.store()
            .set(CredentialPair {
                access_token: tokens.access_token.clone(),
                refresh_token: tokens.refresh_token.clone(),
            })
            .map_err(|err| ApiError::parse(format!("failed to persist credentials: {err:#}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send_json(&ApiRequest::get(path)).await
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> ApiResult<T> {
        let request = ApiRequest::post_json(path, body)?;
        self.send_json(&request).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<T> {
        let response = self.gateway.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http_status(status.as_u16(), &body));
        }
        response
            .json()
            .await
            .map_err(|err| ApiError::parse(format!("invalid response body: {err}")))
    }
}

/// Serializes an enum to its wire name for use in a query string.
fn wire_name(value: &impl serde::Serialize) -> ApiResult<String> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => Ok(s),
        Ok(other) => Err(ApiError::parse(format!(
            "expected string wire form, got {other}"
        ))),
        Err(err) => Err(ApiError::parse(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: status filters serialize to the backend's enum names.
    #[test]
    fn test_wire_name() {
        assert_eq!(
            wire_name(&TransactionStatus::AutoRejected).unwrap(),
            "AUTO_REJECTED"
        );
        assert_eq!(wire_name(&TransactionStatus::Pending).unwrap(), "PENDING");
    }

    /// Test: default page matches the frontend's window.
    #[test]
    fn test_default_page() {
        let page = Page::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 20);
    }
}
