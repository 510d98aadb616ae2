//! Wire models for the SusuPay REST API.
//!
//! Monetary amounts arrive as decimal strings (the backend serializes
//! `Decimal` that way) and are kept as strings; amounts sent to the backend
//! are plain numbers. Timestamps and dates stay in their ISO-8601 wire form.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Common
// ---------------------------------------------------------------------------

/// Offset-paginated listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpPurpose {
    Register,
    Login,
    Reset,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpSendRequest {
    pub phone: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpSendResponse {
    pub message: String,
    /// Present only on non-production backends.
    #[serde(default)]
    pub debug_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpVerifyRequest {
    pub phone: String,
    pub code: String,
    pub purpose: OtpPurpose,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OtpVerifyResponse {
    pub verification_token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectorRegisterRequest {
    pub full_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorRegisterResponse {
    pub message: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectorSetPinRequest {
    pub verification_token: String,
    pub pin: String,
    pub pin_confirm: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSetPinResponse {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionFrequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectorSetMomoRequest {
    pub verification_token: String,
    pub momo_number: String,
    pub contribution_amount: f64,
    pub contribution_frequency: ContributionFrequency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorSetMomoResponse {
    pub message: String,
    pub collector_id: String,
    pub invite_code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectorLoginRequest {
    pub phone: String,
    pub pin: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectorResetPinRequest {
    pub verification_token: String,
    pub new_pin: String,
    pub new_pin_confirm: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientLoginRequest {
    pub phone: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientJoinRequest {
    pub invite_code: String,
    pub full_name: String,
    pub phone: String,
}

/// Credential pair as issued by login, join, and refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InviteInfoResponse {
    pub collector_name: String,
    pub invite_code: String,
}

// ---------------------------------------------------------------------------
// Collectors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorProfile {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub momo_number: Option<String>,
    pub invite_code: String,
    pub cycle_start_date: Option<String>,
    pub payout_interval_days: u32,
    pub contribution_amount: String,
    pub contribution_frequency: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectorUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub momo_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout_interval_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contribution_frequency: Option<ContributionFrequency>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorDashboard {
    pub collector_id: String,
    pub total_clients: u64,
    pub active_clients: u64,
    pub pending_transactions: u64,
    pub total_confirmed_today: u64,
    pub next_payout_client: Option<String>,
    pub next_payout_date: Option<String>,
    pub contribution_amount: String,
    pub contribution_frequency: String,
    pub period_label: String,
    pub paid_count: u64,
    pub partial_count: u64,
    pub unpaid_count: u64,
    pub amount_collected: String,
    pub amount_expected: String,
    pub collection_rate: f64,
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ClientProfile {
    pub id: String,
    pub collector_id: String,
    pub full_name: String,
    pub phone: String,
    pub daily_amount: String,
    pub is_active: bool,
    pub joined_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientBalance {
    pub client_id: String,
    pub full_name: String,
    pub total_deposits: String,
    pub total_payouts: String,
    pub balance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientListItem {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub daily_amount: String,
    pub is_active: bool,
    pub joined_at: String,
    pub balance: String,
    pub payout_position: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupMemberItem {
    pub id: String,
    pub full_name: String,
    pub daily_amount: String,
    pub total_deposits: String,
    pub transaction_count: u64,
    pub balance: String,
    pub payout_position: Option<u32>,
    pub payout_date: Option<String>,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionType {
    SmsText,
    Screenshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrustLevel {
    High,
    Medium,
    Low,
    AutoRejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Queried,
    Rejected,
    AutoRejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParseConfidence {
    High,
    Partial,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmsSubmitRequest {
    pub client_id: String,
    pub sms_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSmsSubmitRequest {
    pub sms_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedSms {
    pub amount: Option<f64>,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
    pub transaction_id: Option<String>,
    pub transaction_date: Option<String>,
    pub confidence: ParseConfidence,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidationFlag {
    pub check: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub trust_level: TrustLevel,
    pub validation_flags: Vec<ValidationFlag>,
    pub parsed: ParsedSms,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionFeedItem {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub amount: String,
    pub submission_type: SubmissionType,
    pub trust_level: TrustLevel,
    pub status: TransactionStatus,
    pub validation_flags: Vec<ValidationFlag>,
    pub submitted_at: String,
    pub confirmed_at: Option<String>,
    pub collector_note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionNoteRequest {
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionActionResponse {
    pub transaction_id: String,
    pub status: TransactionStatus,
    pub confirmed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientTransactionItem {
    pub id: String,
    pub amount: String,
    pub status: TransactionStatus,
    pub trust_level: TrustLevel,
    pub submitted_at: String,
    pub confirmed_at: Option<String>,
    pub collector_note: Option<String>,
}

// ---------------------------------------------------------------------------
// Payouts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutType {
    Scheduled,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayoutStatus {
    Requested,
    Approved,
    Declined,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayoutRequest {
    pub amount: f64,
    pub payout_type: PayoutType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PayoutDeclineRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayoutResponse {
    pub id: String,
    pub collector_id: String,
    pub client_id: String,
    pub amount: String,
    pub payout_type: PayoutType,
    pub status: PayoutStatus,
    pub reason: Option<String>,
    pub requested_at: String,
    pub approved_at: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayoutListItem {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub amount: String,
    pub payout_type: PayoutType,
    pub status: PayoutStatus,
    pub reason: Option<String>,
    pub requested_at: String,
    pub approved_at: Option<String>,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientPayoutItem {
    pub id: String,
    pub amount: String,
    pub payout_type: PayoutType,
    pub status: PayoutStatus,
    pub reason: Option<String>,
    pub requested_at: String,
    pub approved_at: Option<String>,
    pub completed_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSummaryItem {
    pub client_id: String,
    pub client_name: String,
    pub total_deposits: String,
    pub deposit_count: u64,
    pub total_payouts: String,
    pub payout_count: u64,
    pub net_balance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_deposits: String,
    pub total_payouts: String,
    pub net_balance: String,
    pub client_count: u64,
    pub clients: Vec<ClientSummaryItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatementEntryType {
    Deposit,
    Payout,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientStatementItem {
    pub date: String,
    #[serde(rename = "type")]
    pub entry_type: StatementEntryType,
    pub description: String,
    pub amount: String,
    pub running_balance: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientStatement {
    pub client_name: String,
    pub year: i32,
    pub month: u32,
    pub opening_balance: String,
    pub closing_balance: String,
    pub items: Vec<ClientStatementItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: enums serialize in the backend's SCREAMING_SNAKE_CASE form.
    #[test]
    fn test_enum_wire_form() {
        assert_eq!(
            serde_json::to_string(&OtpPurpose::Register).unwrap(),
            r#""REGISTER""#
        );
        assert_eq!(
            serde_json::to_string(&SubmissionType::SmsText).unwrap(),
            r#""SMS_TEXT""#
        );
        assert_eq!(
            serde_json::to_string(&TrustLevel::AutoRejected).unwrap(),
            r#""AUTO_REJECTED""#
        );
        assert_eq!(
            serde_json::from_str::<PayoutStatus>(r#""DECLINED""#).unwrap(),
            PayoutStatus::Declined
        );
    }

    /// Test: optional request fields are omitted, not serialized as null.
    #[test]
    fn test_update_request_skips_unset_fields() {
        let update = CollectorUpdateRequest {
            payout_interval_days: Some(7),
            ..CollectorUpdateRequest::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "payout_interval_days": 7 }));
    }

    /// Test: a feed item deserializes from a representative backend payload.
    #[test]
    fn test_feed_item_from_backend_payload() {
        let payload = serde_json::json!({
            "id": "t-1",
            "client_id": "c-1",
            "client_name": "Ama Mensah",
            "amount": "25.00",
            "submission_type": "SMS_TEXT",
            "trust_level": "HIGH",
            "status": "PENDING",
            "validation_flags": [
                { "check": "amount_matches", "passed": true, "detail": "25.00 == 25.00" }
            ],
            "submitted_at": "2026-03-02T09:15:00Z",
            "confirmed_at": null,
            "collector_note": null
        });

        let item: TransactionFeedItem = serde_json::from_value(payload).unwrap();
        assert_eq!(item.trust_level, TrustLevel::High);
        assert_eq!(item.status, TransactionStatus::Pending);
        assert_eq!(item.validation_flags.len(), 1);
        assert!(item.confirmed_at.is_none());
    }

    /// Test: statement entries map the reserved `type` field.
    #[test]
    fn test_statement_entry_type_field() {
        let payload = serde_json::json!({
            "date": "2026-03-01",
            "type": "DEPOSIT",
            "description": "Daily contribution",
            "amount": "10.00",
            "running_balance": "310.00"
        });
        let item: ClientStatementItem = serde_json::from_value(payload).unwrap();
        assert_eq!(item.entry_type, StatementEntryType::Deposit);
    }
}
