//! REST endpoint catalog.
//!
//! Paths mirror the backend contract exactly; parameterized paths are
//! builder functions. The gateway compares against [`AUTH_REFRESH`] to
//! guarantee a 401 from the refresh call itself never triggers recovery.

const BASE: &str = "/api/v1";

// Auth
pub const AUTH_OTP_SEND: &str = "/api/v1/auth/otp/send";
pub const AUTH_OTP_VERIFY: &str = "/api/v1/auth/otp/verify";
pub const AUTH_COLLECTOR_REGISTER: &str = "/api/v1/auth/collector/register";
pub const AUTH_COLLECTOR_SET_PIN: &str = "/api/v1/auth/collector/set-pin";
pub const AUTH_COLLECTOR_SET_MOMO: &str = "/api/v1/auth/collector/set-momo";
pub const AUTH_COLLECTOR_LOGIN: &str = "/api/v1/auth/collector/login";
pub const AUTH_COLLECTOR_RESET_PIN: &str = "/api/v1/auth/collector/reset-pin";
pub const AUTH_CLIENT_JOIN: &str = "/api/v1/auth/client/join";
pub const AUTH_CLIENT_LOGIN: &str = "/api/v1/auth/client/login";
pub const AUTH_REFRESH: &str = "/api/v1/auth/refresh";

pub fn auth_invite_info(code: &str) -> String {
    format!("{BASE}/auth/invite/{code}")
}

// Collectors
pub const COLLECTORS_ME: &str = "/api/v1/collectors/me";
pub const COLLECTORS_DASHBOARD: &str = "/api/v1/collectors/me/dashboard";
pub const COLLECTORS_CLIENTS: &str = "/api/v1/collectors/me/clients";

pub fn collectors_client(id: &str) -> String {
    format!("{BASE}/collectors/me/clients/{id}")
}

// Clients
pub const CLIENTS_ME: &str = "/api/v1/clients/me";
pub const CLIENTS_BALANCE: &str = "/api/v1/clients/me/balance";
pub const CLIENTS_GROUP: &str = "/api/v1/clients/me/group";

pub fn clients_member_history(id: &str) -> String {
    format!("{BASE}/clients/me/group/{id}/history")
}

// Transactions
pub const TRANSACTIONS_SUBMIT_SMS: &str = "/api/v1/transactions/submit/sms";
pub const TRANSACTIONS_SUBMIT_SCREENSHOT: &str = "/api/v1/transactions/submit/screenshot";
pub const TRANSACTIONS_CLIENT_SUBMIT_SMS: &str = "/api/v1/transactions/client/submit/sms";
pub const TRANSACTIONS_CLIENT_SUBMIT_SCREENSHOT: &str =
    "/api/v1/transactions/client/submit/screenshot";
pub const TRANSACTIONS_FEED: &str = "/api/v1/transactions/feed";
pub const TRANSACTIONS_LIST: &str = "/api/v1/transactions";
pub const TRANSACTIONS_MY_HISTORY: &str = "/api/v1/transactions/my-history";

pub fn transaction_confirm(id: &str) -> String {
    format!("{BASE}/transactions/{id}/confirm")
}

pub fn transaction_query(id: &str) -> String {
    format!("{BASE}/transactions/{id}/query")
}

pub fn transaction_reject(id: &str) -> String {
    format!("{BASE}/transactions/{id}/reject")
}

// Payouts
pub const PAYOUTS_REQUEST: &str = "/api/v1/payouts/request";
pub const PAYOUTS_MINE: &str = "/api/v1/payouts/my-payouts";
pub const PAYOUTS_LIST: &str = "/api/v1/payouts";

pub fn payout_approve(id: &str) -> String {
    format!("{BASE}/payouts/{id}/approve")
}

pub fn payout_decline(id: &str) -> String {
    format!("{BASE}/payouts/{id}/decline")
}

pub fn payout_complete(id: &str) -> String {
    format!("{BASE}/payouts/{id}/complete")
}

// Reports
pub const REPORTS_MONTHLY_SUMMARY: &str = "/api/v1/reports/monthly-summary";
pub const REPORTS_MONTHLY_PDF: &str = "/api/v1/reports/monthly-summary/pdf";

pub fn report_client_statement(id: &str) -> String {
    format!("{BASE}/reports/client-statement/{id}")
}

pub const HEALTH: &str = "/api/v1/health";

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: parameterized paths interpolate under the versioned base.
    #[test]
    fn test_parameterized_paths() {
        assert_eq!(auth_invite_info("AB12"), "/api/v1/auth/invite/AB12");
        assert_eq!(
            collectors_client("c-1"),
            "/api/v1/collectors/me/clients/c-1"
        );
        assert_eq!(
            clients_member_history("m-2"),
            "/api/v1/clients/me/group/m-2/history"
        );
        assert_eq!(
            transaction_confirm("t-3"),
            "/api/v1/transactions/t-3/confirm"
        );
        assert_eq!(payout_decline("p-4"), "/api/v1/payouts/p-4/decline");
        assert_eq!(
            report_client_statement("c-5"),
            "/api/v1/reports/client-statement/c-5"
        );
    }

    /// Test: constants share the versioned base path.
    #[test]
    fn test_constants_are_versioned() {
        for path in [
            AUTH_REFRESH,
            COLLECTORS_DASHBOARD,
            CLIENTS_BALANCE,
            TRANSACTIONS_FEED,
            PAYOUTS_LIST,
            REPORTS_MONTHLY_PDF,
            HEALTH,
        ] {
            assert!(path.starts_with(BASE), "unversioned path: {path}");
        }
    }
}
