//! Parameter mapping between symbolic option names and provider field names.
//!
//! Callers pass snake_case symbolic names (`order_id`, `job_cd`); the gateway
//! expects its own field names (`OrderID`, `JobCd`). The table is process-wide
//! and read-only after initialization.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    sync::LazyLock,
};

/// Ordered caller-supplied arguments, symbolic names as keys.
pub type ParamMap = BTreeMap<String, String>;

/// Symbolic option name -> provider field name.
///
/// Covers the request parameters of the shop, site, shop-and-site, and
/// remittance method sets.
static INPUT_PARAMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("access_id", "AccessID"),
        ("access_pass", "AccessPass"),
        ("account_name", "AccountName"),
        ("account_number", "AccountNumber"),
        ("account_type", "AccountType"),
        ("amount", "Amount"),
        ("bank_code", "BankCode"),
        ("bank_id", "BankID"),
        ("branch_code", "BranchCode"),
        ("card_name", "CardName"),
        ("card_no", "CardNo"),
        ("card_pass", "CardPass"),
        ("card_seq", "CardSeq"),
        ("charge_date", "ChargeDate"),
        ("charge_day", "ChargeDay"),
        ("charge_month", "ChargeMonth"),
        ("charge_start_date", "ChargeStartDate"),
        ("charge_stop_date", "ChargeStopDate"),
        ("client_field_1", "ClientField1"),
        ("client_field_2", "ClientField2"),
        ("client_field_3", "ClientField3"),
        ("continuance_month", "ContinuanceMonth"),
        ("default_flag", "DefaultFlag"),
        ("delete_flag", "DeleteFlag"),
        ("deposit_id", "DepositID"),
        ("device_category", "DeviceCategory"),
        ("expire", "Expire"),
        ("holder_name", "HolderName"),
        ("http_accept", "HttpAccept"),
        ("http_user_agent", "HttpUserAgent"),
        ("job_cd", "JobCd"),
        ("last_month_free_flag", "LastMonthFreeFlag"),
        ("md", "MD"),
        ("member_id", "MemberID"),
        ("member_name", "MemberName"),
        ("method", "Method"),
        ("order_id", "OrderID"),
        ("pa_res", "PaRes"),
        ("pay_times", "PayTimes"),
        ("recurring_id", "RecurringID"),
        ("regist_type", "RegistType"),
        ("security_code", "SecurityCode"),
        ("select_key", "SelectKey"),
        ("seq_mode", "SeqMode"),
        ("shop_id", "ShopID"),
        ("shop_pass", "ShopPass"),
        ("site_id", "SiteID"),
        ("site_pass", "SitePass"),
        ("td_flag", "TdFlag"),
        ("td_tenant_name", "TdTenantName"),
        ("token", "Token"),
    ])
});

/// Maps a symbolic option name to the gateway field name.
///
/// Unmapped names pass through unchanged, so catalog extensions can carry
/// provider field names directly.
#[must_use]
pub fn provider_field_name(symbolic: &str) -> Cow<'_, str> {
    INPUT_PARAMS
        .get(symbolic)
        .map_or(Cow::Borrowed(symbolic), |name| Cow::Borrowed(*name))
}

/// Translates a full argument map to gateway field names.
///
/// Pure transform; values are untouched and entry count is preserved.
#[must_use]
pub fn to_provider_params(args: &ParamMap) -> ParamMap {
    args.iter()
        .map(|(key, value)| (provider_field_name(key).into_owned(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names_mapped() {
        assert_eq!(provider_field_name("order_id"), "OrderID");
        assert_eq!(provider_field_name("job_cd"), "JobCd");
        assert_eq!(provider_field_name("access_pass"), "AccessPass");
        assert_eq!(provider_field_name("bank_id"), "BankID");
    }

    #[test]
    fn test_unmapped_names_pass_through() {
        // Pinned policy: unknown keys are forwarded unchanged, not dropped.
        assert_eq!(provider_field_name("NotInTheTable"), "NotInTheTable");
        assert_eq!(provider_field_name(""), "");
    }

    #[test]
    fn test_map_preserves_values_and_count() {
        let mut args = ParamMap::new();
        args.insert("order_id".to_owned(), "ord-1".to_owned());
        args.insert("amount".to_owned(), "1000".to_owned());
        args.insert("custom".to_owned(), "x".to_owned());

        let mapped = to_provider_params(&args);
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped["OrderID"], "ord-1");
        assert_eq!(mapped["Amount"], "1000");
        assert_eq!(mapped["custom"], "x");
    }

    #[test]
    fn test_map_is_pure() {
        let mut args = ParamMap::new();
        args.insert("member_id".to_owned(), "m-9".to_owned());
        let before = args.clone();
        let _ = to_provider_params(&args);
        assert_eq!(args, before);
    }

    #[test]
    fn test_table_has_no_duplicate_targets_for_core_fields() {
        let mut seen = std::collections::HashSet::new();
        for target in INPUT_PARAMS.values() {
            assert!(seen.insert(*target), "duplicate provider field {target}");
        }
    }
}
