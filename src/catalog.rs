//! Method catalogs for the gateway's product variants.
//!
//! The original gateway SDKs model each product variant (shop, site,
//! shop-and-site, remittance) as a class hierarchy with mixed-in method
//! sets. Here a variant is plain data: a table of permitted operations, each
//! carrying its endpoint path, verb, and required fields. Binding a catalog
//! to a client gives that client its set of callable methods and nothing
//! else.
//!
//! The built-in catalogs carry a representative method set; deployments with
//! contracted extensions can load a full table from TOML instead.

use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    config::validate_path_segment,
    error::{MulpayError, Result},
    transport::Verb,
};

/// One permitted gateway operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiMethod {
    /// Endpoint path. Relative paths (e.g. `EntryTran.idPass`) are placed
    /// under the configured namespace prefix; absolute paths (e.g.
    /// `/remittance/CreateAccount.idPass`) are used verbatim.
    pub path: String,
    /// Fixed HTTP verb for this call site.
    pub verb: Verb,
    /// Symbolic argument names that must be present before dispatch.
    #[serde(default)]
    pub required: Vec<String>,
}

/// A named bundle of permitted operations for one product variant.
#[derive(Debug, Clone)]
pub struct MethodCatalog {
    name: &'static str,
    methods: HashMap<String, ApiMethod>,
}

/// TOML shape for a loadable catalog.
#[derive(Debug, Deserialize)]
struct CatalogConfig {
    methods: HashMap<String, ApiMethod>,
}

impl MethodCatalog {
    /// Looks up a method by symbolic name.
    ///
    /// # Errors
    ///
    /// Returns [`MulpayError::UnknownApiMethod`] when the name is not bound
    /// in this catalog.
    pub fn resolve(&self, method: &str) -> Result<&ApiMethod> {
        self.methods
            .get(method)
            .ok_or_else(|| MulpayError::UnknownApiMethod(method.to_owned()))
    }

    /// Returns the catalog's variant name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the number of bound methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true when no methods are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    /// Loads a custom catalog from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`MulpayError::ConfigError`] if the TOML is invalid or an
    /// absolute method path fails validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use mulpay::catalog::MethodCatalog;
    ///
    /// let toml = r#"
    ///     [methods.entry_tran]
    ///     path = "EntryTran.idPass"
    ///     verb = "post"
    ///     required = ["order_id", "job_cd"]
    /// "#;
    ///
    /// let catalog = MethodCatalog::from_toml(toml).unwrap();
    /// assert!(catalog.resolve("entry_tran").is_ok());
    /// ```
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(toml)
            .map_err(|e| MulpayError::ConfigError(format!("invalid catalog TOML: {e}")))?;
        for (name, method) in &config.methods {
            if method.path.is_empty() {
                return Err(MulpayError::ConfigError(format!("method '{name}' has empty path")));
            }
            if method.path.starts_with('/') {
                validate_path_segment(name, &method.path)?;
            }
        }
        Ok(Self { name: "custom", methods: config.methods })
    }

    /// Credit-card shop API: transaction entry, execution, and maintenance.
    #[must_use]
    pub fn shop() -> Self {
        Self::build(
            "shop",
            &[
                ("entry_tran", "EntryTran.idPass", Verb::Post, &["order_id", "job_cd"]),
                ("exec_tran", "ExecTran.idPass", Verb::Post, &[
                    "access_id",
                    "access_pass",
                    "order_id",
                ]),
                ("alter_tran", "AlterTran.idPass", Verb::Post, &[
                    "access_id",
                    "access_pass",
                    "job_cd",
                ]),
                ("change_tran", "ChangeTran.idPass", Verb::Post, &[
                    "access_id",
                    "access_pass",
                    "job_cd",
                    "amount",
                ]),
                ("search_trade", "SearchTrade.idPass", Verb::Post, &["order_id"]),
                ("secure_tran", "SecureTran.idPass", Verb::Post, &["pa_res", "md"]),
            ],
        )
    }

    /// Member-site API: stored members and cards, member-backed payments.
    #[must_use]
    pub fn site() -> Self {
        Self::build(
            "site",
            &[
                ("save_member", "SaveMember.idPass", Verb::Post, &["member_id"]),
                ("update_member", "UpdateMember.idPass", Verb::Post, &["member_id"]),
                ("delete_member", "DeleteMember.idPass", Verb::Post, &["member_id"]),
                ("search_member", "SearchMember.idPass", Verb::Post, &["member_id"]),
                ("save_card", "SaveCard.idPass", Verb::Post, &["member_id", "card_no", "expire"]),
                ("delete_card", "DeleteCard.idPass", Verb::Post, &["member_id", "card_seq"]),
                ("search_card", "SearchCard.idPass", Verb::Post, &["member_id", "seq_mode"]),
                ("exec_tran", "ExecTran.idPass", Verb::Post, &[
                    "access_id",
                    "access_pass",
                    "order_id",
                    "member_id",
                ]),
            ],
        )
    }

    /// Combined shop-and-site API: member card trades and recurring charges.
    #[must_use]
    pub fn shop_and_site() -> Self {
        Self::build(
            "shop_and_site",
            &[
                ("trade_card", "TradedCard.idPass", Verb::Post, &["order_id", "member_id"]),
                ("register_recurring_credit", "RegisterRecurringCredit.idPass", Verb::Post, &[
                    "recurring_id",
                    "amount",
                    "charge_day",
                ]),
                ("unregister_recurring", "UnregisterRecurring.idPass", Verb::Post, &[
                    "recurring_id",
                ]),
                ("search_recurring_result", "SearchRecurringResult.idPass", Verb::Post, &[
                    "recurring_id",
                ]),
                ("search_recurring_result_file", "SearchRecurringResultFile.idPass", Verb::Post, &[
                    "charge_date",
                ]),
            ],
        )
    }

    /// Remittance API. Paths are absolute: remittance lives outside the
    /// `/payment` namespace.
    #[must_use]
    pub fn remittance() -> Self {
        Self::build(
            "remittance",
            &[
                ("create_account", "/remittance/CreateAccount.idPass", Verb::Post, &[
                    "bank_id",
                    "bank_code",
                    "branch_code",
                    "account_type",
                    "account_number",
                    "account_name",
                ]),
                ("update_account", "/remittance/UpdateAccount.idPass", Verb::Post, &["bank_id"]),
                ("delete_account", "/remittance/DeleteAccount.idPass", Verb::Post, &["bank_id"]),
                ("create_deposit", "/remittance/CreateDeposit.idPass", Verb::Post, &[
                    "deposit_id",
                    "bank_id",
                    "amount",
                ]),
                ("cancel_deposit", "/remittance/CancelDeposit.idPass", Verb::Post, &[
                    "deposit_id",
                    "bank_id",
                ]),
                ("search_deposit", "/remittance/SearchDeposit.idPass", Verb::Post, &[
                    "deposit_id",
                ]),
                ("search_balance", "/remittance/SearchBalance.idPass", Verb::Post, &[]),
            ],
        )
    }

    fn build(name: &'static str, methods: &[(&str, &str, Verb, &[&str])]) -> Self {
        let methods = methods
            .iter()
            .map(|(method, path, verb, required)| {
                (
                    (*method).to_owned(),
                    ApiMethod {
                        path: (*path).to_owned(),
                        verb: *verb,
                        required: required.iter().map(|f| (*f).to_owned()).collect(),
                    },
                )
            })
            .collect();
        Self { name, methods }
    }
}
