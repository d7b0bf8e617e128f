//! Response body decoders.
//!
//! The gateway speaks two text formats: flat `key=value&...` bodies for
//! standard responses, and fixed-schema delimited records for recurring
//! result files. Both decoders normalize every value to UTF-8 via
//! [`crate::encoding::to_utf8`].

use std::collections::BTreeMap;

use crate::{
    encoding::to_utf8,
    error::{MulpayError, Result},
};

/// Decoded flat response: field name -> value, keys unique.
pub type FieldMap = BTreeMap<String, String>;

/// Number of fields per recurring result file record.
pub const RESULT_RECORD_WIDTH: usize = 15;

/// One row of a recurring result file.
///
/// Fields appear in the gateway's declared column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecurringResult {
    /// Shop identifier.
    pub shop_id: String,
    /// Recurring charge registration identifier.
    pub recurring_id: String,
    /// Order identifier.
    pub order_id: String,
    /// Date the charge was attempted.
    pub charge_date: String,
    /// Transaction status code.
    pub transaction_status: String,
    /// Charged amount.
    pub amount: String,
    /// Tax portion of the amount.
    pub tax: String,
    /// Next scheduled charge date.
    pub next_charge_date: String,
    /// Transaction access identifier.
    pub access_id: String,
    /// Transaction access password.
    pub access_pass: String,
    /// Acquirer code.
    pub acquirer_code: String,
    /// Authorization code.
    pub authorization_code: String,
    /// Provider error code, empty on success.
    pub error_code: String,
    /// Provider error detail, empty on success.
    pub error_info: String,
    /// Date the result was confirmed.
    pub confirm_date: String,
}

/// Decoded recurring result file: ordered records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultFileBatch {
    /// Records in payload order.
    pub records: Vec<RecurringResult>,
}

/// Decodes a flat `key1=value1&key2=value2` body.
///
/// Pairs are split on `&`; each pair is split on the first `=` only, so
/// values may themselves contain `=`. Later duplicates overwrite earlier
/// ones. A bare trailing key without `=` decodes to an empty value. No
/// percent-unescaping is performed; the gateway does not escape.
///
/// # Examples
///
/// ```
/// use mulpay::decode::decode_form;
///
/// let body = decode_form(b"ACS=1&ACSUrl=https://acs.example/?a=b");
/// assert_eq!(body["ACS"], "1");
/// assert_eq!(body["ACSUrl"], "https://acs.example/?a=b");
/// ```
#[must_use]
pub fn decode_form(body: &[u8]) -> FieldMap {
    let mut fields = FieldMap::new();
    for pair in body.split(|&b| b == b'&') {
        if pair.is_empty() {
            continue;
        }
        match pair.iter().position(|&b| b == b'=') {
            Some(split_at) => {
                let key = to_utf8(&pair[..split_at]);
                let value = to_utf8(&pair[split_at + 1..]);
                fields.insert(key, value);
            }
            // Bare key without '=': decoded as present-but-empty.
            None => {
                fields.insert(to_utf8(pair), String::new());
            }
        }
    }
    fields
}

/// Decodes a recurring result file body into fixed 15-field records.
///
/// The body is split on commas and CRLF line breaks into a flat token
/// sequence, surrounding quotes are stripped from each token, and tokens are
/// consumed in chunks of [`RESULT_RECORD_WIDTH`], assigned positionally.
///
/// # Errors
///
/// Returns [`MulpayError::MalformedResultFile`] when the token count is not
/// an exact multiple of the record width. Silent truncation would drop
/// charge outcomes, so a short batch is treated as corrupt.
pub fn decode_result_file(body: &[u8]) -> Result<ResultFileBatch> {
    let tokens = tokenize_result_file(body);
    if tokens.is_empty() {
        return Ok(ResultFileBatch::default());
    }
    if tokens.len() % RESULT_RECORD_WIDTH != 0 {
        return Err(MulpayError::MalformedResultFile {
            token_count: tokens.len(),
            record_width: RESULT_RECORD_WIDTH,
        });
    }

    let records = tokens
        .chunks_exact(RESULT_RECORD_WIDTH)
        .map(|row| RecurringResult {
            shop_id: row[0].clone(),
            recurring_id: row[1].clone(),
            order_id: row[2].clone(),
            charge_date: row[3].clone(),
            transaction_status: row[4].clone(),
            amount: row[5].clone(),
            tax: row[6].clone(),
            next_charge_date: row[7].clone(),
            access_id: row[8].clone(),
            access_pass: row[9].clone(),
            acquirer_code: row[10].clone(),
            authorization_code: row[11].clone(),
            error_code: row[12].clone(),
            error_info: row[13].clone(),
            confirm_date: row[14].clone(),
        })
        .collect();

    Ok(ResultFileBatch { records })
}

/// Splits a result file body on the delimiter set {`,`, CRLF} and strips
/// surrounding quotes from each token.
///
/// A trailing CRLF after the last record yields an empty trailing token,
/// which is discarded.
fn tokenize_result_file(body: &[u8]) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut index = 0;

    while index < body.len() {
        match body[index] {
            b',' => {
                tokens.push(to_utf8(&body[start..index]));
                index += 1;
                start = index;
            }
            b'\r' if body.get(index + 1) == Some(&b'\n') => {
                tokens.push(to_utf8(&body[start..index]));
                index += 2;
                start = index;
            }
            _ => index += 1,
        }
    }
    if start < body.len() {
        tokens.push(to_utf8(&body[start..]));
    }

    // Empty tokens stay: a quoted empty field ("") is a real column value.
    tokens
        .into_iter()
        .map(|token| token.trim_matches('"').to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_form_basic() {
        let body = decode_form(b"A=1&B=2");
        assert_eq!(body.len(), 2);
        assert_eq!(body["A"], "1");
        assert_eq!(body["B"], "2");
    }

    #[test]
    fn test_decode_form_last_duplicate_wins() {
        let body = decode_form(b"A=1&A=2");
        assert_eq!(body.len(), 1);
        assert_eq!(body["A"], "2");
    }

    #[test]
    fn test_decode_form_value_keeps_equals() {
        let body = decode_form(b"RedirectUrl=https://example.com/cb?x=1&Code=0");
        assert_eq!(body["RedirectUrl"], "https://example.com/cb?x=1");
        assert_eq!(body["Code"], "0");
    }

    #[test]
    fn test_decode_form_bare_trailing_key() {
        // Pinned edge case: a pair without '=' becomes an empty value.
        let body = decode_form(b"A=1&Flag");
        assert_eq!(body["A"], "1");
        assert_eq!(body["Flag"], "");
    }

    #[test]
    fn test_decode_form_empty_body() {
        assert!(decode_form(b"").is_empty());
    }

    #[test]
    fn test_decode_form_empty_value() {
        let body = decode_form(b"ErrCode=&ErrInfo=");
        assert_eq!(body["ErrCode"], "");
        assert_eq!(body["ErrInfo"], "");
    }

    #[test]
    fn test_decode_form_roundtrip() {
        // Re-encoding a decoded body reproduces it when keys are unique and
        // '='-free, which gateway responses always are.
        let original = b"AccessID=a9f2&Approve=0123456&Forward=2a99662&TranID=t-1";
        let decoded = decode_form(original);
        let reencoded: Vec<String> =
            decoded.iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(reencoded.join("&").as_bytes(), original);
    }

    #[test]
    fn test_decode_form_normalizes_shift_jis_values() {
        // "カード" in Shift_JIS as a value
        let mut raw = b"CardName=".to_vec();
        raw.extend([0x83, 0x4a, 0x81, 0x5b, 0x83, 0x68]);
        let body = decode_form(&raw);
        assert_eq!(body["CardName"], "カード");
    }

    fn sample_row(order: &str) -> String {
        format!(
            "\"shop1\",\"rec1\",\"{order}\",\"20250801\",\"0\",\"1000\",\"80\",\"20250901\",\
             \"acc\",\"pass\",\"acq\",\"auth\",\"\",\"\",\"20250802\""
        )
    }

    #[test]
    fn test_decode_result_file_two_records() {
        let body = format!("{},{}", sample_row("ord1"), sample_row("ord2"));
        let batch = decode_result_file(body.as_bytes()).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].shop_id, "shop1");
        assert_eq!(batch.records[0].order_id, "ord1");
        assert_eq!(batch.records[0].amount, "1000");
        assert_eq!(batch.records[0].error_code, "");
        assert_eq!(batch.records[1].order_id, "ord2");
        assert_eq!(batch.records[1].confirm_date, "20250802");
    }

    #[test]
    fn test_decode_result_file_crlf_delimited() {
        let body = format!("{}\r\n{}", sample_row("ord1"), sample_row("ord2"));
        let batch = decode_result_file(body.as_bytes()).unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[1].order_id, "ord2");
    }

    #[test]
    fn test_decode_result_file_trailing_crlf() {
        let body = format!("{}\r\n", sample_row("ord1"));
        let batch = decode_result_file(body.as_bytes()).unwrap();
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn test_decode_result_file_quotes_stripped() {
        let body = sample_row("ord1");
        let batch = decode_result_file(body.as_bytes()).unwrap();
        assert!(!batch.records[0].shop_id.contains('"'));
        assert_eq!(batch.records[0].access_pass, "pass");
    }

    #[test]
    fn test_decode_result_file_empty_body() {
        let batch = decode_result_file(b"").unwrap();
        assert!(batch.records.is_empty());
    }

    #[test]
    fn test_decode_result_file_partial_record_fails() {
        // Pinned redesign: ragged token counts fail instead of truncating.
        let body = format!("{},extra,tokens", sample_row("ord1"));
        let err = decode_result_file(body.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            MulpayError::MalformedResultFile { token_count: 17, record_width: 15 }
        ));
    }

    #[test]
    fn test_field_order_positional() {
        let tokens: Vec<String> = (1..=15).map(|n| n.to_string()).collect();
        let body = tokens.join(",");
        let batch = decode_result_file(body.as_bytes()).unwrap();
        let record = &batch.records[0];
        assert_eq!(record.shop_id, "1");
        assert_eq!(record.recurring_id, "2");
        assert_eq!(record.order_id, "3");
        assert_eq!(record.charge_date, "4");
        assert_eq!(record.transaction_status, "5");
        assert_eq!(record.amount, "6");
        assert_eq!(record.tax, "7");
        assert_eq!(record.next_charge_date, "8");
        assert_eq!(record.access_id, "9");
        assert_eq!(record.access_pass, "10");
        assert_eq!(record.acquirer_code, "11");
        assert_eq!(record.authorization_code, "12");
        assert_eq!(record.error_code, "13");
        assert_eq!(record.error_info, "14");
        assert_eq!(record.confirm_date, "15");
    }
}
