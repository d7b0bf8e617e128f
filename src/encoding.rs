//! Character-set normalization for gateway responses.
//!
//! The gateway answers in whatever encoding the upstream acquirer produced,
//! most commonly Shift_JIS. Every decoded value is normalized to UTF-8 before
//! it reaches the caller.

use encoding_rs::{EUC_JP, SHIFT_JIS};

/// Converts raw response bytes to UTF-8, best effort.
///
/// Decode order: valid UTF-8 is kept as-is, then Shift_JIS and EUC-JP are
/// tried, and as a last resort the bytes are decoded lossily. Never fails.
///
/// Normalizing already-canonical text is a no-op, so the conversion is
/// idempotent.
///
/// # Examples
///
/// ```
/// use mulpay::encoding::to_utf8;
///
/// assert_eq!(to_utf8(b"OrderID123"), "OrderID123");
/// // "テスト" in Shift_JIS
/// assert_eq!(to_utf8(&[0x83, 0x65, 0x83, 0x58, 0x83, 0x67]), "テスト");
/// ```
#[must_use]
pub fn to_utf8(raw: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(raw) {
        return text.to_owned();
    }

    let (decoded, _, had_errors) = SHIFT_JIS.decode(raw);
    if !had_errors {
        return decoded.into_owned();
    }

    let (decoded, _, had_errors) = EUC_JP.decode(raw);
    if !had_errors {
        return decoded.into_owned();
    }

    String::from_utf8_lossy(raw).into_owned()
}
