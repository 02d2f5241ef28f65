// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Saudi mobile number formatting.
//!
//! The backend expects `966XXXXXXXXX`. Agents type numbers in whatever
//! form they are used to, so input is normalized before it is sent.

const COUNTRY_CODE: &str = "966";

fn digits_only(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Normalizes a phone number to `966XXXXXXXXX`.
///
/// Accepts `966…`, `00966…`, `+966…`, `05…` and `5…`. Anything else is
/// still prefixed with the country code and left for the backend to
/// reject.
#[must_use]
pub fn format_phone_for_api(phone: &str) -> String {
    let digits: String = digits_only(phone);
    let cleaned: &str = digits.trim_start_matches('0');

    if cleaned.starts_with(COUNTRY_CODE) {
        cleaned.to_string()
    } else {
        format!("{COUNTRY_CODE}{cleaned}")
    }
}

/// Formats `966XXXXXXXXX` as `+966 XXX XXX XXX`. Other input is returned as-is.
#[must_use]
pub fn format_phone_for_display(phone: &str) -> String {
    let digits: String = digits_only(phone);
    if digits.len() == 12 && digits.starts_with(COUNTRY_CODE) {
        format!(
            "+{} {} {} {}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..12]
        )
    } else {
        phone.to_string()
    }
}

/// True for `966` followed by a nine-digit mobile number starting with 5.
#[must_use]
pub fn is_valid_saudi_phone(phone: &str) -> bool {
    let digits: String = digits_only(phone);
    digits.len() == 12 && digits.starts_with("9665")
}
