//! Exchange rate provider error codes.
//!
//! The provider signals failures either through the transport status or
//! through an integer embedded in the JSON body. Both share this table, and
//! the table, not the transport status, decides whether a response failed:
//! a `200 OK` carrying code `202` is still a failure.

/// Known provider codes and their descriptions.
pub const PROVIDER_ERROR_CODES: &[(u16, &str)] = &[
    (401, "You have not supplied a valid API Access Key."),
    (404, "The requested resource does not exist."),
    (
        429,
        "Your monthly usage limit has been reached. Please upgrade your Subscription Plan.",
    ),
    (
        101,
        "No API Key was specified or an invalid API Key was specified.",
    ),
    (102, "The account this API request is coming from is inactive."),
    (103, "The requested API endpoint does not exist."),
    (
        104,
        "The maximum allowed API amount of monthly API requests has been reached.",
    ),
    (
        105,
        "The current subscription plan does not support this API endpoint.",
    ),
    (106, "The current request did not return any results."),
    (201, "An invalid base currency has been entered."),
    (202, "One or more invalid symbols have been specified."),
    (301, "No date has been specified."),
    (302, "An invalid date has been specified."),
    (403, "No or an invalid amount has been specified."),
    (501, "No or an invalid timeframe has been specified."),
    (502, "No or an invalid \"start_date\" has been specified."),
    (503, "No or an invalid \"end_date\" has been specified."),
    (504, "An invalid timeframe has been specified."),
    (
        505,
        "The specified timeframe is too long, exceeding 365 days.",
    ),
];

/// Code used when the rates endpoint omits a symbol the symbols endpoint accepted.
pub const INVALID_SYMBOLS: u16 = 202;

/// Description used for unsuccessful responses whose status is not in the table.
pub const UNSUCCESSFUL_RESPONSE: &str =
    "Did not get a success response from the exchange rate provider.";

/// A response classified as failed by the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderFailure {
    pub code: u16,
    pub description: &'static str,
}

/// Returns the description for a known provider code.
pub fn describe(code: u16) -> Option<&'static str> {
    PROVIDER_ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, description)| *description)
}

/// Classifies a provider response.
///
/// The transport status is checked first, then the code embedded in the body.
pub fn classify(status: u16, embedded_code: Option<u16>) -> Option<ProviderFailure> {
    std::iter::once(status)
        .chain(embedded_code)
        .find_map(|code| describe(code).map(|description| ProviderFailure { code, description }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_every_documented_code() {
        let codes: Vec<u16> = PROVIDER_ERROR_CODES.iter().map(|(c, _)| *c).collect();
        for code in [
            401, 404, 429, 101, 102, 103, 104, 105, 106, 201, 202, 301, 302, 403, 501, 502, 503,
            504, 505,
        ] {
            assert!(codes.contains(&code), "missing code {code}");
        }
        assert_eq!(codes.len(), 19);
    }

    #[test]
    fn test_success_status_is_not_classified() {
        assert_eq!(classify(200, None), None);
        assert_eq!(classify(304, None), None);
    }

    #[test]
    fn test_embedded_code_overrides_transport_success() {
        let failure = classify(200, Some(202)).unwrap();
        assert_eq!(failure.code, 202);
        assert_eq!(
            failure.description,
            "One or more invalid symbols have been specified."
        );
    }

    #[test]
    fn test_transport_status_checked_first() {
        let failure = classify(401, Some(104)).unwrap();
        assert_eq!(failure.code, 401);
    }

    #[test]
    fn test_colliding_success_status_is_a_failure() {
        // 202 Accepted collides with "invalid symbols".
        assert_eq!(classify(202, None).map(|f| f.code), Some(202));
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(describe(500), None);
        assert_eq!(classify(500, Some(999)), None);
    }
}
