//! Custom assertion macros
//!
//! Assertions over `axum_test::TestResponse` values returned by [`TestApp`](super::TestApp).

/// Assert a response status, printing the body on mismatch
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status_code(),
            $status,
            "unexpected status, body: {}",
            $response.text()
        );
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that an error response carries a message containing `needle`
#[macro_export]
macro_rules! assert_error_contains {
    ($response:expr, $needle:expr) => {
        let message = $crate::common::ResponseExt::json_body(&$response)["error"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        $crate::assert_contains!(message, $needle);
    };
}
