#[macro_export]
macro_rules! status_with_error_log {
    ($status_code:expr) => {
        |e| {
            use log::error;

            error!("{}", e);
            $status_code
        }
    };

    ($position:expr, $status_code:expr) => {
        |e| {
            use log::error;

            error!("{}: {}", $position, e);
            $status_code
        }
    };
}

#[macro_export]
macro_rules! internal_error_with_log {
    () => {{
        use axum::http::StatusCode;
        $crate::status_with_error_log!(StatusCode::INTERNAL_SERVER_ERROR)
    }};

    ($msg:expr) => {{
        use axum::http::StatusCode;
        $crate::status_with_error_log!($msg, StatusCode::INTERNAL_SERVER_ERROR)
    }};
}

#[macro_export]
macro_rules! bad_request_with_log {
    () => {{
        use axum::http::StatusCode;
        $crate::status_with_error_log!(StatusCode::BAD_REQUEST)
    }};

    ($msg:expr) => {{
        use axum::http::StatusCode;
        $crate::status_with_error_log!($msg, StatusCode::BAD_REQUEST)
    }};
}

#[macro_export]
macro_rules! bad_gateway_with_log {
    () => {{
        use axum::http::StatusCode;
        $crate::status_with_error_log!(StatusCode::BAD_GATEWAY)
    }};

    ($msg:expr) => {{
        use axum::http::StatusCode;
        $crate::status_with_error_log!($msg, StatusCode::BAD_GATEWAY)
    }};
}

pub use bad_gateway_with_log;
pub use bad_request_with_log;
pub use internal_error_with_log;
pub use status_with_error_log;
