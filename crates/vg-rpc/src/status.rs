//! Translation of gRPC statuses into gateway errors.

use tonic::{Code, Status};

/// HTTP status a forwarded call should answer with for a gRPC `code`.
pub fn http_status_for(code: Code) -> u16 {
    match code {
        Code::Ok => 200,
        Code::InvalidArgument | Code::OutOfRange | Code::FailedPrecondition => 400,
        Code::Unauthenticated => 401,
        Code::PermissionDenied => 403,
        Code::NotFound => 404,
        Code::AlreadyExists | Code::Aborted => 409,
        Code::ResourceExhausted => 429,
        Code::Cancelled => 499,
        Code::Unimplemented => 501,
        Code::Unavailable => 503,
        Code::DeadlineExceeded => 504,
        // Unknown, Internal, DataLoss
        _ => 502,
    }
}

/// Convert a failed forwarded call into [`vg_core::Error::Backend`].
pub fn status_to_error(status: Status) -> vg_core::Error {
    vg_core::Error::Backend {
        status: http_status_for(status.code()),
        message: status.message().to_string(),
    }
}
