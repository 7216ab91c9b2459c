pub mod auth;
pub mod context;
pub mod envelope;
pub mod timestamp;
pub mod upload;

pub use auth::{require_bearer, AuthUser};
pub use context::{capture_context, ContentKind, Credentials, RequestContext, WriteKind};
pub use envelope::{wrap_paginated, StagedResult, TOTAL_COUNT_HEADER};
pub use timestamp::stamp_json_writes;
pub use upload::require_multipart;
