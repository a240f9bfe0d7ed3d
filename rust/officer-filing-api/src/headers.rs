//! Names of the gateway headers the service reads.

/// Caller's access token, forwarded verbatim to the transaction service.
pub const PASSTHROUGH_TOKEN: &str = "ERIC-Access-Token";

/// Scope and permissions the gateway resolved for the caller's token, e.g.
/// `company_number=12345678 company_officers=create,delete,update,readprotected`.
pub const TOKEN_PERMISSIONS: &str = "ERIC-Authorised-Token-Permissions";
