use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::{FilingResource, PermissionScope, TokenPermissions, Transaction};

/// Path variable naming the transaction.
pub const TRANSACTION_ID: &str = "transaction_id";
/// Path variable naming the filing.
pub const FILING_ID: &str = "filing_id";

/// Everything the gates know about one request.
///
/// Built from the inbound request, then enriched by gates as they admit it:
/// the transaction gate attaches the [`Transaction`], the filing gate the
/// [`FilingResource`]. A context is owned by exactly one request.
#[derive(Default, Clone)]
pub struct RequestContext {
    transaction_id: Option<String>,
    filing_id: Option<String>,
    passthrough_token: Option<String>,
    scope: Option<String>,
    permissions: Option<Arc<dyn TokenPermissions>>,
    transaction: Option<Transaction>,
    filing: Option<FilingResource>,
}

impl Debug for RequestContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("transaction_id", &self.transaction_id)
            .field("filing_id", &self.filing_id)
            .field("scope", &self.scope)
            .field("has_permissions", &self.permissions.is_some())
            .field("transaction", &self.transaction)
            .field("filing", &self.filing)
            .finish_non_exhaustive()
    }
}

impl RequestContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the transaction path variable.
    pub fn with_transaction_id(mut self, transaction_id: impl Into<String>) -> Self {
        self.transaction_id = Some(transaction_id.into());
        self
    }

    /// Bind the filing path variable.
    pub fn with_filing_id(mut self, filing_id: impl Into<String>) -> Self {
        self.filing_id = Some(filing_id.into());
        self
    }

    /// Set the passthrough token forwarded to the transaction service.
    pub fn with_passthrough_token(mut self, token: impl Into<String>) -> Self {
        self.passthrough_token = Some(token.into());
        self
    }

    /// Set the raw token permissions scope header.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Attach the capability-query object resolved upstream.
    pub fn with_permissions(mut self, permissions: Arc<dyn TokenPermissions>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// The transaction path variable.
    pub fn transaction_id(&self) -> Option<&str> {
        self.transaction_id.as_deref()
    }

    /// The filing path variable.
    pub fn filing_id(&self) -> Option<&str> {
        self.filing_id.as_deref()
    }

    /// The passthrough token.
    pub fn passthrough_token(&self) -> Option<&str> {
        self.passthrough_token.as_deref()
    }

    /// The parsed permission scope. Recomputed on every call.
    pub fn scope(&self) -> PermissionScope {
        PermissionScope::parse(self.scope.as_deref())
    }

    /// The capability-query object, if upstream attached one.
    pub fn permissions(&self) -> Option<&Arc<dyn TokenPermissions>> {
        self.permissions.as_ref()
    }

    /// The admitted transaction.
    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    /// Attach the admitted transaction.
    pub fn attach_transaction(&mut self, transaction: Transaction) {
        self.transaction = Some(transaction);
    }

    /// The admitted filing.
    pub fn filing(&self) -> Option<&FilingResource> {
        self.filing.as_ref()
    }

    /// Attach the admitted filing.
    pub fn attach_filing(&mut self, filing: FilingResource) {
        self.filing = Some(filing);
    }

    /// Consume the context, returning what the gates attached.
    pub fn into_admitted(self) -> (Option<Transaction>, Option<FilingResource>) {
        (self.transaction, self.filing)
    }
}
