use std::sync::Arc;

use crate::{
    AdmissionError, Decision, FilingIdentityGate, FilingStore, Gate, PermissionGate,
    RequestContext, TransactionGate, TransactionService,
};

/// An ordered chain of [`Gate`]s.
///
/// Gates run in the order given and the first denial ends admission. Faults
/// propagate immediately.
pub struct AdmissionPipeline {
    gates: Vec<Box<dyn Gate>>,
}

impl AdmissionPipeline {
    /// A pipeline running `gates` in order.
    pub fn new(gates: Vec<Box<dyn Gate>>) -> Self {
        Self { gates }
    }

    /// The officer filing pipeline: transaction, then filing identity, then
    /// permissions.
    pub fn standard(
        transactions: Arc<dyn TransactionService>,
        filings: Arc<dyn FilingStore>,
    ) -> Self {
        Self::new(vec![
            Box::new(TransactionGate::new(transactions.clone())) as Box<dyn Gate>,
            Box::new(FilingIdentityGate::new(filings)),
            Box::new(PermissionGate::new(transactions)),
        ])
    }

    /// Names of the gates in evaluation order.
    pub fn gate_names(&self) -> Vec<&'static str> {
        self.gates.iter().map(|gate| gate.name()).collect()
    }

    /// Run every gate against `context` until one denies.
    pub async fn admit(&self, context: &mut RequestContext) -> Result<Decision, AdmissionError> {
        for gate in &self.gates {
            match gate.admit(context).await {
                Ok(Decision::Allow) => continue,
                Ok(Decision::Deny(denial)) => {
                    tracing::info!(
                        gate = gate.name(),
                        transaction_id = context.transaction_id(),
                        filing_id = context.filing_id(),
                        status = denial.status.as_u16(),
                        reason = %denial.reason,
                        "request denied"
                    );
                    return Ok(Decision::Deny(denial));
                }
                Err(error) => {
                    tracing::error!(gate = gate.name(), %error, "admission fault");
                    return Err(error);
                }
            }
        }

        Ok(Decision::Allow)
    }
}
