//! Payment-gateway trait seam for the external payment provider.
//!
//! The reservation core never talks to the provider directly: it records
//! local payment state transitions and hands provider-side work (refund
//! execution) to an implementation of this trait. Provider-side refund
//! confirmation arrives later as a separate callback; the local `refunded`
//! marking is an intent, not a confirmation.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::PaymentId;

/// Operations the core delegates to the external payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Record the intent to refund a captured payment.
    ///
    /// Implementations should enqueue or fire the provider refund call.
    /// Failures are surfaced to the caller but must not undo the local
    /// cancellation, which has already committed.
    async fn record_refund_intent(
        &self,
        payment_id: PaymentId,
        provider_ref: Option<&str>,
        amount: i64,
        currency: &str,
    ) -> AppResult<()>;
}

/// Gateway used when no payment provider is configured: logs the intent
/// and succeeds. Refunds are then reconciled manually.
#[derive(Debug, Default, Clone)]
pub struct LoggingPaymentGateway;

#[async_trait]
impl PaymentGateway for LoggingPaymentGateway {
    async fn record_refund_intent(
        &self,
        payment_id: PaymentId,
        provider_ref: Option<&str>,
        amount: i64,
        currency: &str,
    ) -> AppResult<()> {
        tracing::info!(
            payment_id = %payment_id,
            provider_ref = provider_ref.unwrap_or("none"),
            amount,
            currency,
            "Refund intent recorded (no gateway configured)"
        );
        Ok(())
    }
}
