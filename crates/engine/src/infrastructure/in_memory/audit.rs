use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::infrastructure::ports::{AuditEntry, AuditLog, MailMessage, Notifier};

/// Writes audit entries as tracing events and keeps them for inspection.
#[derive(Default)]
pub struct TracingAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
}

impl TracingAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditLog for TracingAuditLog {
    async fn record(&self, entry: AuditEntry) {
        tracing::info!(
            target: "audit",
            code = ?entry.code,
            subject = %entry.subject,
            actor = %entry.actor,
            result = ?entry.result,
            tags = ?entry.tags,
            "Transaction recorded"
        );
        self.entries.write().await.push(entry);
    }
}

/// Keeps sent mail in memory.
#[derive(Default)]
pub struct MailOutbox {
    sent: RwLock<Vec<MailMessage>>,
}

impl MailOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<MailMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MailOutbox {
    async fn send_mail(&self, message: MailMessage) {
        tracing::debug!(
            recipient = %message.recipient,
            subject = %message.subject,
            "Mail sent"
        );
        self.sent.write().await.push(message);
    }
}
