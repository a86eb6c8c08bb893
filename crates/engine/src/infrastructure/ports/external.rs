//! External service port traits (placement authority, scheduling, audit, mail).

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use homestead_domain::{Actor, Angle, ObjectId, Structure, TemplatePath, Waypoint};
use serde::{Deserialize, Serialize};

use crate::infrastructure::handles::Shared;

// =============================================================================
// Placement Authority
// =============================================================================

/// The single source of truth for whether a structure may stand somewhere.
///
/// `place` is atomic: it either returns a fully formed structure already in the
/// world, or `None` having changed nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacementAuthority: Send + Sync {
    async fn place(
        &self,
        actor: &Shared<Actor>,
        template: &TemplatePath,
        x: f32,
        y: f32,
        angle: Angle,
    ) -> Option<Shared<Structure>>;
}

// =============================================================================
// Scheduling
// =============================================================================

/// A one-shot unit of work handed to a [`Scheduler`].
pub struct ScheduledJob {
    name: &'static str,
    actor_id: ObjectId,
    task: BoxFuture<'static, ()>,
}

impl ScheduledJob {
    pub fn new<F>(name: &'static str, actor_id: ObjectId, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            actor_id,
            task: task.boxed(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The actor the job runs on behalf of.
    pub fn actor_id(&self) -> ObjectId {
        self.actor_id
    }

    pub async fn run(self) {
        self.task.await
    }
}

impl fmt::Debug for ScheduledJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledJob")
            .field("name", &self.name)
            .field("actor_id", &self.actor_id)
            .finish_non_exhaustive()
    }
}

/// Runs each submitted job exactly once after its delay, off the caller's task.
#[cfg_attr(test, mockall::automock)]
pub trait Scheduler: Send + Sync {
    fn schedule(&self, job: ScheduledJob, delay: Duration);
}

// =============================================================================
// Audit Log
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCode {
    StructureDeed,
}

/// One economic event: `subject` moved on behalf of `actor`, producing `result`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub subject: ObjectId,
    pub actor: ObjectId,
    pub result: Option<ObjectId>,
    pub code: TransactionCode,
    pub tags: BTreeMap<String, String>,
    pub recorded_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        subject: ObjectId,
        actor: ObjectId,
        result: Option<ObjectId>,
        code: TransactionCode,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject,
            actor,
            result,
            code,
            tags: BTreeMap::new(),
            recorded_at,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// Source of audit timestamps.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Fire-and-forget audit sink.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn record(&self, entry: AuditEntry);
}

// =============================================================================
// Notifications
// =============================================================================

/// A localized string-id message with its substitution parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringIdMessage {
    pub template: String,
    /// Target object name parameter.
    pub to: Option<String>,
    /// Integer parameter.
    pub di: Option<i64>,
}

impl StringIdMessage {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            to: None,
            di: None,
        }
    }

    pub fn with_to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn with_di(mut self, di: i64) -> Self {
        self.di = Some(di);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailMessage {
    pub sender: String,
    pub subject: String,
    pub body: StringIdMessage,
    pub recipient: String,
    pub attachment: Option<Waypoint>,
}

/// Fire-and-forget player mail delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_mail(&self, message: MailMessage);
}
