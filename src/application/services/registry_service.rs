//! Registry operations: create, list, resolve, remove, statistics.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::{ShortenRequest, StatisticsSummary};
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::RegistryError;
use crate::infrastructure::logging::AuditLog;
use crate::utils::code_generator::generate_code;

/// Maximum collision retries when generating a short code.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Component name used in audit entries.
const COMPONENT: &str = "registry";

/// Service owning the shortened-link registry operations.
///
/// Constructed once at startup and handed to all consumers; there is no
/// process-wide singleton. Storage is reached only through the
/// [`LinkRepository`] seam.
///
/// Every read-side operation starts with a lazy expiry pass, so a record can
/// appear active on one call and inactive on the next without any background
/// sweeper.
pub struct RegistryService<R: LinkRepository> {
    repository: Arc<R>,
    base_url: String,
    max_active: usize,
    op_delay: Duration,
    audit: Option<Arc<AuditLog>>,
}

impl<R: LinkRepository> RegistryService<R> {
    /// Creates a registry service.
    ///
    /// `base_url` is the display prefix for short URLs; a trailing slash is
    /// tolerated. `max_active` must match the quota the repository enforces
    /// at insert time.
    pub fn new(repository: Arc<R>, base_url: impl Into<String>, max_active: usize) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_active,
            op_delay: Duration::ZERO,
            audit: None,
        }
    }

    /// Attaches an audit log notified of every operation outcome.
    pub fn with_audit_log(mut self, audit: Arc<AuditLog>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Adds a simulated latency before each operation.
    pub fn with_op_delay(mut self, delay: Duration) -> Self {
        self.op_delay = delay;
        self
    }

    /// Creates a shortened link.
    ///
    /// Processing order is fixed: lazy expiry, structural validation
    /// (all field errors reported together), capacity check, then code
    /// assignment. A custom code is used as-is when no active record holds
    /// it; otherwise a random 6-character code is generated, regenerating on
    /// each of up to 10 collision retries.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::Validation`] for invalid fields
    /// - [`RegistryError::CapacityExceeded`] when the active quota is full
    /// - [`RegistryError::CodeTaken`] for a custom code held by an active record
    /// - [`RegistryError::CodeExhausted`] after 10 failed generation attempts
    pub async fn create(&self, request: ShortenRequest) -> Result<ShortLink, RegistryError> {
        self.simulate_latency().await;
        self.expire_pass().await?;

        let request = request.normalized();
        if let Err(errors) = request.validate() {
            return Err(self.fail("create", errors.into()));
        }

        let active = self.repository.active_count().await?;
        if active >= self.max_active {
            return Err(self.fail(
                "create",
                RegistryError::CapacityExceeded {
                    active,
                    limit: self.max_active,
                },
            ));
        }

        let short_code = match &request.custom_code {
            Some(custom) => {
                if self
                    .repository
                    .find_active_by_code(custom)
                    .await?
                    .is_some()
                {
                    return Err(self.fail(
                        "create",
                        RegistryError::CodeTaken {
                            code: custom.clone(),
                        },
                    ));
                }
                custom.clone()
            }
            None => match self.generate_unique_code().await {
                Ok(code) => code,
                Err(e) => return Err(self.fail("create", e)),
            },
        };

        let created_at = Utc::now();
        let expires_at = created_at + chrono::Duration::minutes(request.validity_minutes as i64);

        let new_link = NewShortLink {
            original_url: request.original_url,
            short_url: format!("{}/{}", self.base_url, short_code),
            short_code,
            validity_minutes: request.validity_minutes,
            created_at,
            expires_at,
        };

        // The repository re-checks quota and uniqueness under its write lock.
        let link = match self.repository.insert(new_link).await {
            Ok(link) => link,
            Err(e) => return Err(self.fail("create", e)),
        };

        if let Some(audit) = &self.audit {
            audit.info(
                COMPONENT,
                "create",
                "short link created",
                json!({ "id": link.id, "code": link.short_code, "expires_at": link.expires_at }),
            );
        }

        Ok(link)
    }

    /// Returns every record, active and inactive, newest first.
    pub async fn list(&self) -> Result<Vec<ShortLink>, RegistryError> {
        self.simulate_latency().await;
        self.expire_pass().await?;

        let links = self.repository.list_all().await?;

        if let Some(audit) = &self.audit {
            audit.debug(
                COMPONENT,
                "list",
                "links listed",
                json!({ "count": links.len() }),
            );
        }

        Ok(links)
    }

    /// Resolves an active short code, counting the visit.
    ///
    /// Incrementing `click_count` on a read is intentional: every successful
    /// resolution is a visit. A failed resolve mutates nothing.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no active record holds
    /// `code` (unknown, expired, or deleted).
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, RegistryError> {
        self.simulate_latency().await;
        self.expire_pass().await?;

        let link = match self.repository.record_click(code).await? {
            Some(link) => link,
            None => {
                return Err(self.fail(
                    "resolve",
                    RegistryError::not_found(
                        "short link not found or expired",
                        json!({ "code": code }),
                    ),
                ));
            }
        };

        if let Some(audit) = &self.audit {
            audit.info(
                COMPONENT,
                "resolve",
                "short link resolved",
                json!({ "code": link.short_code, "clicks": link.click_count }),
            );
        }

        Ok(link)
    }

    /// Soft-deletes a record by id.
    ///
    /// Only `is_active` changes; clicks and timestamps stay as they were.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] when no record has `id`.
    pub async fn remove(&self, id: Uuid) -> Result<(), RegistryError> {
        self.simulate_latency().await;

        if !self.repository.deactivate(id).await? {
            return Err(self.fail(
                "remove",
                RegistryError::not_found("short link not found", json!({ "id": id })),
            ));
        }

        if let Some(audit) = &self.audit {
            audit.info(
                COMPONENT,
                "remove",
                "short link deactivated",
                json!({ "id": id }),
            );
        }

        Ok(())
    }

    /// Computes aggregate counters over every record ever created.
    pub async fn statistics(&self) -> Result<StatisticsSummary, RegistryError> {
        self.simulate_latency().await;
        self.expire_pass().await?;

        let links = self.repository.list_all().await?;

        let active_links = links.iter().filter(|l| l.is_active).count();
        let summary = StatisticsSummary {
            total_links: links.len(),
            active_links,
            inactive_links: links.len() - active_links,
            total_clicks: links.iter().map(|l| l.click_count).sum(),
        };

        if let Some(audit) = &self.audit {
            audit.debug(
                COMPONENT,
                "statistics",
                "statistics computed",
                json!({
                    "total": summary.total_links,
                    "active": summary.active_links,
                    "clicks": summary.total_clicks,
                }),
            );
        }

        Ok(summary)
    }

    /// Flips overdue records to inactive before the operation proper runs.
    async fn expire_pass(&self) -> Result<(), RegistryError> {
        let expired = self.repository.expire_overdue(Utc::now()).await?;

        if expired > 0
            && let Some(audit) = &self.audit
        {
            audit.debug(
                COMPONENT,
                "expire",
                "overdue links expired",
                json!({ "count": expired }),
            );
        }

        Ok(())
    }

    /// Generates a short code not held by any active record.
    ///
    /// A fresh candidate is drawn on every attempt; the bound turns a
    /// pathologically full code space into an explicit error instead of an
    /// unbounded loop.
    async fn generate_unique_code(&self) -> Result<String, RegistryError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_code();

            if self
                .repository
                .find_active_by_code(&code)
                .await?
                .is_none()
            {
                return Ok(code);
            }
        }

        Err(RegistryError::CodeExhausted {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    fn fail(&self, action: &str, err: RegistryError) -> RegistryError {
        if let Some(audit) = &self.audit {
            audit.warn(COMPONENT, action, err.to_string(), err.details());
        }
        err
    }

    async fn simulate_latency(&self) {
        if !self.op_delay.is_zero() {
            tokio::time::sleep(self.op_delay).await;
        }
    }
}
