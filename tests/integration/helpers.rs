//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use chrono::Utc;
use tempfile::TempDir;

use permit_auth::RegistrationForm;
use permit_core::config::AppConfig;
use permit_core::types::{PaymentId, PermitId, PermitTypeId, PrincipalId};
use permit_entity::{
    ApplicantName, DetailedPermit, Payment, PaymentStatus, Permit, PermitStatus, PermitType,
    Principal, ProfileFields, Role,
};
use permit_portal::{MemoryBackends, Portal};

/// Test application context
pub struct TestPortal {
    /// The assembled portal
    pub portal: Portal,
    /// Concrete in-memory stores for seeding and inspection
    pub mem: MemoryBackends,
    /// Download directory, removed on drop
    pub downloads: TempDir,
}

impl TestPortal {
    /// Create a portal whose principals become visible after `commit_lag`
    pub fn new(commit_lag: Duration) -> Self {
        let downloads = tempfile::tempdir().expect("tempdir");
        let mut config = AppConfig::default();
        config.portal.download_dir = downloads.path().display().to_string();

        let mem = MemoryBackends::new(&config, commit_lag);
        let portal = Portal::new(config, mem.backends());
        Self {
            portal,
            mem,
            downloads,
        }
    }

    /// Register through the provisioner; leaves the new user signed in
    pub async fn register(&self, email: &str, first: &str, last: &str, role: Role) -> Principal {
        self.portal
            .provisioner()
            .register(form(email, first, last, role))
            .await
            .expect("registration")
    }

    /// Seed an approved permit for `applicant`
    pub async fn seed_permit(
        &self,
        permit_type: &PermitType,
        applicant: Option<(&Principal, &str, &str)>,
    ) -> DetailedPermit {
        let now = Utc::now();
        let permit = DetailedPermit {
            permit: Permit {
                id: PermitId::new(),
                applicant_id: applicant.map(|(p, _, _)| p.id),
                applicant: applicant.map(|(_, first, last)| ApplicantName {
                    first_name: Some(first.to_string()),
                    last_name: Some(last.to_string()),
                }),
                permit_type: Some(permit_type.clone()),
                status: PermitStatus::Approved,
                address: Some("Poblacion".into()),
                created_at: now,
                updated_at: now,
            },
            applicant_email: applicant.map(|(p, _, _)| p.email.clone()),
            applicant_phone: None,
            applicant_address: None,
            business_name: Some("Corner Store".into()),
            purpose: Some("New application".into()),
            reviewed_by: None,
            approved_at: Some(now),
            form_data: serde_json::json!({}),
        };
        self.mem.permits.insert(permit.clone()).await;
        permit
    }

    /// Record a payment against `permit`
    pub async fn pay(&self, permit: &DetailedPermit, status: PaymentStatus) -> Payment {
        let payment = Payment {
            id: PaymentId::new(),
            permit_id: permit.permit.id,
            payment_status: status,
            reference: Some("OR-0001".into()),
            amount_cents: Some(75_000),
            created_at: Utc::now(),
        };
        self.mem.payments.record(payment.clone()).await;
        payment
    }
}

/// A valid registration form
pub fn form(email: &str, first: &str, last: &str, role: Role) -> RegistrationForm {
    RegistrationForm {
        email: email.to_string(),
        password: "secret123".into(),
        confirm_password: "secret123".into(),
        fields: ProfileFields {
            username: email.split('@').next().unwrap_or("user").to_string(),
            first_name: first.to_string(),
            middle_name: None,
            last_name: last.to_string(),
            phone: None,
            address: None,
        },
        role,
    }
}

/// A permit type with the given title and slug
pub fn permit_type(title: &str, slug: &str) -> PermitType {
    PermitType {
        id: PermitTypeId::new(),
        title: title.to_string(),
        slug: slug.to_string(),
    }
}

/// A principal that does not exist anywhere
pub fn stranger() -> Principal {
    Principal {
        id: PrincipalId::new(),
        email: "stranger@example.com".into(),
        username: "stranger".into(),
    }
}
