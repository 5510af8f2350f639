//! Integration tests for the full resolution pipeline.
//!
//! Tests: store rows → loaders → merger → effective rule set → evaluator,
//! over the in-memory adapter.

use std::sync::Arc;

use chrono::Utc;

use vertex_auth::{
    can, can_with_policy, AbilityResolver, Action, AuthenticatedSession, Identity,
    ManageAllPrecedence, PermissionGrant, PrivilegeRecord, Subject,
};
use vertex_core::{RoleId, TenantId, UserId};

use crate::defaults::seed_role;
use crate::grant_store::InMemoryGrantStore;

struct Fixture {
    store: Arc<InMemoryGrantStore>,
    tenant_id: TenantId,
    user_id: UserId,
}

impl Fixture {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryGrantStore::new()),
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
        }
    }

    fn with_role(code: &str) -> Self {
        let fixture = Self::new();
        let role = seed_role(&fixture.store, code);
        fixture
            .store
            .assign_role(fixture.tenant_id, fixture.user_id, role.id);
        fixture
    }

    fn identity(&self) -> Identity {
        Identity::new(self.user_id, self.tenant_id)
    }

    fn resolver(&self) -> AbilityResolver<InMemoryGrantStore> {
        AbilityResolver::new(self.store.clone())
    }

    fn privilege(&self, subject: &'static str) -> PrivilegeRecord {
        PrivilegeRecord::unset(self.user_id, self.tenant_id, subject, Utc::now())
    }
}

#[tokio::test]
async fn admin_role_permits_delete_on_invoices() {
    let fixture = Fixture::with_role("ADMIN");

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();
    assert!(can(&rules, Action::Delete, &Subject::new("Invoices"), false));
}

#[tokio::test]
async fn vendedor_role_scopes_writes_to_sales() {
    let fixture = Fixture::with_role("VENDEDOR");

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();
    assert!(!can(&rules, Action::Delete, &Subject::new("Sales"), false));
    assert!(can(&rules, Action::Read, &Subject::new("Inventory"), false));
    assert!(can(&rules, Action::Create, &Subject::new("Sales"), false));
    assert!(!can(&rules, Action::Create, &Subject::new("Inventory"), false));
}

#[tokio::test]
async fn user_override_adds_access_the_role_did_not_grant() {
    let fixture = Fixture::with_role("USER");

    let mut record = fixture.privilege("Accounting");
    record.can_create = Some(true);
    fixture.store.upsert_privilege(record);

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();
    assert!(can(&rules, Action::Create, &Subject::new("Accounting"), false));
    assert!(!can(&rules, Action::Create, &Subject::new("Sales"), false));
    assert!(can(&rules, Action::Read, &Subject::new("Sales"), false));
}

#[tokio::test]
async fn user_override_revokes_role_granted_access() {
    let fixture = Fixture::new();

    let role_id = RoleId::new();
    fixture
        .store
        .add_grant(PermissionGrant::new(role_id, Action::Read, "all"));
    fixture
        .store
        .add_grant(PermissionGrant::new(role_id, Action::Delete, "Sales"));
    fixture
        .store
        .assign_role(fixture.tenant_id, fixture.user_id, role_id);

    let mut record = fixture.privilege("Sales");
    record.can_delete = Some(false);
    fixture.store.upsert_privilege(record);

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();
    assert!(!can(&rules, Action::Delete, &Subject::new("Sales"), false));
    assert!(can(&rules, Action::Read, &Subject::new("Sales"), false));
}

#[tokio::test]
async fn unassigned_user_gets_the_baseline_only() {
    let fixture = Fixture::new();

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();
    assert!(can(&rules, Action::Read, &Subject::new("Auth"), false));
    assert!(!can(&rules, Action::Read, &Subject::new("Sales"), false));
}

#[tokio::test]
async fn manage_all_is_not_revocable_per_form_by_default() {
    let fixture = Fixture::with_role("ADMIN");

    let mut record = fixture.privilege("Invoices");
    record.can_delete = Some(false);
    fixture.store.upsert_privilege(record);

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();

    // Documented precedence exception: the blanket grant short-circuits.
    assert!(can(&rules, Action::Delete, &Subject::new("Invoices"), false));

    // The alternate policy honors the per-form revocation.
    assert!(!can_with_policy(
        &rules,
        Action::Delete,
        &Subject::new("Invoices"),
        false,
        ManageAllPrecedence::RespectSubjectRevocations,
    ));
}

#[tokio::test]
async fn later_privilege_record_wins_for_the_same_subject() {
    let fixture = Fixture::with_role("USER");

    let mut early = fixture.privilege("Ledger");
    early.can_export = Some(true);
    early.created_at = Utc::now() - chrono::Duration::hours(1);
    fixture.store.upsert_privilege(early);

    // Same subject: the upsert replaces the earlier record outright.
    let mut late = fixture.privilege("Ledger");
    late.can_export = Some(false);
    fixture.store.upsert_privilege(late);

    let rules = fixture.resolver().resolve(&fixture.identity()).await.unwrap();
    assert!(!can(&rules, Action::Export, &Subject::new("Ledger"), false));
}

#[tokio::test]
async fn session_establishes_only_after_resolution() {
    let fixture = Fixture::with_role("GERENTE");
    let resolver = fixture.resolver();

    let session = AuthenticatedSession::establish(&resolver, fixture.identity())
        .await
        .unwrap();

    assert!(session.can(Action::Update, &Subject::new("Invoices")));
    assert!(!session.can(Action::Delete, &Subject::new("Invoices")));

    let json = session.ability_rules_json();
    assert_eq!(
        json,
        serde_json::json!([
            { "action": "create", "subject": "all" },
            { "action": "read", "subject": "all" },
            { "action": "update", "subject": "all" }
        ])
    );
}

#[tokio::test]
async fn superuser_session_bypasses_stored_grants() {
    let fixture = Fixture::new();
    let resolver = fixture.resolver();

    let identity = Identity::super_admin(fixture.user_id, fixture.tenant_id);
    let session = AuthenticatedSession::establish(&resolver, identity).await.unwrap();

    assert!(session.can(Action::Delete, &Subject::new("Invoices")));
    assert_eq!(
        session.ability_rules_json(),
        serde_json::json!([{ "action": "manage", "subject": "all" }])
    );
}

#[tokio::test]
async fn concurrent_resolutions_are_independent() {
    let fixture = Fixture::with_role("USER");

    let other_user = UserId::new();
    let admin_role = seed_role(&fixture.store, "ADMIN");
    fixture.store.assign_role(fixture.tenant_id, other_user, admin_role.id);

    let resolver = fixture.resolver();
    let first_identity = fixture.identity();
    let second_identity = Identity::new(other_user, fixture.tenant_id);
    let (first, second) = tokio::join!(
        resolver.resolve(&first_identity),
        resolver.resolve(&second_identity),
    );

    let first = first.unwrap();
    let second = second.unwrap();
    assert!(!can(&first, Action::Delete, &Subject::new("Sales"), false));
    assert!(can(&second, Action::Delete, &Subject::new("Sales"), false));
}
