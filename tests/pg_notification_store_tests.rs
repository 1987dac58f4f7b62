#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use chrono::{TimeZone, Utc};
use portcall::domain::{
    BerthId, CargoManifest, ManifestDirection, ManifestLine, NotificationStatus, OfficerId,
    VesselReference,
};
use portcall::infrastructure::SCHEMA_SQL;
use portcall::{NotificationLifecycleService, NotificationStore, PgNotificationStore, PortCallError};

async fn store() -> PgNotificationStore {
    let url = std::env::var("PORTCALL_TEST_DATABASE_URL")
        .unwrap_or_else(|_| unreachable!("PORTCALL_TEST_DATABASE_URL must be set"));
    let store = PgNotificationStore::connect(&url, Some(5_000))
        .await
        .unwrap_or_else(|e| unreachable!("failed to connect: {e}"));
    store
        .initialize_schema_from_sql(SCHEMA_SQL)
        .await
        .unwrap_or_else(|e| unreachable!("failed to initialize schema: {e}"));
    store
}

#[tokio::test]
#[ignore = "requires PORTCALL_TEST_DATABASE_URL"]
async fn notification_round_trips_through_postgres() {
    let service = NotificationLifecycleService::new(store().await);
    let draft = service
        .create_draft(VesselReference::new("IMO-9321483"), true)
        .await
        .unwrap();
    let id = draft.notification.id().clone();

    service
        .update_dates(
            &id,
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 6, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 18, 0, 0).unwrap()),
        )
        .await
        .unwrap();
    service
        .set_manifest(
            &id,
            ManifestDirection::Unload,
            CargoManifest::new(
                ManifestDirection::Unload,
                vec![ManifestLine::new("MSCU1234567")],
            ),
        )
        .await
        .unwrap();
    service.submit(&id).await.unwrap();
    let approved = service
        .approve(&id, BerthId::new("b-1"), OfficerId::new("officer-7"))
        .await
        .unwrap();

    let loaded = service.get(&id).await.unwrap();

    assert_eq!(loaded, approved);
    assert_eq!(loaded.version, 5);
    assert_eq!(loaded.notification.status(), NotificationStatus::Accepted);
    assert!(loaded.notification.unloading_manifest().is_some());
}

#[tokio::test]
#[ignore = "requires PORTCALL_TEST_DATABASE_URL"]
async fn stale_version_is_a_conflict() {
    let store = store().await;
    let service = NotificationLifecycleService::new(store.clone());
    let draft = service
        .create_draft(VesselReference::new("IMO-1"), false)
        .await
        .unwrap();
    service
        .update_dates(draft.notification.id(), None, None)
        .await
        .unwrap();

    let result = store.save(&draft.notification, draft.version).await;

    assert!(matches!(result, Err(PortCallError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires PORTCALL_TEST_DATABASE_URL"]
async fn deleted_draft_is_gone() {
    let service = NotificationLifecycleService::new(store().await);
    let draft = service
        .create_draft(VesselReference::new("IMO-1"), false)
        .await
        .unwrap();
    let id = draft.notification.id().clone();

    service.delete(&id).await.unwrap();

    assert!(matches!(
        service.get(&id).await,
        Err(PortCallError::NotFound(_))
    ));
}
