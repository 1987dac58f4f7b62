#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

#[cfg(test)]
mod bdd_tests {
    use crate::domain::notification::{
        next_state, CargoManifest, LifecycleEvent, ManifestDirection, ManifestLine,
        NotificationState, NotificationStatus, VisitNotification,
    };
    use crate::domain::shared::{BerthId, LifecycleError, NotificationId, OfficerId, VesselReference};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
    }

    fn officer() -> OfficerId {
        OfficerId::new("officer-7")
    }

    fn manifest(direction: ManifestDirection) -> CargoManifest {
        CargoManifest::new(direction, vec![ManifestLine::new("MSCU1234565")])
    }

    fn given_a_draft() -> VisitNotification {
        VisitNotification::new_draft(
            NotificationId::new("vn-1"),
            VesselReference::new("IMO9321483"),
            false,
        )
    }

    fn given_a_complete_draft() -> VisitNotification {
        let mut notification = given_a_draft();
        notification
            .update_dates(Some(at(8)), Some(at(18)))
            .expect("draft accepts dates");
        notification
            .set_loading_manifest(manifest(ManifestDirection::Load))
            .expect("draft accepts manifest");
        notification
    }

    fn given_a_submitted() -> VisitNotification {
        let mut notification = given_a_complete_draft();
        notification.submit().expect("complete draft submits");
        notification
    }

    fn given_a_rejected() -> VisitNotification {
        let mut notification = given_a_submitted();
        notification
            .reject("berth window too short", officer())
            .expect("submitted notification rejects");
        notification
    }

    fn given_an_approved() -> VisitNotification {
        let mut notification = given_a_submitted();
        notification
            .approve(BerthId::new("berth-north-1"), officer())
            .expect("submitted notification approves");
        notification
    }

    #[test]
    fn when_created_then_draft_without_berth_or_reason() {
        let notification = given_a_draft();

        assert_eq!(notification.status(), NotificationStatus::InProgress);
        assert!(notification.assigned_berth_id().is_none());
        assert!(notification.rejection_reason().is_none());
        assert!(notification.arrival_date().is_none());
    }

    #[test]
    fn when_submitting_complete_draft_then_submitted() {
        let notification = given_a_submitted();

        assert_eq!(notification.status(), NotificationStatus::Submitted);
    }

    #[test]
    fn when_submitting_without_dates_then_validation_fails_and_state_is_kept() {
        let mut notification = given_a_draft();
        let before = notification.clone();

        let result = notification.submit();

        assert!(matches!(result, Err(LifecycleError::ValidationFailed(_))));
        assert_eq!(notification, before);
    }

    #[test]
    fn when_submitting_with_departure_before_arrival_then_validation_fails() {
        let mut notification = given_a_draft();
        notification
            .update_dates(Some(at(18)), Some(at(8)))
            .expect("dates are not checked until submission");

        let result = notification.submit();

        assert!(matches!(result, Err(LifecycleError::ValidationFailed(_))));
        assert_eq!(notification.status(), NotificationStatus::InProgress);
    }

    #[test]
    fn when_submitting_with_equal_arrival_and_departure_then_validation_fails() {
        let mut notification = given_a_draft();
        notification
            .update_dates(Some(at(8)), Some(at(8)))
            .expect("draft accepts dates");

        assert!(notification.submit().is_err());
    }

    #[test]
    fn when_submitting_twice_then_precondition_fails() {
        let mut notification = given_a_submitted();

        let result = notification.submit();

        assert!(matches!(result, Err(LifecycleError::PreconditionFailed(_))));
    }

    #[test]
    fn when_approving_then_accepted_with_berth() {
        let notification = given_an_approved();

        assert_eq!(notification.status(), NotificationStatus::Accepted);
        assert_eq!(
            notification.assigned_berth_id(),
            Some(&BerthId::new("berth-north-1"))
        );
        assert_eq!(notification.state().decided_by(), Some(&officer()));
    }

    #[test]
    fn when_accepting_then_accepted_without_berth() {
        let mut notification = given_a_submitted();

        notification.accept().expect("submitted notification accepts");

        assert_eq!(notification.status(), NotificationStatus::Accepted);
        assert!(notification.assigned_berth_id().is_none());
        assert!(notification.state().decided_by().is_none());
    }

    #[test]
    fn when_reaching_accepted_then_only_plain_accept_leaves_the_berth_empty() {
        let mut accepted = given_a_submitted();
        accepted.accept().expect("submitted notification accepts");
        let approved = given_an_approved();

        assert_eq!(accepted.status(), approved.status());
        assert!(accepted.assigned_berth_id().is_none());
        assert!(approved.assigned_berth_id().is_some());
        assert!(matches!(
            accepted.reject("late paperwork", officer()),
            Err(LifecycleError::ValidationFailed(_))
        ));
    }

    #[test]
    fn when_accepting_a_draft_then_precondition_fails() {
        let mut notification = given_a_complete_draft();

        let result = notification.accept();

        assert!(matches!(result, Err(LifecycleError::PreconditionFailed(_))));
    }

    #[test]
    fn when_approving_a_draft_then_validation_fails_with_submitted_message() {
        let mut notification = given_a_complete_draft();

        let result = notification.approve(BerthId::new("berth-north-1"), officer());

        match result {
            Err(LifecycleError::ValidationFailed(message)) => {
                assert!(message.contains("must be submitted"), "{message}");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(notification.assigned_berth_id().is_none());
    }

    #[test]
    fn when_approving_without_berth_or_officer_then_validation_fails() {
        let mut notification = given_a_submitted();

        let blank_berth = notification.approve(BerthId::new("  "), officer());
        let blank_officer = notification.approve(BerthId::new("berth-1"), OfficerId::new(""));

        assert!(blank_berth.is_err_and(|e| e.is_validation()));
        assert!(blank_officer.is_err_and(|e| e.is_validation()));
        assert_eq!(notification.status(), NotificationStatus::Submitted);
    }

    #[test]
    fn when_rejecting_then_reason_is_set_and_berth_cleared() {
        let notification = given_a_rejected();

        assert_eq!(notification.status(), NotificationStatus::Rejected);
        assert_eq!(notification.rejection_reason(), Some("berth window too short"));
        assert!(notification.assigned_berth_id().is_none());
    }

    #[test]
    fn when_rejecting_without_reason_then_validation_fails() {
        let mut notification = given_a_submitted();

        let result = notification.reject("   ", officer());

        assert!(result.is_err_and(|e| e.is_validation()));
        assert_eq!(notification.status(), NotificationStatus::Submitted);
    }

    #[test]
    fn when_rejecting_an_accepted_notification_then_validation_fails() {
        let mut notification = given_an_approved();

        let result = notification.reject("changed our mind", officer());

        assert!(result.is_err_and(|e| e.is_validation()));
        assert_eq!(
            notification.assigned_berth_id(),
            Some(&BerthId::new("berth-north-1"))
        );
    }

    #[test]
    fn when_rejected_then_converted_to_draft_then_editable_with_data_intact() {
        let mut notification = given_a_rejected();

        notification
            .convert_to_draft()
            .expect("rejected notification converts");

        assert_eq!(notification.status(), NotificationStatus::InProgress);
        assert!(notification.rejection_reason().is_none());
        assert_eq!(notification.arrival_date(), Some(at(8)));
        assert_eq!(notification.departure_date(), Some(at(18)));
        assert_eq!(
            notification.loading_manifest(),
            Some(&manifest(ManifestDirection::Load))
        );
        assert!(notification.update_dates(Some(at(9)), Some(at(19))).is_ok());
    }

    #[test]
    fn when_converting_a_submitted_notification_to_draft_then_validation_fails() {
        let mut notification = given_a_submitted();

        assert!(notification
            .convert_to_draft()
            .is_err_and(|e| e.is_validation()));
    }

    #[test]
    fn when_resubmitting_rejected_then_submitted_without_reason() {
        let mut notification = given_a_rejected();

        notification.resubmit().expect("rejected notification resubmits");

        assert_eq!(notification.status(), NotificationStatus::Submitted);
        assert!(notification.rejection_reason().is_none());
    }

    #[test]
    fn when_resubmitting_a_draft_then_submitted() {
        let mut notification = given_a_complete_draft();

        notification.resubmit().expect("draft resubmits");

        assert_eq!(notification.status(), NotificationStatus::Submitted);
    }

    #[test]
    fn when_resubmitting_accepted_then_validation_fails() {
        let mut notification = given_an_approved();

        match notification.resubmit() {
            Err(LifecycleError::ValidationFailed(message)) => {
                assert!(message.contains("must be rejected or in-progress"), "{message}");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert_eq!(notification.status(), NotificationStatus::Accepted);
    }

    #[test]
    fn when_update_and_resubmit_then_lands_in_draft_with_new_dates() {
        let mut notification = given_a_rejected();

        notification
            .update_and_resubmit(Some(at(10)), Some(at(20)))
            .expect("rejected notification reopens");

        assert_eq!(notification.status(), NotificationStatus::InProgress);
        assert!(notification.rejection_reason().is_none());
        assert_eq!(notification.arrival_date(), Some(at(10)));
        assert_eq!(notification.departure_date(), Some(at(20)));
    }

    #[test]
    fn when_update_and_resubmit_outside_rejected_then_validation_fails() {
        let mut notification = given_a_complete_draft();
        let before = notification.clone();

        let result = notification.update_and_resubmit(Some(at(1)), Some(at(2)));

        assert!(result.is_err_and(|e| e.is_validation()));
        assert_eq!(notification, before);
    }

    #[test]
    fn when_setting_manifest_with_wrong_direction_then_validation_fails() {
        let mut notification = given_a_draft();

        let result = notification.set_loading_manifest(manifest(ManifestDirection::Unload));

        assert!(result.is_err_and(|e| e.is_validation()));
        assert!(notification.loading_manifest().is_none());
    }

    #[test]
    fn when_setting_manifest_twice_then_replaced() {
        let mut notification = given_a_draft();
        let replacement = CargoManifest::new(
            ManifestDirection::Unload,
            vec![ManifestLine::new("TGHU8830417"), ManifestLine::new("CSQU3054383")],
        );

        notification
            .set_unloading_manifest(manifest(ManifestDirection::Unload))
            .expect("first manifest");
        notification
            .set_unloading_manifest(replacement.clone())
            .expect("second manifest");

        assert_eq!(notification.unloading_manifest(), Some(&replacement));
        assert!(notification.loading_manifest().is_none());
    }

    #[test]
    fn when_removing_manifest_then_slot_is_empty() {
        let mut notification = given_a_complete_draft();

        let removed = notification
            .remove_manifest(ManifestDirection::Load)
            .expect("draft removes manifest");

        assert_eq!(removed, Some(manifest(ManifestDirection::Load)));
        assert!(notification.manifest(ManifestDirection::Load).is_none());
    }

    #[test]
    fn when_editing_outside_draft_then_nothing_changes() {
        for mut notification in [given_a_submitted(), given_an_approved(), given_a_rejected()] {
            let before = notification.clone();

            let dates = notification.update_dates(Some(at(1)), Some(at(2)));
            let set = notification.set_unloading_manifest(manifest(ManifestDirection::Unload));
            let removed = notification.remove_manifest(ManifestDirection::Load);
            let replaced = notification
                .replace_manifests_for_resubmit(None, Some(manifest(ManifestDirection::Unload)));

            assert!(dates.is_err_and(|e| e.is_precondition()));
            assert!(set.is_err_and(|e| e.is_precondition()));
            assert!(removed.is_err_and(|e| e.is_precondition()));
            assert!(replaced.is_err_and(|e| e.is_precondition()));
            assert_eq!(notification, before);
        }
    }

    #[test]
    fn when_replacing_manifests_then_only_provided_slots_change() {
        let mut notification = given_a_complete_draft();
        let unloading = manifest(ManifestDirection::Unload);

        notification
            .replace_manifests_for_resubmit(None, Some(unloading.clone()))
            .expect("draft replaces manifests");

        assert_eq!(
            notification.loading_manifest(),
            Some(&manifest(ManifestDirection::Load))
        );
        assert_eq!(notification.unloading_manifest(), Some(&unloading));
    }

    #[test]
    fn when_replacing_with_one_misdirected_manifest_then_neither_slot_changes() {
        let mut notification = given_a_draft();
        let before = notification.clone();

        let result = notification.replace_manifests_for_resubmit(
            Some(manifest(ManifestDirection::Load)),
            Some(manifest(ManifestDirection::Load)),
        );

        assert!(result.is_err_and(|e| e.is_validation()));
        assert_eq!(notification, before);
    }

    #[test]
    fn when_deleting_then_only_drafts_qualify() {
        assert!(given_a_draft().ensure_deletable().is_ok());
        assert!(given_a_submitted()
            .ensure_deletable()
            .is_err_and(|e| e.is_precondition()));
        assert!(given_an_approved().ensure_deletable().is_err());
    }

    #[test]
    fn when_berth_is_assigned_then_status_is_accepted() {
        let notifications = [
            given_a_draft(),
            given_a_submitted(),
            given_an_approved(),
            given_a_rejected(),
        ];

        for notification in notifications {
            if notification.assigned_berth_id().is_some() {
                assert_eq!(notification.status(), NotificationStatus::Accepted);
            }
            if notification.status() == NotificationStatus::Rejected {
                assert!(notification.assigned_berth_id().is_none());
            }
        }
    }

    #[test]
    fn when_snapshot_is_restored_then_aggregate_is_identical() {
        for notification in [given_a_complete_draft(), given_an_approved(), given_a_rejected()] {
            let restored =
                VisitNotification::restore(notification.snapshot()).expect("snapshot restores");
            assert_eq!(restored, notification);
        }
    }

    #[test]
    fn when_snapshot_is_inconsistent_then_restore_fails() {
        let mut snapshot = given_a_submitted().snapshot();
        snapshot.assigned_berth_id = Some(BerthId::new("berth-1"));
        assert!(VisitNotification::restore(snapshot).is_err());

        let mut snapshot = given_a_rejected().snapshot();
        snapshot.rejection_reason = None;
        assert!(VisitNotification::restore(snapshot).is_err());

        let mut snapshot = given_a_draft().snapshot();
        snapshot.loading_manifest = Some(manifest(ManifestDirection::Unload));
        assert!(VisitNotification::restore(snapshot).is_err());
    }

    #[test]
    fn when_transition_function_sees_illegal_pairs_then_it_rejects_them() {
        let accepted = NotificationState::Accepted {
            assigned_berth: Some(BerthId::new("b")),
            approved_by: Some(officer()),
        };

        assert!(next_state(&accepted, LifecycleEvent::Submit).is_err_and(|e| e.is_precondition()));
        assert!(next_state(&accepted, LifecycleEvent::Accept).is_err_and(|e| e.is_precondition()));
        assert!(next_state(&accepted, LifecycleEvent::ConvertToDraft).is_err());
        assert!(next_state(&NotificationState::Submitted, LifecycleEvent::Resubmit).is_err());
        assert_eq!(
            next_state(&NotificationState::InProgress, LifecycleEvent::Submit),
            Ok(NotificationState::Submitted)
        );
    }
}
