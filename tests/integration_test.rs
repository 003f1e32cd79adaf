//! Service-level integration tests against containerized backing stores.

mod helpers;

use assert_matches::assert_matches;
use serial_test::serial;

use threadline::models::design::CreateDesignVersionRequest;
use threadline::models::lead::LeadProgressRequest;
use threadline::models::order::{CreateStatusUpdateRequest, UpdateOrderRequest};
use threadline::models::camp::CreateRegistrationRequest;
use threadline::utils::errors::ThreadlineError;

use helpers::TestContext;

#[tokio::test]
#[serial]
async fn lead_progress_runs_the_full_chain() {
    let ctx = TestContext::new().await.expect("test context");
    let leads = &ctx.services.lead_service;

    let lead = leads
        .create_lead(helpers::create_lead_request())
        .await
        .expect("create lead");
    assert_eq!(lead.status, "new");
    assert!(!lead.contacted);

    // Step 1: contact made.
    let lead = leads
        .update_progress(
            lead.id,
            LeadProgressRequest {
                contacted: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("contact step");
    assert!(lead.contacted);
    assert_eq!(lead.status, "active");

    // Step 2: items confirmed.
    let lead = leads
        .update_progress(
            lead.id,
            LeadProgressRequest {
                items_confirmed: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("confirm step");
    assert!(lead.items_confirmed);

    // Step 3: submit to design converts the lead and opens a project.
    let lead = leads
        .update_progress(
            lead.id,
            LeadProgressRequest {
                submitted_to_design: Some(true),
                ..Default::default()
            },
        )
        .await
        .expect("submit step");
    assert!(lead.submitted_to_design);
    assert!(lead.submitted_at.is_some());
    assert_eq!(lead.status, "converted");

    let projects = ctx
        .services
        .design_service
        .list_projects(None, None, 1, 50)
        .await
        .expect("list projects");
    assert!(
        projects.iter().any(|p| p.lead_id == Some(lead.id)),
        "submission should open a design project for the lead"
    );

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn lead_progress_enforces_ordering() {
    let ctx = TestContext::new().await.expect("test context");
    let leads = &ctx.services.lead_service;

    let lead = leads
        .create_lead(helpers::create_lead_request())
        .await
        .expect("create lead");

    // Confirming items before contact is rejected.
    let err = leads
        .update_progress(
            lead.id,
            LeadProgressRequest {
                items_confirmed: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidStateTransition { .. });

    // Walk all three steps, then clear the first: later flags fall too.
    leads
        .update_progress(
            lead.id,
            LeadProgressRequest {
                contacted: Some(true),
                items_confirmed: Some(true),
                submitted_to_design: Some(true),
            },
        )
        .await
        .expect("full chain in one request");

    let lead = leads
        .update_progress(
            lead.id,
            LeadProgressRequest {
                contacted: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("clear first step");
    assert!(!lead.contacted);
    assert!(!lead.items_confirmed);
    assert!(!lead.submitted_to_design);
    assert_eq!(lead.status, "new");

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn ready_to_ship_requires_passed_quality_check() {
    let ctx = TestContext::new().await.expect("test context");
    let orders = &ctx.services.order_service;

    let order = orders
        .create_order(helpers::create_order_request(), None)
        .await
        .expect("create order");
    assert_eq!(order.status, "pending");

    // Walk the pipeline up to quality_check.
    for status in ["in_production", "quality_check"] {
        orders
            .update_order(
                order.id,
                UpdateOrderRequest {
                    status: Some(status.to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("pipeline step");
    }

    // No passed quality_check on the log yet.
    let err = orders
        .update_order(
            order.id,
            UpdateOrderRequest {
                status: Some("ready_to_ship".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidStateTransition { .. });

    orders
        .add_status_update(
            order.id,
            CreateStatusUpdateRequest {
                stage: "quality_check".to_string(),
                note: Some("Stitching inspected".to_string()),
                passed: Some(true),
            },
            None,
        )
        .await
        .expect("record quality check");

    let order = orders
        .update_order(
            order.id,
            UpdateOrderRequest {
                status: Some("ready_to_ship".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("gate opens after passed check");
    assert_eq!(order.status, "ready_to_ship");

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn order_pipeline_rejects_skips_and_quality_check_updates_need_verdict() {
    let ctx = TestContext::new().await.expect("test context");
    let orders = &ctx.services.order_service;

    let order = orders
        .create_order(helpers::create_order_request(), None)
        .await
        .expect("create order");

    // Straight from pending to ready_to_ship is not a legal transition.
    let err = orders
        .update_order(
            order.id,
            UpdateOrderRequest {
                status: Some("ready_to_ship".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidStateTransition { .. });

    // quality_check log entries must carry a verdict.
    let err = orders
        .add_status_update(
            order.id,
            CreateStatusUpdateRequest {
                stage: "quality_check".to_string(),
                note: None,
                passed: None,
            },
            None,
        )
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidInput(_));

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn camp_capacity_is_enforced_and_cancelling_frees_the_seat() {
    let ctx = TestContext::new().await.expect("test context");
    let camps = &ctx.services.camp_service;
    let rosters = &ctx.services.roster_service;

    let camp = camps
        .create_camp(helpers::create_camp_request(1))
        .await
        .expect("create camp");

    let first = rosters
        .create_participant(camp.id, helpers::create_participant_request())
        .await
        .expect("first participant");
    let second = rosters
        .create_participant(camp.id, helpers::create_participant_request())
        .await
        .expect("second participant");

    let registration = camps
        .register_participant(
            camp.id,
            CreateRegistrationRequest {
                participant_id: first.id,
                payment_status: None,
            },
        )
        .await
        .expect("first registration");
    assert_eq!(registration.confirmation_code.len(), 8);

    // Seat 2 of a 1-seat camp.
    let err = camps
        .register_participant(
            camp.id,
            CreateRegistrationRequest {
                participant_id: second.id,
                payment_status: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::CapacityExceeded { .. });

    // Re-registering the same participant is also rejected.
    let err = camps
        .register_participant(
            camp.id,
            CreateRegistrationRequest {
                participant_id: first.id,
                payment_status: None,
            },
        )
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidInput(_));

    camps
        .cancel_registration(registration.id)
        .await
        .expect("cancel registration");

    camps
        .register_participant(
            camp.id,
            CreateRegistrationRequest {
                participant_id: second.id,
                payment_status: Some("deposit".to_string()),
            },
        )
        .await
        .expect("freed seat is usable");

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn staff_assignments_are_camp_scoped_and_unique() {
    let ctx = TestContext::new().await.expect("test context");
    let camps = &ctx.services.camp_service;
    let rosters = &ctx.services.roster_service;

    let camp = camps
        .create_camp(helpers::create_camp_request(20))
        .await
        .expect("create camp");
    let staff = rosters
        .create_staff(helpers::create_staff_request())
        .await
        .expect("create staff");

    rosters
        .assign_staff(camp.id, staff.id, Some("lead instructor".to_string()))
        .await
        .expect("assign staff");

    // Assigning the same staff member twice is rejected.
    let err = rosters
        .assign_staff(camp.id, staff.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidInput(_));

    let assignments = rosters.list_camp_staff(camp.id).await.expect("list assignments");
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].duty.as_deref(), Some("lead instructor"));

    rosters
        .remove_camp_staff(camp.id, staff.id)
        .await
        .expect("remove assignment");
    assert!(rosters.list_camp_staff(camp.id).await.expect("empty").is_empty());

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn approving_a_version_supersedes_the_previous_one() {
    let ctx = TestContext::new().await.expect("test context");
    let designs = &ctx.services.design_service;

    let project = designs
        .create_project(threadline::models::design::CreateDesignProjectRequest {
            order_id: None,
            lead_id: None,
            designer_id: None,
            title: "Team jersey rework".to_string(),
            brief: None,
        })
        .await
        .expect("create project");

    let v1 = designs
        .add_version(
            project.id,
            CreateDesignVersionRequest {
                file_ref: "designs/jersey-v1.svg".to_string(),
                notes: None,
            },
            None,
        )
        .await
        .expect("version 1");
    let v2 = designs
        .add_version(
            project.id,
            CreateDesignVersionRequest {
                file_ref: "designs/jersey-v2.svg".to_string(),
                notes: Some("tighter collar".to_string()),
            },
            None,
        )
        .await
        .expect("version 2");
    assert_eq!(v1.version_number, 1);
    assert_eq!(v2.version_number, 2);

    designs.approve_version(project.id, v1.id).await.expect("approve v1");
    let project = designs.approve_version(project.id, v2.id).await.expect("approve v2");

    assert_eq!(project.status, "approved");
    assert_eq!(project.current_version_id, Some(v2.id));

    let versions = designs.list_versions(project.id).await.expect("list versions");
    let approved: Vec<i64> = versions.iter().filter(|v| v.approved).map(|v| v.id).collect();
    assert_eq!(approved, vec![v2.id]);

    ctx.cleanup().await.expect("cleanup");
}

#[tokio::test]
#[serial]
async fn user_accounts_validate_and_gate_login() {
    let ctx = TestContext::new().await.expect("test context");
    let users = &ctx.services.user_service;
    let auth = &ctx.services.auth_service;

    let request = helpers::create_user_request("sales");
    let email = request.email.clone();
    let user = users.create_user(request).await.expect("create user");

    // Duplicate email is rejected.
    let mut duplicate = helpers::create_user_request("sales");
    duplicate.email = email.clone();
    let err = users.create_user(duplicate).await.unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidInput(_));

    // Unknown roles and unknown page keys are rejected.
    let err = users
        .create_user(helpers::create_user_request("warehouse"))
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidInput(_));

    let err = users
        .set_visible_pages(user.id, vec!["not-a-page".to_string()])
        .await
        .unwrap_err();
    assert_matches!(err, ThreadlineError::InvalidInput(_));

    // Login works until the account is deactivated.
    let (token, _) = auth
        .login(&email, "correct-horse-battery")
        .await
        .expect("login");
    assert!(!token.is_empty());

    let err = auth.login(&email, "wrong-password").await.unwrap_err();
    assert_matches!(err, ThreadlineError::Authentication(_));

    users.deactivate_user(user.id).await.expect("deactivate");
    let err = auth.login(&email, "correct-horse-battery").await.unwrap_err();
    assert_matches!(err, ThreadlineError::Authentication(_));

    ctx.cleanup().await.expect("cleanup");
}
