mod common;

use common::{account_settings, add_job, add_team, add_user, setup_db};
use job_allotment::entity::job::JobStatus;
use job_allotment::entity::report::{ReportStatus, ReportType};
use job_allotment::entity::user::Role;
use job_allotment::migration::DEFAULT_TITLES;
use job_allotment::model::job::{JobAllotmentRequest, JobCreateRequest};
use job_allotment::workflow::account::authenticate;
use job_allotment::workflow::catalog::{add_job_title, list_job_titles};
use job_allotment::workflow::dashboard::{admin_dashboard, supervisor_dashboard, user_dashboard};
use job_allotment::workflow::job::{admin_delete_job, allot_job, create_job, find_job};
use job_allotment::workflow::report::{admin_verify, find_report, reports_for_job, supervisor_verify};
use job_allotment::workflow::{
    derive_statuses, derive_statuses_bulk, reset_credential, resolve_user, submit_report,
    verify_report, FinalStatus, ParticipantStatus, Resource, WorkflowError,
};

#[tokio::test]
async fn new_job_has_no_progress() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = add_job(&db, &team).await;

    let statuses = derive_statuses(&db, &job).await.unwrap();

    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(statuses.user, ParticipantStatus::Pending);
    assert_eq!(statuses.supervisor, ParticipantStatus::Pending);
    assert_eq!(statuses.final_status, FinalStatus::Pending);
    assert!(!statuses.ready);
}

#[tokio::test]
async fn full_approval_sequence() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = add_job(&db, &team).await;

    let user_report = submit_report(&db, job.id, &team.user, "Toner replaced").await.unwrap();
    assert_eq!(user_report.report_type, ReportType::User);
    assert_eq!(user_report.status, ReportStatus::Pending);
    let statuses = derive_statuses(&db, &job).await.unwrap();
    assert_eq!(statuses.user, ParticipantStatus::Submitted);
    assert!(!statuses.ready);

    supervisor_verify(&db, user_report.id, &team.supervisor).await.unwrap();
    let statuses = derive_statuses(&db, &job).await.unwrap();
    assert_eq!(statuses.user, ParticipantStatus::Completed);
    assert_eq!(statuses.summary, "Supervisor report not submitted");

    let supervisor_report = submit_report(&db, job.id, &team.supervisor, "Checked the printer")
        .await
        .unwrap();
    assert_eq!(supervisor_report.report_type, ReportType::Supervisor);
    assert_eq!(supervisor_report.status, ReportStatus::Pending);
    let statuses = derive_statuses(&db, &job).await.unwrap();
    assert_eq!(statuses.supervisor, ParticipantStatus::Submitted);
    assert!(statuses.ready);

    admin_verify(&db, supervisor_report.id, &team.admin, ReportStatus::Verified)
        .await
        .unwrap();

    let job = find_job(&db, job.id).await.unwrap();
    let statuses = derive_statuses(&db, &job).await.unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(statuses.final_status, FinalStatus::Approved);
    assert_eq!(statuses.supervisor, ParticipantStatus::Completed);
    assert!(!statuses.ready);
}

#[tokio::test]
async fn only_the_assigned_user_can_report() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = add_job(&db, &team).await;
    let outsider = add_user(&db, "outsider", Role::User).await;

    let err = submit_report(&db, job.id, &outsider, "not mine").await.unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));

    let err = submit_report(&db, job.id, &team.admin, "admins do not report").await.unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));

    let err = submit_report(&db, job.id, &team.user, "   ").await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let err = submit_report(&db, 9999, &team.user, "missing job").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn supervisor_verification_rules() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = add_job(&db, &team).await;
    let other_supervisor = add_user(&db, "other-lead", Role::Supervisor).await;

    let user_report = submit_report(&db, job.id, &team.user, "done").await.unwrap();

    let err = supervisor_verify(&db, user_report.id, &other_supervisor).await.unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));

    let err = supervisor_verify(&db, user_report.id, &team.user).await.unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));

    let first = supervisor_verify(&db, user_report.id, &team.supervisor).await.unwrap();
    let second = supervisor_verify(&db, user_report.id, &team.supervisor).await.unwrap();
    assert_eq!(first.status, ReportStatus::Verified);
    assert_eq!(second.status, ReportStatus::Verified);

    let supervisor_report = submit_report(&db, job.id, &team.supervisor, "review").await.unwrap();
    let err = supervisor_verify(&db, supervisor_report.id, &team.supervisor).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn admin_verification_requires_a_ready_supervisor_report() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = add_job(&db, &team).await;

    let user_report = submit_report(&db, job.id, &team.user, "done").await.unwrap();

    // user reports never go to the admin
    let err = verify_report(&db, user_report.id, ReportStatus::Verified).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(find_job(&db, job.id).await.unwrap().status, JobStatus::Pending);

    // supervisor report filed before the user report was verified
    let supervisor_report = submit_report(&db, job.id, &team.supervisor, "review").await.unwrap();
    let err = verify_report(&db, supervisor_report.id, ReportStatus::Verified).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let err = admin_verify(&db, supervisor_report.id, &team.supervisor, ReportStatus::Verified)
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::PermissionDenied(_)));

    supervisor_verify(&db, user_report.id, &team.supervisor).await.unwrap();
    verify_report(&db, supervisor_report.id, ReportStatus::Verified).await.unwrap();

    // approved jobs are frozen
    let err = verify_report(&db, supervisor_report.id, ReportStatus::Pending).await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
    let report = find_report(&db, supervisor_report.id).await.unwrap();
    assert_eq!(report.status, ReportStatus::Verified);
}

#[tokio::test]
async fn deleting_a_job_removes_its_reports() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = add_job(&db, &team).await;
    let keep = add_job(&db, &team).await;

    submit_report(&db, job.id, &team.user, "done").await.unwrap();
    submit_report(&db, job.id, &team.supervisor, "checked").await.unwrap();
    submit_report(&db, keep.id, &team.user, "other job").await.unwrap();

    admin_delete_job(&db, job.id).await.unwrap();

    assert!(find_job(&db, job.id).await.unwrap_err().is_not_found());
    assert!(reports_for_job(&db, job.id).await.unwrap().is_empty());
    assert_eq!(reports_for_job(&db, keep.id).await.unwrap().len(), 1);

    assert!(admin_delete_job(&db, job.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn bulk_statuses_match_single_job_statuses() {
    let db = setup_db().await;
    let team = add_team(&db).await;

    let untouched = add_job(&db, &team).await;
    let submitted = add_job(&db, &team).await;
    let ready = add_job(&db, &team).await;

    submit_report(&db, submitted.id, &team.user, "first").await.unwrap();
    // a later duplicate does not change what the first report says
    let dup = submit_report(&db, submitted.id, &team.user, "second").await.unwrap();
    supervisor_verify(&db, dup.id, &team.supervisor).await.unwrap();

    let report = submit_report(&db, ready.id, &team.user, "done").await.unwrap();
    supervisor_verify(&db, report.id, &team.supervisor).await.unwrap();
    submit_report(&db, ready.id, &team.supervisor, "checked").await.unwrap();

    let jobs = vec![untouched.clone(), submitted.clone(), ready.clone()];
    let bulk = derive_statuses_bulk(&db, &jobs).await.unwrap();

    assert_eq!(bulk.len(), 3);
    for job in &jobs {
        assert_eq!(bulk[&job.id], derive_statuses(&db, job).await.unwrap());
    }
    assert_eq!(bulk[&submitted.id].user, ParticipantStatus::Submitted);
    assert!(bulk[&ready.id].ready);
    assert!(derive_statuses_bulk(&db, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn identifier_resolution_is_consistent() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let user = &team.user;

    let by_code = resolve_user(&db, &user.user_code).await.unwrap();
    let by_name = resolve_user(&db, &user.username).await.unwrap();
    let by_id = resolve_user(&db, &user.id.to_string()).await.unwrap();

    assert_eq!(by_code, by_name);
    assert_eq!(by_name, by_id);
    assert_eq!(by_id.id, user.id);

    assert!(resolve_user(&db, "nobody").await.unwrap_err().is_not_found());
    assert!(resolve_user(&db, "  ").await.unwrap_err().is_not_found());
    assert!(resolve_user(&db, "424242").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn user_code_outranks_username_and_username_outranks_id() {
    let db = setup_db().await;
    let team = add_team(&db).await;

    // username equal to another account's code
    let shadow = add_user(&db, &team.user.user_code, Role::User).await;
    assert_eq!(resolve_user(&db, &team.user.user_code).await.unwrap().id, team.user.id);

    // username equal to another account's numeric id
    let numeric = add_user(&db, &team.admin.id.to_string(), Role::User).await;
    assert_eq!(resolve_user(&db, &team.admin.id.to_string()).await.unwrap().id, numeric.id);

    assert_eq!(resolve_user(&db, &shadow.id.to_string()).await.unwrap().id, shadow.id);
}

#[tokio::test]
async fn password_reset_sets_the_configured_credential() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let settings = account_settings();

    assert!(authenticate(&db, "worker", "password123", Role::User).await.is_ok());

    reset_credential(&db, &team.user, &settings).await.unwrap();

    let err = authenticate(&db, "worker", "password123", Role::User).await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidCredentials));
    assert!(authenticate(&db, "worker", &settings.reset_password, Role::User).await.is_ok());
}

#[tokio::test]
async fn login_requires_the_matching_role() {
    let db = setup_db().await;
    add_team(&db).await;

    let err = authenticate(&db, "worker", "password123", Role::Supervisor).await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidCredentials));

    let err = authenticate(&db, "ghost", "password123", Role::User).await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidCredentials));

    let user = authenticate(&db, "lead", "password123", Role::Supervisor).await.unwrap();
    assert_eq!(user.role, Role::Supervisor);
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let db = setup_db().await;
    add_user(&db, "worker", Role::User).await;

    let request = job_allotment::model::user::UserCreateRequest {
        username: "worker".to_string(),
        email: "again@example.com".to_string(),
        password: "password123".to_string(),
        role: Role::Supervisor,
        department_code: None,
        department_name: None,
        designation: None,
    };
    let err = job_allotment::workflow::account::create_user(&db, &request, &account_settings())
        .await
        .unwrap_err();
    assert!(matches!(err, WorkflowError::DuplicateUsername));
}

#[tokio::test]
async fn job_titles_come_from_the_catalog_or_free_text() {
    let db = setup_db().await;
    let team = add_team(&db).await;

    let from_catalog = create_job(&db, &JobCreateRequest {
        title: Some("ignored".to_string()),
        title_code: Some("Network".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(from_catalog.title, "Network");

    let free_text = create_job(&db, &JobCreateRequest {
        title: Some("Projector".to_string()),
        title_code: Some("Other".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(free_text.title, "Projector");

    let err = create_job(&db, &JobCreateRequest::default()).await.unwrap_err();
    match err {
        WorkflowError::Validation(errors) => {
            assert_eq!(errors[0].field, "title");
            assert_eq!(errors[0].message, "Please provide a job title.");
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let err = create_job(&db, &JobCreateRequest {
        title_code: Some("UPS".to_string()),
        ..Default::default()
    })
    .await
    .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    add_job_title(&db, "UPS", "Power supply").await.unwrap();
    let added = create_job(&db, &JobCreateRequest {
        title_code: Some("UPS".to_string()),
        assigned_to: Some(team.user.id),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(added.title, "Power supply");

    let err = add_job_title(&db, "UPS", "Again").await.unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));
}

#[tokio::test]
async fn allotment_checks_roles() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let job = create_job(&db, &JobCreateRequest {
        title: Some("Camera".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();
    assert_eq!(job.assigned_to, None);

    let err = allot_job(&db, job.id, &JobAllotmentRequest {
        assigned_to: Some(team.supervisor.id),
        supervisor: Some(team.supervisor.id),
    })
    .await
    .unwrap_err();
    assert!(matches!(err, WorkflowError::Validation(_)));

    let allotted = allot_job(&db, job.id, &JobAllotmentRequest {
        assigned_to: Some(team.user.id),
        supervisor: Some(team.supervisor.id),
    })
    .await
    .unwrap();
    assert_eq!(allotted.assigned_to, Some(team.user.id));
    assert_eq!(allotted.supervisor, Some(team.supervisor.id));
    assert!(allotted.updated_at.is_some());
}

#[tokio::test]
async fn dashboards_count_progress_per_role() {
    let db = setup_db().await;
    let team = add_team(&db).await;
    let first = add_job(&db, &team).await;
    let second = add_job(&db, &team).await;
    add_job(&db, &team).await;

    let report = submit_report(&db, first.id, &team.user, "done").await.unwrap();
    supervisor_verify(&db, report.id, &team.supervisor).await.unwrap();
    submit_report(&db, second.id, &team.user, "done too").await.unwrap();

    let supervisor = supervisor_dashboard(&db, &team.supervisor).await.unwrap();
    assert_eq!(supervisor.jobs.len(), 3);
    assert_eq!(supervisor.user_reports.len(), 2);
    assert_eq!(supervisor.pending_user_reports, 1);
    assert_eq!(supervisor.jobs_with_verified_user_report, vec![first.id]);
    assert_eq!(supervisor.pending_jobs_to_supervise, 1);

    let supervisor_report = submit_report(&db, first.id, &team.supervisor, "checked").await.unwrap();
    admin_verify(&db, supervisor_report.id, &team.admin, ReportStatus::Verified)
        .await
        .unwrap();

    let user = user_dashboard(&db, &team.user).await.unwrap();
    assert_eq!(user.total_jobs, 3);
    assert_eq!(user.completed_jobs, 1);
    assert_eq!(user.pending_jobs, 2);
    assert_eq!(user.reports.len(), 2);

    let admin = admin_dashboard(&db).await.unwrap();
    assert_eq!(admin.jobs.len(), 3);
    assert_eq!(admin.total_users, 3);
    assert_eq!(admin.total_reports, 3);
    assert_eq!(admin.jobs[0].statuses.final_status, FinalStatus::Approved);
    assert_eq!(admin.jobs[1].statuses.summary,
        "User report not verified by supervisor | Supervisor report not submitted");
}

#[tokio::test]
async fn catalog_starts_with_the_default_titles() {
    let db = setup_db().await;

    let titles = list_job_titles(&db).await.unwrap();
    let codes: Vec<&str> = titles.iter().map(|t| t.code.as_str()).collect();

    assert_eq!(codes, DEFAULT_TITLES);
    assert!(titles.iter().all(|t| t.code == t.name));
}

#[tokio::test]
async fn missing_records_name_what_was_missing() {
    let db = setup_db().await;
    let team = add_team(&db).await;

    assert!(matches!(
        find_job(&db, 404).await,
        Err(WorkflowError::NotFound(Resource::Job))
    ));
    assert!(matches!(
        find_report(&db, 404).await,
        Err(WorkflowError::NotFound(Resource::Report))
    ));
    assert!(matches!(
        resolve_user(&db, "ghost").await,
        Err(WorkflowError::NotFound(Resource::User))
    ));
    assert!(matches!(
        submit_report(&db, 404, &team.user, "no such job").await,
        Err(WorkflowError::NotFound(Resource::Job))
    ));
}
