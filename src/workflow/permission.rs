use crate::entity::job;
use crate::entity::user::{self, Role};
use super::WorkflowError;

/// Every action the workflow guards by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateJob,
    AllotJob,
    DeleteJob,
    CreateUser,
    AdminVerify,
    ResetPassword,
    SearchUsers,
    ManageTitles,
    ViewAllJobs,
    SubmitReport,
    SupervisorVerify,
    ViewJob,
    ViewReport,
    ViewAdminDashboard,
    ViewUserDashboard,
    ViewSupervisorDashboard,
}

impl Action {
    pub fn permits(&self, role: Role) -> bool {
        match self {
            Action::CreateJob
            | Action::AllotJob
            | Action::DeleteJob
            | Action::CreateUser
            | Action::AdminVerify
            | Action::ResetPassword
            | Action::SearchUsers
            | Action::ManageTitles
            | Action::ViewAllJobs
            | Action::ViewAdminDashboard => role == Role::Admin,
            Action::ViewUserDashboard => role == Role::User,
            Action::SubmitReport => matches!(role, Role::User | Role::Supervisor),
            Action::SupervisorVerify | Action::ViewSupervisorDashboard => role == Role::Supervisor,
            Action::ViewJob | Action::ViewReport => true,
        }
    }
}

pub fn authorize(role: Role, action: Action) -> Result<(), WorkflowError> {
    if action.permits(role) {
        Ok(())
    } else {
        tracing::warn!(role = role.as_str(), ?action, "role not allowed for action");
        Err(WorkflowError::PermissionDenied("role not allowed for this action"))
    }
}

/// Admins see every job; users and supervisors only the jobs they are on.
pub fn ensure_job_visible(actor: &user::Model, job: &job::Model) -> Result<(), WorkflowError> {
    let visible = match actor.role {
        Role::Admin => true,
        Role::User => job.assigned_to == Some(actor.id),
        Role::Supervisor => job.supervisor == Some(actor.id),
    };

    if visible {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied("job is not assigned to this account"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::entity::job::JobStatus;

    #[test]
    fn admin_only_actions_reject_other_roles() {
        for action in [
            Action::CreateJob,
            Action::AllotJob,
            Action::DeleteJob,
            Action::CreateUser,
            Action::AdminVerify,
            Action::ResetPassword,
            Action::SearchUsers,
            Action::ManageTitles,
            Action::ViewAllJobs,
            Action::ViewAdminDashboard,
        ] {
            assert!(authorize(Role::Admin, action).is_ok(), "{:?}", action);
            assert!(authorize(Role::User, action).is_err(), "{:?}", action);
            assert!(authorize(Role::Supervisor, action).is_err(), "{:?}", action);
        }
    }

    #[test]
    fn report_submission_is_for_users_and_supervisors() {
        assert!(authorize(Role::User, Action::SubmitReport).is_ok());
        assert!(authorize(Role::Supervisor, Action::SubmitReport).is_ok());
        assert!(matches!(
            authorize(Role::Admin, Action::SubmitReport),
            Err(WorkflowError::PermissionDenied(_))
        ));
    }

    #[test]
    fn only_supervisors_verify_user_reports() {
        assert!(authorize(Role::Supervisor, Action::SupervisorVerify).is_ok());
        assert!(authorize(Role::User, Action::SupervisorVerify).is_err());
        assert!(authorize(Role::Admin, Action::SupervisorVerify).is_err());
    }

    #[test]
    fn each_dashboard_belongs_to_one_role() {
        assert!(authorize(Role::User, Action::ViewUserDashboard).is_ok());
        assert!(authorize(Role::Supervisor, Action::ViewUserDashboard).is_err());
        assert!(authorize(Role::Admin, Action::ViewUserDashboard).is_err());

        assert!(authorize(Role::Supervisor, Action::ViewSupervisorDashboard).is_ok());
        assert!(authorize(Role::User, Action::ViewSupervisorDashboard).is_err());
        assert!(authorize(Role::Admin, Action::ViewSupervisorDashboard).is_err());
    }

    fn account(id: i32, role: Role) -> user::Model {
        user::Model {
            id,
            user_code: format!("U0000{}", id),
            username: format!("account{}", id),
            email: format!("account{}@example.com", id),
            password: String::new(),
            role,
            department_code: None,
            department_name: None,
            designation: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn job_for(assigned_to: i32, supervisor: i32) -> job::Model {
        job::Model {
            id: 1,
            title: "Network".to_string(),
            description: String::new(),
            assigned_to: Some(assigned_to),
            supervisor: Some(supervisor),
            status: JobStatus::Pending,
            remark: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn admins_see_every_job() {
        assert!(ensure_job_visible(&account(1, Role::Admin), &job_for(2, 3)).is_ok());
    }

    #[test]
    fn users_see_only_jobs_assigned_to_them() {
        let job = job_for(2, 3);
        assert!(ensure_job_visible(&account(2, Role::User), &job).is_ok());
        assert!(matches!(
            ensure_job_visible(&account(4, Role::User), &job),
            Err(WorkflowError::PermissionDenied(_))
        ));
    }

    #[test]
    fn supervisors_see_only_jobs_they_supervise() {
        let job = job_for(2, 3);
        assert!(ensure_job_visible(&account(3, Role::Supervisor), &job).is_ok());
        assert!(ensure_job_visible(&account(5, Role::Supervisor), &job).is_err());
        // a supervisor id in the assignee slot grants nothing
        assert!(ensure_job_visible(&account(2, Role::Supervisor), &job).is_err());
    }

    #[test]
    fn unallotted_job_is_admin_only() {
        let mut job = job_for(2, 3);
        job.assigned_to = None;
        job.supervisor = None;
        assert!(ensure_job_visible(&account(2, Role::User), &job).is_err());
        assert!(ensure_job_visible(&account(3, Role::Supervisor), &job).is_err());
        assert!(ensure_job_visible(&account(1, Role::Admin), &job).is_ok());
    }
}
