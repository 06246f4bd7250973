// Fixed backend paths, relative to the API base URL.
// Resource collections are derived from `Domain::path`.

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_ME: &str = "/auth/me";
pub const AUTH_LOGOUT: &str = "/auth/logout";

pub const DOCUMENTS_EMAIL_STATUS: &str = "/documents/email/status";

pub const DASHBOARD_STATS: &str = "/dashboard/stats";
pub const COMPANY_SETTINGS: &str = "/settings/company";

pub const ADMIN_SYSTEM_INFO: &str = "/admin/system-info";
pub const ADMIN_BACKUP_INFO: &str = "/admin/backup-info";

pub fn document_change_status(id: &uuid::Uuid) -> String {
    format!("/documents/{}/change-status", id)
}

pub fn document_convert(id: &uuid::Uuid) -> String {
    format!("/documents/{}/convert", id)
}

pub fn document_pdf(id: &uuid::Uuid) -> String {
    format!("/documents/{}/pdf", id)
}

pub fn document_send_email(id: &uuid::Uuid) -> String {
    format!("/documents/{}/send-email", id)
}

pub fn worker_courses(worker_id: &uuid::Uuid) -> String {
    format!("/workers/{}/courses", worker_id)
}

pub fn worker_course(worker_id: &uuid::Uuid, course_id: &uuid::Uuid) -> String {
    format!("/workers/{}/courses/{}", worker_id, course_id)
}

pub fn reminder_complete(id: &uuid::Uuid) -> String {
    format!("/reminders/{}/complete", id)
}

pub fn report(period: &str) -> String {
    format!("/reports/{}", period)
}

pub fn export(entity: &str) -> String {
    format!("/export/{}", entity)
}

pub fn import(entity: &str) -> String {
    format!("/export/import/{}", entity)
}
