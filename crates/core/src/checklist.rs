//! Static onboarding and exit checklist catalogs.
//!
//! Each phase has one fixed, ordered list of template entries. Expanding a
//! template for an employee yields one [`NewTask`] per entry; the due date
//! is the phase anchor (start date for onboarding, exit date for exit) plus
//! the entry's day offset. Exit offsets are mostly negative: they count
//! back from the last working day.

use chrono::Duration;

use crate::error::CoreError;
use crate::lifecycle::TaskType;
use crate::types::{Date, DbId};

/// One line of a checklist template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateEntry {
    pub title: &'static str,
    pub description: &'static str,
    /// Days relative to the phase anchor date.
    pub offset_days: i32,
}

const fn entry(title: &'static str, description: &'static str, offset_days: i32) -> TemplateEntry {
    TemplateEntry {
        title,
        description,
        offset_days,
    }
}

/// Onboarding checklist, anchored on the employee's start date.
pub const ONBOARDING_TEMPLATE: &[TemplateEntry] = &[
    entry("Offer letter shared & signed", "Share and get signed offer letter from new employee", -7),
    entry("Background verification completed", "Run reference and background checks before the joining date", -5),
    entry("Employee details form submitted", "Collect all required personal and professional details", -3),
    entry("ID & address proof collected", "Collect identity and address documents for HR records", -3),
    entry("Bank account details collected", "Collect bank details for payroll processing", -2),
    entry("Laptop/system allocation", "Allocate laptop and necessary hardware to employee", -1),
    entry("Email & communication tools created", "Create email account and setup communication tools", -1),
    entry("Workstation/desk assigned", "Prepare desk, chair and access card for the first day", -1),
    entry("Welcome email sent", "Send welcome email with first-day schedule and contacts", -1),
    entry("Access card issued", "Issue building access card and parking pass", 0),
    entry("Welcome kit shared", "Share welcome kit and company swag", 0),
    entry("Buddy assigned", "Assign an onboarding buddy from the team", 0),
    entry("Team introduction", "Introduce the new employee to the team and key stakeholders", 0),
    entry("HRMS/project access setup", "Provide access to HRMS and relevant project management tools", 1),
    entry("Payroll enrollment", "Enroll employee in payroll and confirm salary structure", 2),
    entry("Benefits enrollment", "Enroll employee in health insurance and other benefits", 3),
    entry("Company policies acknowledged", "Employee reads and acknowledges handbook and policies", 3),
    entry("Induction/training scheduled", "Schedule orientation and initial training sessions", 3),
    entry("IT security training completed", "Complete mandatory information security awareness training", 5),
    entry("Compliance training completed", "Complete code of conduct and compliance modules", 7),
    entry("Role expectations discussed", "Manager walks through role, responsibilities and goals", 7),
    entry("First week check-in", "HR check-in at the end of the first week", 7),
    entry("30-day goals set", "Agree on goals and success criteria for the first month", 14),
    entry("30-day review", "Manager review of progress after the first month", 30),
    entry("Probation review scheduled", "Schedule the end-of-probation review", 60),
];

/// Exit checklist, anchored on the employee's exit date.
pub const EXIT_TEMPLATE: &[TemplateEntry] = &[
    entry("Resignation accepted & acknowledged", "Acknowledge the resignation in writing and confirm last working day", -30),
    entry("Notice period confirmed", "Confirm notice period and any buy-out terms", -28),
    entry("Manager notified", "Inform reporting manager and agree on transition plan", -28),
    entry("Replacement/backfill planned", "Start backfill hiring or internal reassignment", -21),
    entry("Knowledge transfer session", "Complete knowledge transfer to replacement or team", -14),
    entry("Handover documentation completed", "Document open work, credentials ownership and processes", -10),
    entry("Project ownership reassigned", "Reassign project, repository and document ownership", -7),
    entry("Exit interview scheduled & completed", "Conduct exit interview to gather feedback", -5),
    entry("Leave balance reconciled", "Reconcile remaining leave against notice period", -5),
    entry("Expense claims settled", "Settle outstanding reimbursements and advances", -3),
    entry("IT assets returned", "Collect all company laptops, devices, and accessories", -1),
    entry("Access card returned", "Collect building access card and parking pass", 0),
    entry("Email access disabled", "Disable email and revoke system access", 0),
    entry("System access revoked", "Revoke HRMS, VPN, code and third-party tool accounts", 0),
    entry("HR clearance completed", "Complete HR clearance and documentation", 1),
    entry("Full & Final settlement initiated", "Process final salary and settlements", 5),
    entry("Relieving letter issued", "Issue relieving letter and experience certificate", 7),
    entry("Benefits termination processed", "End insurance and benefits, share continuation options", 10),
];

/// The template catalog for a checklist phase.
pub fn template_for(phase: TaskType) -> &'static [TemplateEntry] {
    match phase {
        TaskType::Onboarding => ONBOARDING_TEMPLATE,
        TaskType::Exit => EXIT_TEMPLATE,
    }
}

/// A task ready to be inserted, produced by [`expand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub employee_id: DbId,
    pub title: String,
    pub description: String,
    pub task_type: TaskType,
    pub due_date: Option<Date>,
    pub assigned_by: Option<String>,
}

/// Instantiate the `phase` checklist for one employee.
///
/// `anchor` is the employee's start date (onboarding) or exit date (exit).
/// Without an anchor every task is created without a due date.
///
/// The catalog is static, so any failure here is a defect rather than bad
/// input: it is reported as [`CoreError::Internal`] and no tasks are
/// returned.
pub fn expand(
    employee_id: DbId,
    phase: TaskType,
    anchor: Option<Date>,
    assigned_by: Option<&str>,
) -> Result<Vec<NewTask>, CoreError> {
    template_for(phase)
        .iter()
        .enumerate()
        .map(|(index, item)| {
            if item.title.trim().is_empty() {
                return Err(CoreError::Internal(format!(
                    "{phase} checklist entry {index} has an empty title"
                )));
            }

            let due_date = match anchor {
                Some(date) => Some(
                    date.checked_add_signed(Duration::days(i64::from(item.offset_days)))
                        .ok_or_else(|| {
                            CoreError::Internal(format!(
                                "Due date out of range for {phase} checklist entry '{}'",
                                item.title
                            ))
                        })?,
                ),
                None => None,
            };

            Ok(NewTask {
                employee_id,
                title: item.title.to_string(),
                description: item.description.to_string(),
                task_type: phase,
                due_date,
                assigned_by: assigned_by.map(str::to_string),
            })
        })
        .collect()
}
