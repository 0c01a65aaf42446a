//! Employee and task lifecycle enums.
//!
//! Each enum maps to a `TEXT` column guarded by a `CHECK` constraint in the
//! migrations. The string forms here must match those constraints.
//!
//! Status changes are deliberately permissive: any employee status may be
//! set from any other. The only behaviour attached to a status is which
//! checklist phase (if any) it seeds, see [`EmployeeStatus::checklist_phase`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// The value stored in the database and sent over the wire.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Parse a wire value, rejecting unknown input with a message
            /// that lists the accepted values.
            pub fn parse(value: &str) -> Result<Self, CoreError> {
                match value {
                    $( $text => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{}'. Must be one of: {}",
                        $label,
                        other,
                        [$( $text ),+].join(", ")
                    ))),
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_enum! {
    /// Where an employee is in their tenure.
    EmployeeStatus ("employee status") {
        Onboarding = "onboarding",
        Active = "active",
        Exiting = "exiting",
        Exited = "exited",
        Inactive = "inactive",
    }
}

define_text_enum! {
    /// Progress of a single checklist task.
    TaskStatus ("task status") {
        Pending = "pending",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

define_text_enum! {
    /// Which checklist a task belongs to.
    TaskType ("task type") {
        Onboarding = "onboarding",
        Exit = "exit",
    }
}

impl EmployeeStatus {
    /// The checklist seeded when an employee enters this status.
    ///
    /// Only `onboarding` and `exiting` carry a checklist.
    pub fn checklist_phase(self) -> Option<TaskType> {
        match self {
            EmployeeStatus::Onboarding => Some(TaskType::Onboarding),
            EmployeeStatus::Exiting => Some(TaskType::Exit),
            EmployeeStatus::Active | EmployeeStatus::Exited | EmployeeStatus::Inactive => None,
        }
    }
}

impl Default for EmployeeStatus {
    fn default() -> Self {
        EmployeeStatus::Onboarding
    }
}

impl TaskStatus {
    /// Value for `completed_date` after a task moves to this status.
    ///
    /// Stamped with `now` exactly when the status is `completed`, cleared
    /// for every other status.
    pub fn completed_date_for(self, now: Timestamp) -> Option<Timestamp> {
        match self {
            TaskStatus::Completed => Some(now),
            TaskStatus::Pending | TaskStatus::InProgress => None,
        }
    }
}
