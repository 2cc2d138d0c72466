use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same string so the front-end sees identical values.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Sender {
    User => "user",
    Assistant => "assistant",
});

str_enum!(TriageCategory {
    Normal => "normal",
    Warning => "warning",
    Emergency => "emergency",
});

str_enum!(ContactCategory {
    Primary => "primary",
    Hospital => "hospital",
    Doctor => "doctor",
    Family => "family",
});

str_enum!(AppointmentType {
    InPerson => "in-person",
    Video => "video",
    Phone => "phone",
});

str_enum!(AppointmentStatus {
    Upcoming => "upcoming",
    Completed => "completed",
    Cancelled => "cancelled",
});

str_enum!(MetricStatus {
    Good => "good",
    Warning => "warning",
    Danger => "danger",
});

str_enum!(TaskType {
    Medication => "medication",
    Appointment => "appointment",
    Exercise => "exercise",
    Hydration => "hydration",
});

str_enum!(UserRole {
    Mother => "mother",
    HealthWorker => "health-worker",
    Doctor => "doctor",
    Pharmacy => "pharmacy",
});
