//! Appointments screen: seeded schedule, tab filtering, card actions.

use serde::{Deserialize, Serialize};

use crate::models::{Appointment, AppointmentStatus, AppointmentType};

/// Tabs on the appointments screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentTab {
    #[default]
    Upcoming,
    Completed,
}

impl AppointmentTab {
    fn status(self) -> AppointmentStatus {
        match self {
            Self::Upcoming => AppointmentStatus::Upcoming,
            Self::Completed => AppointmentStatus::Completed,
        }
    }
}

/// Buttons shown on an appointment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentAction {
    JoinCall,
    Reschedule,
    Cancel,
}

/// An appointment plus what the card renders for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentCard {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub type_label: &'static str,
    pub actions: Vec<AppointmentAction>,
}

pub fn seeded_appointments() -> Vec<Appointment> {
    vec![
        seed("1", "Dr. Kwame Mensah", "Obstetrician", "Today", "2:00 PM",
             AppointmentType::InPerson, Some("Ridge Hospital, Accra"), AppointmentStatus::Upcoming),
        seed("2", "Dr. Akosua Asante", "Gynecologist", "Tomorrow", "10:30 AM",
             AppointmentType::Video, None, AppointmentStatus::Upcoming),
        seed("3", "Dr. Emmanuel Osei", "Pediatrician", "Jan 25", "3:00 PM",
             AppointmentType::InPerson, Some("Korle Bu Teaching Hospital"), AppointmentStatus::Upcoming),
        seed("4", "Dr. Kwame Mensah", "Obstetrician", "Jan 15", "2:00 PM",
             AppointmentType::InPerson, Some("Ridge Hospital, Accra"), AppointmentStatus::Completed),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    doctor_name: &str,
    specialty: &str,
    date: &str,
    time: &str,
    appointment_type: AppointmentType,
    location: Option<&str>,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: id.into(),
        doctor_name: doctor_name.into(),
        specialty: specialty.into(),
        date: date.into(),
        time: time.into(),
        appointment_type,
        location: location.map(Into::into),
        status,
    }
}

pub fn type_label(appointment_type: AppointmentType) -> &'static str {
    match appointment_type {
        AppointmentType::Video => "Video Call",
        AppointmentType::Phone => "Phone Call",
        AppointmentType::InPerson => "In-Person",
    }
}

/// Only upcoming appointments have actions; "Join Call" only for video.
pub fn actions_for(appointment: &Appointment) -> Vec<AppointmentAction> {
    if appointment.status != AppointmentStatus::Upcoming {
        return Vec::new();
    }
    let mut actions = Vec::with_capacity(3);
    if appointment.appointment_type == AppointmentType::Video {
        actions.push(AppointmentAction::JoinCall);
    }
    actions.push(AppointmentAction::Reschedule);
    actions.push(AppointmentAction::Cancel);
    actions
}

pub fn filter_by_tab(appointments: &[Appointment], tab: AppointmentTab) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.status == tab.status())
        .cloned()
        .collect()
}

pub fn cards_for_tab(tab: AppointmentTab) -> Vec<AppointmentCard> {
    filter_by_tab(&seeded_appointments(), tab)
        .into_iter()
        .map(|appointment| AppointmentCard {
            type_label: type_label(appointment.appointment_type),
            actions: actions_for(&appointment),
            appointment,
        })
        .collect()
}
