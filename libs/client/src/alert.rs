//! Alert slice

use serde::{Deserialize, Serialize};

use crate::action::{Action, Alert};

/// Alerts currently displayed, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertState {
    pub alerts: Vec<Alert>,
}

impl AlertState {
    pub fn reduce(&self, action: &Action) -> AlertState {
        match action {
            Action::SetAlert(alert) => {
                let mut alerts = self.alerts.clone();
                alerts.push(alert.clone());
                AlertState { alerts }
            }
            Action::RemoveAlert(id) => AlertState {
                alerts: self
                    .alerts
                    .iter()
                    .filter(|alert| alert.id != *id)
                    .cloned()
                    .collect(),
            },
            _ => self.clone(),
        }
    }
}
