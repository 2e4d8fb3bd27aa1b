//! In-app notifications for the signed-in user.

use serde::{Deserialize, Serialize};

pub const DELETE_ONE_PATH: &str = "/notification/delete-noti-one-user";

pub fn my_notifications_path(user_id: i64) -> String {
    format!("/notification/get-my-notifications/{}", user_id)
}

pub fn delete_all_path(user_id: i64) -> String {
    format!("/notification/delete-all-notifications-user/{}", user_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub mensaje: String,
    #[serde(default)]
    pub leido: bool,
    #[serde(rename = "fechaCreado", default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub referencia: Option<String>,
}

impl Notification {
    pub fn title(&self) -> &str {
        self.titulo
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Notificación")
    }
}

pub fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|n| !n.leido).count()
}

/// Badge text; counts above 99 collapse to "99+".
pub fn badge_text(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=99 => Some(count.to_string()),
        _ => Some("99+".to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteNotificationRequest {
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "notificacionId")]
    pub notification_id: i64,
}

/// Drops a notification locally once the backend confirmed the delete.
pub fn remove_notification(items: &mut Vec<Notification>, id: i64) {
    items.retain(|n| n.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, leido: bool) -> Notification {
        Notification {
            id,
            titulo: None,
            mensaje: format!("n{}", id),
            leido,
            created_at: None,
            referencia: None,
        }
    }

    #[test]
    fn test_delete_one_body() {
        let body = serde_json::to_value(DeleteNotificationRequest {
            user_id: 3,
            notification_id: 11,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"userID": 3, "notificacionId": 11}));
    }

    #[test]
    fn test_counts_and_badge() {
        let mut items = vec![note(1, false), note(2, true), note(3, false)];
        assert_eq!(unread_count(&items), 2);
        remove_notification(&mut items, 1);
        assert_eq!(unread_count(&items), 1);
        assert_eq!(badge_text(0), None);
        assert_eq!(badge_text(7).as_deref(), Some("7"));
        assert_eq!(badge_text(120).as_deref(), Some("99+"));
    }

    #[test]
    fn test_title_fallback() {
        assert_eq!(note(1, false).title(), "Notificación");
    }
}
