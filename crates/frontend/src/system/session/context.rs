use contracts::system::session::{decode_token, UserToken};
use leptos::prelude::*;

use super::storage;

/// Identity of the signed-in user, decoded from the stored token.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub user: RwSignal<Option<UserToken>>,
}

impl SessionContext {
    /// Reads the token once at startup. A token that cannot be decoded leaves
    /// the session empty; the stored token belongs to the POS login and stays.
    pub fn restore() -> Self {
        Self {
            user: RwSignal::new(user_from_token(storage::get_token().as_deref())),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.with(|u| u.is_some())
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.with(|u| u.as_ref().map(|u| u.sub))
    }

    pub fn branch_id(&self) -> Option<i64> {
        self.user.with(|u| u.as_ref().map(|u| u.sucursal_id))
    }

    pub fn role(&self) -> String {
        self.user
            .with(|u| u.as_ref().map(|u| u.rol.clone()).unwrap_or_default())
    }

    /// `(branch_id, user_id)` without subscribing; used from socket callbacks.
    pub fn ids_untracked(&self) -> (i64, i64) {
        self.user.with_untracked(|u| {
            u.as_ref()
                .map(|u| (u.sucursal_id, u.sub))
                .unwrap_or_default()
        })
    }

    pub fn logout(&self) {
        storage::clear_token();
        self.user.set(None);
        log::info!("session closed");
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

/// Claims of the stored token, `None` when there is no token or it cannot be
/// decoded.
fn user_from_token(token: Option<&str>) -> Option<UserToken> {
    let token = token?;
    match decode_token(token) {
        Ok(user) => Some(user),
        Err(e) => {
            log::error!("stored token rejected: {}", e);
            None
        }
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreadable_token_leaves_session_empty() {
        assert_eq!(user_from_token(None), None);
        assert_eq!(user_from_token(Some("")), None);
        assert_eq!(user_from_token(Some("not-a-jwt")), None);
        assert_eq!(user_from_token(Some("a.%%%.c")), None);
    }

    #[test]
    fn test_readable_token_seeds_user() {
        let user = user_from_token(Some("h.eyJzdWIiOjUsInN1Y3Vyc2FsSWQiOjJ9.s")).unwrap();
        assert_eq!(user.sub, 5);
        assert_eq!(user.sucursal_id, 2);
    }
}
