//! Access guard - the navigation-time predicate enforcing authentication
//! and role requirements.
//!
//! A pure, synchronous check evaluated on every request; decisions are
//! never cached. Session state itself is owned by the identity layer.

use uuid::Uuid;

use super::{Post, Role};

/// Who is asking. Derived from the identity layer's session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated { user_id: Uuid, role: Role },
}

impl Viewer {
    pub fn user(user_id: Uuid) -> Self {
        Viewer::Authenticated {
            user_id,
            role: Role::User,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Viewer::Authenticated {
            user_id,
            role: Role::Admin,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(
            self,
            Viewer::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }
}

/// What a route demands of its viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    AdminOnly,
}

/// Outcome of the guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// Unauthenticated viewer on a protected route.
    RedirectToLogin,
    /// Authenticated but under-privileged viewer on an admin route.
    RedirectHome,
}

/// Evaluate whether a viewer may reach a route.
pub fn authorize(viewer: Viewer, access: RouteAccess) -> Decision {
    match access {
        RouteAccess::Public => Decision::Allow,
        RouteAccess::Authenticated => match viewer {
            Viewer::Anonymous => Decision::RedirectToLogin,
            Viewer::Authenticated { .. } => Decision::Allow,
        },
        RouteAccess::AdminOnly => match viewer {
            Viewer::Anonymous => Decision::RedirectToLogin,
            Viewer::Authenticated { role, .. } => {
                if role.is_admin() {
                    Decision::Allow
                } else {
                    Decision::RedirectHome
                }
            }
        },
    }
}

/// Post content may only be edited by its author.
pub fn can_edit_post(viewer: Viewer, post: &Post) -> bool {
    matches!(viewer, Viewer::Authenticated { user_id, .. } if user_id == post.author_id)
}

/// Posts may be deleted by their author or by an admin.
pub fn can_delete_post(viewer: Viewer, post: &Post) -> bool {
    match viewer {
        Viewer::Anonymous => false,
        Viewer::Authenticated { user_id, role } => role.is_admin() || user_id == post.author_id,
    }
}

/// Drafts are visible only to their author and to admins.
pub fn can_view_post(viewer: Viewer, post: &Post) -> bool {
    post.published || can_delete_post(viewer, post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn draft_by(author_id: Uuid) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            author_id,
            author_name: "Author".to_string(),
            category_id: Uuid::new_v4(),
            category_name: "General".to_string(),
            title: "Draft".to_string(),
            content: String::new(),
            published: false,
            tags: vec![],
            image_url: None,
            views: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn anonymous_on_protected_route_redirects_to_login() {
        assert_eq!(
            authorize(Viewer::Anonymous, RouteAccess::Authenticated),
            Decision::RedirectToLogin
        );
        assert_eq!(
            authorize(Viewer::Anonymous, RouteAccess::AdminOnly),
            Decision::RedirectToLogin
        );
    }

    #[test]
    fn user_on_admin_route_redirects_home() {
        let viewer = Viewer::user(Uuid::new_v4());
        assert_eq!(
            authorize(viewer, RouteAccess::AdminOnly),
            Decision::RedirectHome
        );
        assert_eq!(authorize(viewer, RouteAccess::Authenticated), Decision::Allow);
    }

    #[test]
    fn everyone_reaches_public_routes() {
        assert_eq!(authorize(Viewer::Anonymous, RouteAccess::Public), Decision::Allow);
        assert_eq!(
            authorize(Viewer::admin(Uuid::new_v4()), RouteAccess::AdminOnly),
            Decision::Allow
        );
    }

    #[test]
    fn non_owner_cannot_edit() {
        let author = Uuid::new_v4();
        let post = draft_by(author);
        assert!(can_edit_post(Viewer::user(author), &post));
        assert!(!can_edit_post(Viewer::user(Uuid::new_v4()), &post));
        // Admins moderate but do not rewrite other people's content.
        assert!(!can_edit_post(Viewer::admin(Uuid::new_v4()), &post));
    }

    #[test]
    fn author_or_admin_can_delete() {
        let author = Uuid::new_v4();
        let post = draft_by(author);
        assert!(can_delete_post(Viewer::user(author), &post));
        assert!(can_delete_post(Viewer::admin(Uuid::new_v4()), &post));
        assert!(!can_delete_post(Viewer::user(Uuid::new_v4()), &post));
        assert!(!can_delete_post(Viewer::Anonymous, &post));
    }

    #[test]
    fn drafts_hidden_from_public() {
        let author = Uuid::new_v4();
        let post = draft_by(author);
        assert!(!can_view_post(Viewer::Anonymous, &post));
        assert!(!can_view_post(Viewer::user(Uuid::new_v4()), &post));
        assert!(can_view_post(Viewer::user(author), &post));
        assert!(can_view_post(Viewer::admin(Uuid::new_v4()), &post));
    }
}
