//! Authentication UI module
//!
//! Client-side authentication: the reactive auth context, session
//! derivation, the route guard, and the login/register forms.

mod context;
mod guard;
mod login_form;
mod register_form;
mod session;
mod user_menu;

pub use context::{
    AuthClientError, AuthContext, RegisterError, RegisterProfile, SessionPhase, login, logout,
    provide_auth_context, register, use_auth_context,
};
pub use guard::{GuardState, RequireRole, evaluate};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
pub use session::{Derivation, LoginCommit, Session, commit_login, derive_session};
pub use user_menu::UserMenu;
