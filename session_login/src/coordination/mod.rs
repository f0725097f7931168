//! Login flow coordination
//!
//! Ties the [`Session`](crate::Session) to the user store: resolving who the
//! current user is, and the three login actions (show form, log in, log out).
//! Everything here works on an explicit session value and store handle, so a
//! web integration only has to load the session before and save it after.

mod current_user;
mod errors;
mod login;

pub use current_user::{authorize_user, resolve_current_user};
pub use errors::CoordinationError;
pub use login::{
    FLASH_ERROR_KEY, INVALID_CREDENTIALS_MESSAGE, LoginOutcome, login_create, login_destroy,
    login_form,
};

#[cfg(test)]
pub(crate) mod test_lookup;
