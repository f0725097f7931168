mod home;
mod login;

pub(crate) use home::{about_me, account, home};
pub(crate) use login::{create, destroy, new};
