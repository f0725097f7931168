mod cookie;
mod session;

pub use cookie::get_session_id_from_headers;
pub use session::SessionStore;
