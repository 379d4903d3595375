//! Flow orchestrators implemented as methods on [`Config`](crate::config::Config).
//!
//! Build flows return the authorization URL the user should open. Exchange flows post a form
//! to one of the token endpoints and normalize the answer into a
//! [`Token`](crate::auth::Token). Every exchange accepts an optional transport; `None` uses the
//! process-wide reqwest client.
//!
//! | Flow | Method | Endpoint |
//! |---|---|---|
//! | Authorization code | [`Config::code_flow_auth_url`](crate::config::Config::code_flow_auth_url), [`Config::exchange_code`](crate::config::Config::exchange_code) | authorize, token |
//! | Implicit | [`Config::implicit_flow_auth_url`](crate::config::Config::implicit_flow_auth_url), [`Config::implicit_flow_result`](crate::config::Config::implicit_flow_result) | authorize |
//! | Password | [`Config::password_credentials`](crate::config::Config::password_credentials) | password token |
//! | Client credentials | [`Config::service_token`](crate::config::Config::service_token) | token |
//! | Session extension | [`Config::extend_sid`](crate::config::Config::extend_sid) | password token |

pub mod common;
pub mod extend_sid;
pub mod password;

mod authorization_code;
mod client_credentials;
mod implicit;

pub use common::*;
pub use extend_sid::*;
pub use password::*;
