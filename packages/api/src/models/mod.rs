//! Request and response bodies of the courier API.

mod requests;
mod responses;

pub use requests::{Credentials, OtpRequest, OtpVerification, Registration, TokenUpdate};
pub use responses::{ApiMessage, LoginResponse, PromoImage, UpdateCheck};
