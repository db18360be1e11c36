//! Business services orchestrating repositories and external APIs.

pub mod auth;
pub mod chatbot;
pub mod checkout;
pub mod email;
pub mod payment;

pub use auth::{AuthError, AuthService};
pub use chatbot::ChatbotService;
pub use checkout::CheckoutService;
pub use email::EmailService;
pub use payment::PaymentClient;
