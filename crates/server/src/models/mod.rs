//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types; the row-to-domain conversion lives in the repositories.

pub mod billing;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod content;
pub mod order;
pub mod session;
pub mod user;

pub use billing::{Address, PaymentMethod, Subscription};
pub use cart::Cart;
pub use catalog::{Category, Product};
pub use contact::ContactMessage;
pub use content::{HeroCarouselSlide, MainMessage};
pub use order::{Order, OrderedProduct, Transaction};
pub use session::{CurrentUser, session_keys};
pub use user::User;
