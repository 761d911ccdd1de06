pub mod model;
pub mod store;

pub use model::{Account, NewAccount, UserProfile};
pub use store::{AccountStore, InMemoryAccountStore};
