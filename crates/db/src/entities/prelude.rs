//! Entity prelude.

pub use super::accounts::Entity as Accounts;
pub use super::categories::Entity as Categories;
pub use super::tags::Entity as Tags;
pub use super::transaction_tags::Entity as TransactionTags;
pub use super::transactions::Entity as Transactions;
