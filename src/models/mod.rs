//! Data structures for the catalog, orders and the session-held cart.

pub mod admin_user;
pub mod cart;
pub mod order;
pub mod order_item;
pub mod product;

pub use admin_user::AdminUser;
pub use cart::{Cart, CartLine};
pub use order::Order;
pub use order_item::{OrderItem, OrderItemDetail};
pub use product::Product;
