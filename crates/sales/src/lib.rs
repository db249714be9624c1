//! Sales orders domain module.
//!
//! Contains the order model, the **order store** interface, and the order
//! creation workflow that ties customers, products and orders together.
//! No IO happens here; every side effect goes through an injected collaborator.

pub mod create_order;
pub mod error;
pub mod order;
pub mod request;
pub mod store;

pub use create_order::{CreateOrderService, price_line_items};
pub use error::OrderError;
pub use order::{NewOrder, Order, OrderLineItem};
pub use request::{OrderRequest, RequestedItem};
pub use store::OrderStore;
