//! Algorithmic execution orders: the output of aggressing a top-of-book level.

use rust_decimal::Decimal;

use crate::domain::bond::Bond;
use crate::domain::order::PricingSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    Market,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOrder {
    pub product: Bond,
    pub side: PricingSide,
    pub order_id: String,
    pub order_type: OrderType,
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub parent_id: String,
    pub is_child_order: bool,
}

impl ExecutionOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        product: Bond,
        side: PricingSide,
        order_id: String,
        order_type: OrderType,
        price: Decimal,
        visible_quantity: i64,
        hidden_quantity: i64,
        parent_id: String,
        is_child_order: bool,
    ) -> Self {
        Self {
            product,
            side,
            order_id,
            order_type,
            price,
            visible_quantity,
            hidden_quantity,
            parent_id,
            is_child_order,
        }
    }
}

/// Wraps an [`ExecutionOrder`] as the value emitted by
/// `BondAlgoExecutionService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgoExecution {
    pub execution_order: ExecutionOrder,
}

impl AlgoExecution {
    pub fn new(execution_order: ExecutionOrder) -> Self {
        Self { execution_order }
    }
}
