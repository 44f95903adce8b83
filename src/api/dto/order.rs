//! DTOs for order endpoints.

use crate::domain::entities::{NewOrderItem, OrderDraft};
use crate::domain::repositories::Paging;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// `take`/`skip` window of `GET /api/orders`. Both parameters are required.
#[derive(Debug, Deserialize, Validate)]
pub struct PagingParams {
    #[validate(range(min = 1, message = "take must be greater than 0"))]
    pub take: i64,

    #[validate(range(min = 0, message = "skip must not be negative"))]
    pub skip: i64,
}

impl From<PagingParams> for Paging {
    fn from(params: PagingParams) -> Self {
        Paging::new(params.skip, params.take)
    }
}

/// Body of `POST /api/orders`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub id: Option<Uuid>,
    pub customer_id: Uuid,
}

impl From<OrderRequest> for OrderDraft {
    fn from(req: OrderRequest) -> Self {
        Self {
            id: req.id,
            customer_id: req.customer_id,
        }
    }
}

/// One line of `POST /api/orders/{id}/items`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub order_id: Uuid,

    #[validate(range(min = 1, message = "itemId must be at least 1"))]
    pub item_id: i32,

    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
}

/// Body of `POST /api/orders/{id}/items`: a non-empty array of lines.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct OrderItemsRequest(pub Vec<OrderItemRequest>);

impl OrderItemsRequest {
    /// Whether every line targets `order_id`.
    pub fn all_for_order(&self, order_id: Uuid) -> bool {
        self.0.iter().all(|line| line.order_id == order_id)
    }

    pub fn into_lines(self) -> Vec<NewOrderItem> {
        self.0
            .into_iter()
            .map(|line| NewOrderItem {
                item_id: line.item_id,
                quantity: line.quantity,
            })
            .collect()
    }
}

impl Validate for OrderItemsRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            let mut error = ValidationError::new("length");
            error.message = Some("At least one order item is required".into());

            let mut errors = ValidationErrors::new();
            errors.add("items", error);
            return Err(errors);
        }

        for line in &self.0 {
            line.validate()?;
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderPath {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OrderItemPath {
    pub id: Uuid,

    #[validate(range(min = 1, message = "itemId must be at least 1"))]
    pub item_id: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_bounds() {
        assert!(PagingParams { take: 7, skip: 1 }.validate().is_ok());
        assert!(PagingParams { take: 0, skip: 0 }.validate().is_err());
        assert!(PagingParams { take: 1, skip: -1 }.validate().is_err());
    }

    #[test]
    fn test_paging_conversion() {
        let paging: Paging = PagingParams { take: 7, skip: 1 }.into();

        assert_eq!(paging, Paging::new(1, 7));
    }

    #[test]
    fn test_empty_items_rejected() {
        let req: OrderItemsRequest = serde_json::from_str("[]").unwrap();

        let errors = req.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("items"));
    }

    #[test]
    fn test_items_line_rules() {
        let order_id = Uuid::new_v4();
        let req: OrderItemsRequest = serde_json::from_value(serde_json::json!([
            { "orderId": order_id, "itemId": 1, "quantity": 0 }
        ]))
        .unwrap();

        let errors = req.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_items_order_id_check() {
        let order_id = Uuid::new_v4();
        let req: OrderItemsRequest = serde_json::from_value(serde_json::json!([
            { "orderId": order_id, "itemId": 1, "quantity": 2 },
            { "orderId": Uuid::new_v4(), "itemId": 2, "quantity": 1 }
        ]))
        .unwrap();

        assert!(req.validate().is_ok());
        assert!(!req.all_for_order(order_id));
    }

    #[test]
    fn test_into_lines() {
        let order_id = Uuid::new_v4();
        let req: OrderItemsRequest = serde_json::from_value(serde_json::json!([
            { "orderId": order_id, "itemId": 5, "quantity": 3 }
        ]))
        .unwrap();

        assert_eq!(
            req.into_lines(),
            vec![NewOrderItem {
                item_id: 5,
                quantity: 3
            }]
        );
    }
}
