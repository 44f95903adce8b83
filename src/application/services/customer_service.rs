//! Customer service.

use crate::domain::entities::{Customer, CustomerDraft, Order};
use crate::domain::repositories::{CustomerRepository, OrderRepository};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Service for customers and the orders they own.
pub struct CustomerService {
    customers: Arc<dyn CustomerRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl CustomerService {
    /// Creates a new customer service.
    pub fn new(customers: Arc<dyn CustomerRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { customers, orders }
    }

    /// Lists all customers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.customers.list().await
    }

    /// Retrieves a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the customer does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        self.customers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Customer Not Found", json!({ "id": id })))
    }

    /// Lists the orders of a customer. An unknown customer simply has none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn orders_for_customer(&self, id: Uuid) -> Result<Vec<Order>, AppError> {
        self.orders.list_for_customer(id).await
    }

    /// Searches customers by name or email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if nothing matches.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn search_customers(&self, query: &str) -> Result<Vec<Customer>, AppError> {
        let customers = self.customers.search(query).await?;

        if customers.is_empty() {
            return Err(AppError::not_found(
                "No Customers Found",
                json!({ "query": query }),
            ));
        }

        Ok(customers)
    }

    /// Creates or updates a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] with message "Creation failed" on any
    /// datastore failure.
    pub async fn upsert_customer(&self, draft: CustomerDraft) -> Result<Customer, AppError> {
        self.customers.upsert(draft).await.map_err(|e| {
            tracing::error!(error = %e, "Customer upsert failed");
            AppError::internal("Creation failed", json!({}))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockCustomerRepository, MockOrderRepository};
    use chrono::Utc;

    fn customer(name: &str) -> Customer {
        Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: None,
            address: None,
            created_at: Utc::now(),
        }
    }

    fn service(customers: MockCustomerRepository, orders: MockOrderRepository) -> CustomerService {
        CustomerService::new(Arc::new(customers), Arc::new(orders))
    }

    #[tokio::test]
    async fn test_get_customer_success() {
        let found = customer("Ada");
        let id = found.id;

        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));

        let result = service(mock_repo, MockOrderRepository::new())
            .get_customer(id)
            .await;

        assert_eq!(result.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn test_get_customer_not_found() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let err = service(mock_repo, MockOrderRepository::new())
            .get_customer(Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Customer Not Found");
    }

    #[tokio::test]
    async fn test_search_without_matches_is_not_found() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_search()
            .withf(|q| q == "zzz")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let err = service(mock_repo, MockOrderRepository::new())
            .search_customers("zzz")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "No Customers Found");
    }

    #[tokio::test]
    async fn test_search_returns_matches() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_search()
            .times(1)
            .returning(|_| Ok(vec![customer("Ada"), customer("Adam")]));

        let found = service(mock_repo, MockOrderRepository::new())
            .search_customers("ad")
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_failure_is_generic() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo
            .expect_upsert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let draft = CustomerDraft {
            id: None,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            address: None,
        };

        let err = service(mock_repo, MockOrderRepository::new())
            .upsert_customer(draft)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Creation failed");
    }

    #[tokio::test]
    async fn test_orders_for_customer_delegates_to_orders() {
        let customer_id = Uuid::new_v4();

        let mut mock_orders = MockOrderRepository::new();
        mock_orders
            .expect_list_for_customer()
            .withf(move |id| *id == customer_id)
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let orders = service(MockCustomerRepository::new(), mock_orders)
            .orders_for_customer(customer_id)
            .await
            .unwrap();

        assert!(orders.is_empty());
    }
}
