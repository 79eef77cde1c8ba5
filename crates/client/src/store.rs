//! Shared read-through cache over a [`RecordsApi`].
//!
//! The original dashboard fetched overlapping collections page by page;
//! here every page reads through one store instead. Each collection is
//! fetched once and kept; entity id is the merge key. Successful writes
//! fold the server's response back into the cache, failed writes leave
//! it untouched, and writes that move data the cache cannot see
//! (savings totals, dangling references) drop the affected collection
//! so the next read refetches it.

use std::cell::RefCell;
use std::rc::Rc;

use api_types::{
    CreateCustomerRequest, CreateSavingsRequest, OverviewStats, UpdateCustomerRequest,
    UpdateSavingsRequest,
};
use core_types::{Branch, Customer, SavingsRecord};

use crate::{RecordsApi, Result};

pub struct Store<A> {
    api: A,
    customers: RefCell<Option<Rc<Vec<Customer>>>>,
    savings: RefCell<Option<Rc<Vec<SavingsRecord>>>>,
    branches: RefCell<Option<Rc<Vec<Branch>>>>,
}

impl<A: RecordsApi> Store<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            customers: RefCell::new(None),
            savings: RefCell::new(None),
            branches: RefCell::new(None),
        }
    }

    // ----- reads -----

    pub async fn customers(&self) -> Result<Rc<Vec<Customer>>> {
        if let Some(cached) = self.customers.borrow().clone() {
            return Ok(cached);
        }
        let fetched = Rc::new(self.api.list_customers().await?);
        *self.customers.borrow_mut() = Some(fetched.clone());
        Ok(fetched)
    }

    pub async fn savings(&self) -> Result<Rc<Vec<SavingsRecord>>> {
        if let Some(cached) = self.savings.borrow().clone() {
            return Ok(cached);
        }
        let fetched = Rc::new(self.api.list_savings().await?);
        *self.savings.borrow_mut() = Some(fetched.clone());
        Ok(fetched)
    }

    pub async fn branches(&self) -> Result<Rc<Vec<Branch>>> {
        if let Some(cached) = self.branches.borrow().clone() {
            return Ok(cached);
        }
        let fetched = Rc::new(self.api.list_branches().await?);
        *self.branches.borrow_mut() = Some(fetched.clone());
        Ok(fetched)
    }

    /// One customer's savings history. Served from the cached savings
    /// collection when it is already loaded, otherwise fetched from the
    /// dedicated endpoint without priming the cache.
    pub async fn customer_history(&self, id: &str) -> Result<Vec<SavingsRecord>> {
        let cached = self.savings.borrow().clone();
        if let Some(records) = cached {
            return Ok(records
                .iter()
                .filter(|r| r.customer.id == id)
                .cloned()
                .collect());
        }
        self.api.customer_history(id).await
    }

    /// Overview figures are computed server-side and never cached; the
    /// screen shows them once per visit.
    pub async fn overview(&self) -> Result<OverviewStats> {
        self.api.overview().await
    }

    // ----- customer writes -----

    pub async fn create_customer(&self, req: &CreateCustomerRequest) -> Result<Customer> {
        let created = self.api.create_customer(req).await?;
        self.merge_customer(created.clone());
        Ok(created)
    }

    pub async fn update_customer(
        &self,
        id: &str,
        req: &UpdateCustomerRequest,
    ) -> Result<Customer> {
        let updated = self.api.update_customer(id, req).await?;
        self.merge_customer(updated.clone());
        Ok(updated)
    }

    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        self.api.delete_customer(id).await?;
        if let Some(cached) = self.customers.borrow_mut().as_mut() {
            Rc::make_mut(cached).retain(|c| c.id != id);
        }
        // Records referencing the customer are gone or dangling now.
        *self.savings.borrow_mut() = None;
        Ok(())
    }

    // ----- savings writes -----

    pub async fn create_saving(&self, req: &CreateSavingsRequest) -> Result<SavingsRecord> {
        let created = self.api.create_saving(req).await?;
        self.merge_saving(created.clone());
        self.invalidate_customers();
        Ok(created)
    }

    pub async fn update_saving(
        &self,
        id: &str,
        req: &UpdateSavingsRequest,
    ) -> Result<SavingsRecord> {
        let updated = self.api.update_saving(id, req).await?;
        self.merge_saving(updated.clone());
        self.invalidate_customers();
        Ok(updated)
    }

    pub async fn delete_saving(&self, id: &str) -> Result<()> {
        self.api.delete_saving(id).await?;
        if let Some(cached) = self.savings.borrow_mut().as_mut() {
            Rc::make_mut(cached).retain(|r| r.id != id);
        }
        self.invalidate_customers();
        Ok(())
    }

    // ----- cache maintenance -----

    fn merge_customer(&self, customer: Customer) {
        if let Some(cached) = self.customers.borrow_mut().as_mut() {
            let list = Rc::make_mut(cached);
            match list.iter_mut().find(|c| c.id == customer.id) {
                Some(existing) => *existing = customer,
                None => list.push(customer),
            }
        }
    }

    fn merge_saving(&self, record: SavingsRecord) {
        if let Some(cached) = self.savings.borrow_mut().as_mut() {
            let list = Rc::make_mut(cached);
            match list.iter_mut().find(|r| r.id == record.id) {
                Some(existing) => *existing = record,
                None => list.push(record),
            }
        }
    }

    /// Savings writes change customer running totals server-side.
    fn invalidate_customers(&self) {
        *self.customers.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;
    use chrono::NaiveDate;
    use core_types::CustomerLink;
    use rust_decimal::Decimal;
    use std::cell::Cell;

    struct MockApi {
        customers: Vec<Customer>,
        savings: Vec<SavingsRecord>,
        customer_lists: Cell<usize>,
        savings_lists: Cell<usize>,
        history_calls: Cell<usize>,
        fail_next: Cell<bool>,
    }

    impl MockApi {
        fn new() -> Self {
            let sarah = Customer::new("c1", "Sarah Johnson", "555-123-4567", Decimal::from(500));
            let chen = Customer::new("c2", "Michael Chen", "555-987-6543", Decimal::from(1000));
            let record = SavingsRecord::new(
                "r1",
                CustomerLink::new("c1", Some("Sarah Johnson".to_string())),
                Decimal::from(500),
                NaiveDate::from_ymd_opt(2023, 10, 15).unwrap(),
            );
            Self {
                customers: vec![sarah, chen],
                savings: vec![record],
                customer_lists: Cell::new(0),
                savings_lists: Cell::new(0),
                history_calls: Cell::new(0),
                fail_next: Cell::new(false),
            }
        }

        fn take_failure(&self) -> Result<()> {
            if self.fail_next.replace(false) {
                Err(ClientError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    impl RecordsApi for MockApi {
        async fn list_customers(&self) -> Result<Vec<Customer>> {
            self.take_failure()?;
            self.customer_lists.set(self.customer_lists.get() + 1);
            Ok(self.customers.clone())
        }

        async fn create_customer(&self, req: &CreateCustomerRequest) -> Result<Customer> {
            self.take_failure()?;
            Ok(Customer::new(
                "c-new",
                req.name.clone(),
                req.phone.clone(),
                req.daily_amount,
            ))
        }

        async fn update_customer(
            &self,
            id: &str,
            req: &UpdateCustomerRequest,
        ) -> Result<Customer> {
            self.take_failure()?;
            let mut customer = self
                .customers
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| ClientError::Api {
                    status: 404,
                    message: "no such customer".to_string(),
                })?;
            if let Some(name) = &req.name {
                customer.name = name.clone();
            }
            Ok(customer)
        }

        async fn delete_customer(&self, _id: &str) -> Result<()> {
            self.take_failure()
        }

        async fn customer_history(&self, id: &str) -> Result<Vec<SavingsRecord>> {
            self.take_failure()?;
            self.history_calls.set(self.history_calls.get() + 1);
            Ok(self
                .savings
                .iter()
                .filter(|r| r.customer.id == id)
                .cloned()
                .collect())
        }

        async fn list_savings(&self) -> Result<Vec<SavingsRecord>> {
            self.take_failure()?;
            self.savings_lists.set(self.savings_lists.get() + 1);
            Ok(self.savings.clone())
        }

        async fn create_saving(&self, req: &CreateSavingsRequest) -> Result<SavingsRecord> {
            self.take_failure()?;
            Ok(SavingsRecord::new(
                "r-new",
                CustomerLink::new(req.customer_id.clone(), None),
                req.amount,
                req.date,
            ))
        }

        async fn update_saving(
            &self,
            id: &str,
            req: &UpdateSavingsRequest,
        ) -> Result<SavingsRecord> {
            self.take_failure()?;
            let mut record = self
                .savings
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| ClientError::Api {
                    status: 404,
                    message: "no such record".to_string(),
                })?;
            if let Some(amount) = req.amount {
                record.amount = amount;
            }
            Ok(record)
        }

        async fn delete_saving(&self, _id: &str) -> Result<()> {
            self.take_failure()
        }

        async fn list_branches(&self) -> Result<Vec<Branch>> {
            self.take_failure()?;
            Ok(Vec::new())
        }

        async fn overview(&self) -> Result<OverviewStats> {
            self.take_failure()?;
            Ok(OverviewStats {
                total_customers: self.customers.len() as u32,
                active_customers: 0,
                total_branches: 0,
                total_saved: Decimal::ZERO,
                today_total: Decimal::ZERO,
                today_count: 0,
            })
        }
    }

    fn new_customer_req(name: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            name: name.to_string(),
            phone: "555-000-0000".to_string(),
            daily_amount: Decimal::from(750),
            email: None,
            branch_id: None,
            start_date: None,
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let store = Store::new(MockApi::new());

        let first = store.customers().await.unwrap();
        let second = store.customers().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.api.customer_lists.get(), 1);
    }

    #[tokio::test]
    async fn test_create_merges_into_cached_collection() {
        let store = Store::new(MockApi::new());
        store.customers().await.unwrap();

        store
            .create_customer(&new_customer_req("Emma Rodriguez"))
            .await
            .unwrap();

        let customers = store.customers().await.unwrap();
        assert_eq!(customers.len(), 3);
        assert!(customers.iter().any(|c| c.name == "Emma Rodriguez"));
        assert_eq!(store.api.customer_lists.get(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_matching_entry() {
        let store = Store::new(MockApi::new());
        store.customers().await.unwrap();

        let req = UpdateCustomerRequest {
            name: Some("Sarah J.".to_string()),
            ..UpdateCustomerRequest::default()
        };
        store.update_customer("c1", &req).await.unwrap();

        let customers = store.customers().await.unwrap();
        assert_eq!(customers.len(), 2);
        assert!(customers.iter().any(|c| c.name == "Sarah J."));
        assert!(!customers.iter().any(|c| c.name == "Sarah Johnson"));
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_unchanged() {
        let store = Store::new(MockApi::new());
        let before = store.customers().await.unwrap();

        store.api.fail_next.set(true);
        let result = store.create_customer(&new_customer_req("Ghost")).await;
        assert!(result.is_err());

        let after = store.customers().await.unwrap();
        assert_eq!(before, after);
        assert_eq!(store.api.customer_lists.get(), 1);
    }

    #[tokio::test]
    async fn test_failed_read_is_not_cached() {
        let store = Store::new(MockApi::new());

        store.api.fail_next.set(true);
        assert!(store.customers().await.is_err());

        let customers = store.customers().await.unwrap();
        assert_eq!(customers.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_customer_drops_savings_cache() {
        let store = Store::new(MockApi::new());
        store.customers().await.unwrap();
        store.savings().await.unwrap();

        store.delete_customer("c1").await.unwrap();

        let customers = store.customers().await.unwrap();
        assert!(!customers.iter().any(|c| c.id == "c1"));

        store.savings().await.unwrap();
        assert_eq!(store.api.savings_lists.get(), 2);
    }

    #[tokio::test]
    async fn test_saving_write_invalidates_customer_totals() {
        let store = Store::new(MockApi::new());
        store.customers().await.unwrap();
        store.savings().await.unwrap();

        let req = CreateSavingsRequest {
            customer_id: "c1".to_string(),
            amount: Decimal::from(500),
            date: NaiveDate::from_ymd_opt(2023, 10, 16).unwrap(),
            status: None,
        };
        store.create_saving(&req).await.unwrap();

        let savings = store.savings().await.unwrap();
        assert_eq!(savings.len(), 2);
        assert_eq!(store.api.savings_lists.get(), 1);

        store.customers().await.unwrap();
        assert_eq!(store.api.customer_lists.get(), 2);
    }

    #[tokio::test]
    async fn test_history_served_from_cached_savings() {
        let store = Store::new(MockApi::new());
        store.savings().await.unwrap();

        let history = store.customer_history("c1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(store.api.history_calls.get(), 0);
    }

    #[tokio::test]
    async fn test_history_fetched_when_savings_uncached() {
        let store = Store::new(MockApi::new());

        let history = store.customer_history("c1").await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(store.api.history_calls.get(), 1);
        assert_eq!(store.api.savings_lists.get(), 0);
    }
}
