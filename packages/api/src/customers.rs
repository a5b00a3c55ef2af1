//! Customer endpoints. All of them need the session token.

use serde::Serialize;
use store::listing::RegionFilter;
use store::{Coordinates, Customer};

use crate::client::{authorized, ApiClient};
use crate::error::ApiError;

#[derive(Serialize)]
struct BulkBody<'a> {
    customers: &'a [Customer],
}

impl ApiClient {
    /// Every customer, optionally narrowed to a city or city + district.
    pub async fn list_customers(
        &self,
        token: &str,
        region: &RegionFilter,
    ) -> Result<Vec<Customer>, ApiError> {
        let req = authorized(self.get("/customers"), token).query(&region.list_query());
        Self::send_json(req).await
    }

    /// Customers within `radius_m` metres of `at`.
    pub async fn nearby_customers(
        &self,
        token: &str,
        at: Coordinates,
        radius_m: u32,
        region: &RegionFilter,
    ) -> Result<Vec<Customer>, ApiError> {
        let req = authorized(self.get("/customers/nearby"), token)
            .query(&[
                ("lat", at.lat.to_string()),
                ("lng", at.lng.to_string()),
                ("radius", radius_m.to_string()),
            ])
            .query(&region.nearby_query());
        Self::send_json(req).await
    }

    pub async fn get_customer(&self, token: &str, id: &str) -> Result<Customer, ApiError> {
        Self::send_json(authorized(self.get(&format!("/customers/{id}")), token)).await
    }

    pub async fn create_customer(&self, token: &str, customer: &Customer) -> Result<(), ApiError> {
        Self::send_unit(authorized(self.post("/customers"), token).json(customer)).await
    }

    pub async fn update_customer(
        &self,
        token: &str,
        id: &str,
        customer: &Customer,
    ) -> Result<(), ApiError> {
        let req = authorized(self.put(&format!("/customers/{id}")), token).json(customer);
        Self::send_unit(req).await
    }

    pub async fn delete_customer(&self, token: &str, id: &str) -> Result<(), ApiError> {
        Self::send_unit(authorized(self.delete(&format!("/customers/{id}")), token)).await
    }

    /// Remove every customer record.
    pub async fn delete_all_customers(&self, token: &str) -> Result<(), ApiError> {
        Self::send_unit(authorized(self.delete("/customers"), token)).await
    }

    /// Insert the rows of a CSV import in one request.
    pub async fn bulk_create_customers(
        &self,
        token: &str,
        customers: &[Customer],
    ) -> Result<(), ApiError> {
        tracing::info!(count = customers.len(), "bulk import");
        let req = authorized(self.post("/customers/bulk"), token).json(&BulkBody { customers });
        Self::send_unit(req).await
    }
}
