//! Typed product operations over a transport.

use crate::client::ProductClient;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateProduct, Product, UpdateProduct};

/// The five catalog operations as the screens consume them.
pub trait ProductService {
    fn list(&self) -> Result<Vec<Product>, ApiError>;
    fn get(&self, id: &str) -> Result<Product, ApiError>;
    fn create(&self, input: &CreateProduct) -> Result<Product, ApiError>;
    fn update(&self, id: &str, input: &UpdateProduct) -> Result<Product, ApiError>;
    fn delete(&self, id: &str) -> Result<(), ApiError>;
}

/// Runs each `ProductClient` build/parse pair through a `Transport`.
#[derive(Debug, Clone)]
pub struct ProductApi<T> {
    client: ProductClient,
    transport: T,
}

impl ProductApi<UreqTransport> {
    pub fn connect(base_url: &str) -> Self {
        Self::new(ProductClient::new(base_url), UreqTransport::new())
    }
}

impl<T: Transport> ProductApi<T> {
    pub fn new(client: ProductClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ProductClient {
        &self.client
    }
}

impl<T: Transport> ProductService for ProductApi<T> {
    fn list(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.transport.execute(self.client.build_list_products())?;
        self.client.parse_list_products(response)
    }

    fn get(&self, id: &str) -> Result<Product, ApiError> {
        let response = self.transport.execute(self.client.build_get_product(id))?;
        self.client.parse_get_product(response)
    }

    fn create(&self, input: &CreateProduct) -> Result<Product, ApiError> {
        let request = self.client.build_create_product(input)?;
        let response = self.transport.execute(request)?;
        self.client.parse_create_product(response)
    }

    fn update(&self, id: &str, input: &UpdateProduct) -> Result<Product, ApiError> {
        let request = self.client.build_update_product(id, input)?;
        let response = self.transport.execute(request)?;
        self.client.parse_update_product(response)
    }

    fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_product(id))?;
        self.client.parse_delete_product(response)
    }
}
