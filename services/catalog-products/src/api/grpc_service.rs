//! gRPC service implementation

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::application::{
    CreateProductCommand, GetProductQuery, ListProductsQuery, RemoveProductCommand,
    ServiceHandler, UpdateProductCommand, ValidateProductsCommand,
};
use crate::domain::{ProductId, ProductPatch};
use crate::proto;
use crate::proto::product_service_server::ProductService;

use super::proto_converters::*;

pub struct ProductServiceImpl {
    handler: Arc<ServiceHandler>,
}

impl ProductServiceImpl {
    pub fn new(handler: Arc<ServiceHandler>) -> Self {
        Self { handler }
    }
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(
        &self,
        request: Request<proto::CreateProductRequest>,
    ) -> Result<Response<proto::ProductResponse>, Status> {
        let req = request.into_inner();

        let cmd = CreateProductCommand {
            name: req.name,
            price: parse_price(req.price)?,
            description: req.description,
            available: req.available,
        };

        let envelope = self.handler.create_product(cmd).await?;

        Ok(Response::new(envelope_to_proto(envelope)))
    }

    async fn find_all_products(
        &self,
        request: Request<proto::FindAllProductsRequest>,
    ) -> Result<Response<proto::ProductListResponse>, Status> {
        let req = request.into_inner();

        let query = ListProductsQuery {
            pagination: parse_pagination(req.pagination)?,
        };

        let envelope = self.handler.find_all(query).await?;

        Ok(Response::new(list_envelope_to_proto(envelope)))
    }

    async fn find_one_product(
        &self,
        request: Request<proto::FindOneProductRequest>,
    ) -> Result<Response<proto::ProductResponse>, Status> {
        let req = request.into_inner();

        let query = GetProductQuery {
            id: ProductId(req.id),
        };

        let envelope = self.handler.find_one(query).await?;

        Ok(Response::new(envelope_to_proto(envelope)))
    }

    async fn update_product(
        &self,
        request: Request<proto::UpdateProductRequest>,
    ) -> Result<Response<proto::ProductResponse>, Status> {
        let req = request.into_inner();

        // 被更新的只能是请求携带的目标 id；载荷字段集里没有主键
        let cmd = UpdateProductCommand {
            id: ProductId(req.id),
            patch: ProductPatch {
                name: req.name,
                price: req.price.map(parse_price).transpose()?,
                description: req.description,
                available: req.available,
            },
        };

        let envelope = self.handler.update_product(cmd).await?;

        Ok(Response::new(envelope_to_proto(envelope)))
    }

    async fn remove_product(
        &self,
        request: Request<proto::RemoveProductRequest>,
    ) -> Result<Response<proto::ProductResponse>, Status> {
        let req = request.into_inner();

        let cmd = RemoveProductCommand {
            id: ProductId(req.id),
        };

        let envelope = self.handler.remove_product(cmd).await?;

        Ok(Response::new(envelope_to_proto(envelope)))
    }

    async fn validate_products(
        &self,
        request: Request<proto::ValidateProductsRequest>,
    ) -> Result<Response<proto::ValidateProductsResponse>, Status> {
        let req = request.into_inner();

        let cmd = ValidateProductsCommand {
            ids: req.ids.into_iter().map(ProductId).collect(),
        };

        let products = self.handler.validate_products(cmd).await?;

        Ok(Response::new(proto::ValidateProductsResponse {
            products: products.iter().map(product_to_proto).collect(),
        }))
    }
}
