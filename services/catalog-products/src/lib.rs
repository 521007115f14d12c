//! catalog-products - 产品目录服务

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

// Proto generated code modules
pub mod common {
    pub mod v1 {
        tonic::include_proto!("common.v1");
    }
}

pub mod catalog_products {
    pub mod v1 {
        tonic::include_proto!("catalog.products.v1");
    }
}

// Re-export for convenience
pub use catalog_products::v1 as proto;

pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("catalog_products_descriptor");
