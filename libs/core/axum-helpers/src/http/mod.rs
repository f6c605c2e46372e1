//! HTTP middleware module: CORS configuration.

pub mod cors;

pub use cors::{
    cors_layer_from_origins, create_cors_layer, create_permissive_cors_layer,
    parse_allowed_origins,
};
