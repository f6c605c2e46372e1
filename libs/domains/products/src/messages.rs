//! Client-facing messages returned by the products API.

pub const INVALID_ID: &str = "ID no válido";
pub const NAME_REQUIRED: &str = "El nombre del producto es obligatorio";
pub const INVALID_PRICE: &str = "Precio no válido";
pub const PRICE_REQUIRED: &str = "El precio del producto es obligatorio";
pub const INVALID_AVAILABILITY: &str = "Valor para disponibilidad no válido";
pub const NOT_FOUND: &str = "Producto no encontrado";
pub const DELETED: &str = "Producto eliminado";
