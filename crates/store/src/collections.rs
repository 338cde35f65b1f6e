//! Names of the backend collections this layer consumes.

/// Product orders placed by customers.
pub const ORDERS: &str = "orders";

/// Registered customers (keyed by provider uid).
pub const CUSTOMERS: &str = "customers";

/// Retail products.
pub const PRODUCTS: &str = "products";

/// Bookable services.
pub const SERVICES: &str = "services";

/// Service bookings/appointments.
pub const BOOKINGS: &str = "bookings";

/// Staff/admin profiles (keyed by provider uid).
pub const USERS: &str = "users";
