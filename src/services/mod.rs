pub mod auth_service;
pub mod cart_service;
pub mod checkout_service;
pub mod fee_service;
pub mod order_service;
pub mod payment_service;
pub mod restaurant_service;
pub mod voucher_service;
