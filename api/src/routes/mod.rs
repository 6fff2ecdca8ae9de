pub mod health_route;
pub mod issues;
pub mod review;
