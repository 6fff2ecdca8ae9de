pub mod compare_route;
pub mod issues_request;
pub mod issues_response;
pub mod rank_route;
pub mod suggestion_route;
