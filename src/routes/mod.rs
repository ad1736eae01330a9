pub mod pv_routes;
